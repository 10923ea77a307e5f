//! User aggregate
//!
//! Contains the User entity, the creation DTO, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{User, UserRole};

pub use dto_create::NewUser;

pub use repository::UserRepository;
