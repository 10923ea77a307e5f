//! Registration, login, logout and the current-user endpoint

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
