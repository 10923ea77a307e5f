//! Tourist aggregate

pub mod model;
pub mod repository;

pub use model::TouristProfile;
pub use repository::TouristProfileRepository;
