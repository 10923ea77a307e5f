//! Regions (governorates) shown on the public home page

pub mod model;
pub mod repository;

pub use model::{Region, GOVERNORATES};
pub use repository::RegionRepository;
