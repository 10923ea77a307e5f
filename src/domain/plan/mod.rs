//! Plan aggregate
//!
//! Tourism offerings published by approved guides.

pub mod model;
pub mod repository;

pub use model::{NewPlan, Plan};
pub use repository::PlanRepository;
