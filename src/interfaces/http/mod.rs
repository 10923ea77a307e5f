//! HTTP REST API
//!
//! - `middleware`: session resolution and the authorization gate
//! - `modules`: handlers and DTOs per area
//! - `router`: route table, shared state and OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState, ServiceSettings};
