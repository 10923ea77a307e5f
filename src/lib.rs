//! # Inside Tunisia
//!
//! Tourism portal: tourists browse regions and plans, guides publish plans
//! once an administrator has approved their CV.
//!
//! ## Architecture
//!
//! - **domain**: entities, roles, sessions and repository ports
//! - **application**: use cases, the authorization gate and the approval workflow
//! - **infrastructure**: SeaORM persistence, in-memory stores, file storage, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
