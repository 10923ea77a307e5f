//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod guide_repository;
pub mod notification_repository;
pub mod plan_repository;
pub mod region_repository;
pub mod repository_provider;
pub mod tourist_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

fn db_err(e: DbErr) -> DomainError {
    InfraError::from(e).into()
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
