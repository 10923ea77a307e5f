//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::guide::GuideProfileRepository;
use super::notification::NotificationRepository;
use super::plan::PlanRepository;
use super::region::RegionRepository;
use super::tourist::TouristProfileRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let profile = repos.guides().get("guide-id").await?;
///     let plans = repos.plans().list_by_owner("guide-id").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn guides(&self) -> &dyn GuideProfileRepository;
    fn tourists(&self) -> &dyn TouristProfileRepository;
    fn plans(&self) -> &dyn PlanRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn regions(&self) -> &dyn RegionRepository;
}
