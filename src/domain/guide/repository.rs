//! Guide profile repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::GuideProfile;
use crate::domain::DomainResult;

#[async_trait]
pub trait GuideProfileRepository: Send + Sync {
    /// Insert the registration-time profile
    async fn create(&self, profile: GuideProfile) -> DomainResult<()>;

    /// Fetch the profile of a guide account
    async fn get(&self, user_id: &str) -> DomainResult<Option<GuideProfile>>;

    /// Set `cv_approved = true` and `approved_at` in one write.
    /// `NotFound` when the guide has no profile.
    async fn set_approved(&self, user_id: &str, approved_at: DateTime<Utc>) -> DomainResult<()>;

    /// Record the storage key of an uploaded CV
    async fn set_cv(&self, user_id: &str, cv_key: &str) -> DomainResult<()>;

    async fn set_subscription(
        &self,
        user_id: &str,
        active: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()>;

    /// Profiles whose CV has not been approved yet
    async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>>;

    async fn count(&self) -> DomainResult<u64>;
    async fn count_pending(&self) -> DomainResult<u64>;
}
