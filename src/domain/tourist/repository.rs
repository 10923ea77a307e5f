use async_trait::async_trait;

use super::model::TouristProfile;
use crate::domain::DomainResult;

#[async_trait]
pub trait TouristProfileRepository: Send + Sync {
    async fn create(&self, profile: TouristProfile) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
