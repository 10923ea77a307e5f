use async_trait::async_trait;

use super::model::Region;
use crate::domain::DomainResult;

#[async_trait]
pub trait RegionRepository: Send + Sync {
    async fn list_all(&self) -> DomainResult<Vec<Region>>;
}
