//! Plan repository interface

use async_trait::async_trait;

use super::model::{NewPlan, Plan};
use crate::domain::DomainResult;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Insert a plan owned by `owner_id`
    async fn create(&self, owner_id: &str, plan: NewPlan) -> DomainResult<Plan>;

    /// All plans of a guide, latest start date first
    async fn list_by_owner(&self, owner_id: &str) -> DomainResult<Vec<Plan>>;

    /// The `limit` plans of a guide with the latest start dates
    async fn latest_by_owner(&self, owner_id: &str, limit: u64) -> DomainResult<Vec<Plan>>;

    async fn count_by_owner(&self, owner_id: &str) -> DomainResult<u64>;

    /// Every published plan
    async fn list_all(&self) -> DomainResult<Vec<Plan>>;

    async fn count(&self) -> DomainResult<u64>;
}
