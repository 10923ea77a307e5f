//! Public region list and the tourist plan catalog

use std::sync::Arc;

use crate::domain::{DomainResult, Plan, Region, RepositoryProvider, TouristActor};

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn regions(&self) -> DomainResult<Vec<Region>> {
        self.repos.regions().list_all().await
    }

    /// Every published plan, earliest start first
    pub async fn all_plans(&self, _tourist: &TouristActor) -> DomainResult<Vec<Plan>> {
        self.repos.plans().list_all().await
    }
}
