//! SeaORM implementation of RegionRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::db_err;
use crate::domain::{DomainResult, Region, RegionRepository};
use crate::infrastructure::database::entities::region;

pub struct SeaOrmRegionRepository {
    db: DatabaseConnection,
}

impl SeaOrmRegionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegionRepository for SeaOrmRegionRepository {
    async fn list_all(&self) -> DomainResult<Vec<Region>> {
        let models = region::Entity::find()
            .order_by_asc(region::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| Region {
                id: m.id,
                name: m.name,
            })
            .collect())
    }
}
