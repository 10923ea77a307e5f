//! SeaORM implementation of TouristProfileRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::db_err;
use crate::domain::{DomainResult, TouristProfile, TouristProfileRepository};
use crate::infrastructure::database::entities::tourist;

pub struct SeaOrmTouristProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmTouristProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TouristProfileRepository for SeaOrmTouristProfileRepository {
    async fn create(&self, profile: TouristProfile) -> DomainResult<()> {
        let model = tourist::ActiveModel {
            user_id: Set(profile.user_id),
            nationality: Set(profile.nationality),
            phone: Set(profile.phone),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        tourist::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
