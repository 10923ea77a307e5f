//! SeaORM implementation of PlanRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::{DomainResult, NewPlan, Plan, PlanRepository};
use crate::infrastructure::database::entities::plan;

pub struct SeaOrmPlanRepository {
    db: DatabaseConnection,
}

impl SeaOrmPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn plan_model_to_domain(m: plan::Model) -> Plan {
    Plan {
        id: m.id,
        guide_id: m.guide_id,
        title: m.title,
        description: m.description,
        start_date: m.start_date,
        end_date: m.end_date,
        price: m.price,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PlanRepository for SeaOrmPlanRepository {
    async fn create(&self, owner_id: &str, new_plan: NewPlan) -> DomainResult<Plan> {
        let model = plan::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            guide_id: Set(owner_id.to_string()),
            title: Set(new_plan.title.trim().to_string()),
            description: Set(new_plan.description),
            start_date: Set(new_plan.start_date),
            end_date: Set(new_plan.end_date),
            price: Set(new_plan.price),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        debug!("Guide {} created plan {}", owner_id, inserted.id);
        Ok(plan_model_to_domain(inserted))
    }

    async fn list_by_owner(&self, owner_id: &str) -> DomainResult<Vec<Plan>> {
        let models = plan::Entity::find()
            .filter(plan::Column::GuideId.eq(owner_id))
            .order_by_desc(plan::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(plan_model_to_domain).collect())
    }

    async fn latest_by_owner(&self, owner_id: &str, limit: u64) -> DomainResult<Vec<Plan>> {
        let models = plan::Entity::find()
            .filter(plan::Column::GuideId.eq(owner_id))
            .order_by_desc(plan::Column::StartDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(plan_model_to_domain).collect())
    }

    async fn count_by_owner(&self, owner_id: &str) -> DomainResult<u64> {
        plan::Entity::find()
            .filter(plan::Column::GuideId.eq(owner_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn list_all(&self) -> DomainResult<Vec<Plan>> {
        let models = plan::Entity::find()
            .order_by_asc(plan::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(plan_model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        plan::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
