//! SeaORM implementation of GuideProfileRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{DomainError, DomainResult, GuideProfile, GuideProfileRepository};
use crate::infrastructure::database::entities::guide;

pub struct SeaOrmGuideProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmGuideProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn missing(user_id: &str) -> DomainError {
        DomainError::not_found("GuideProfile", "user_id", user_id)
    }
}

fn guide_model_to_domain(m: guide::Model) -> GuideProfile {
    GuideProfile {
        user_id: m.user_id,
        cv: m.cv,
        cv_approved: m.cv_approved,
        approved_at: m.approved_at,
        subscription_active: m.subscription_active,
        subscription_expires_at: m.subscription_expires_at,
    }
}

#[async_trait]
impl GuideProfileRepository for SeaOrmGuideProfileRepository {
    async fn create(&self, profile: GuideProfile) -> DomainResult<()> {
        let model = guide::ActiveModel {
            user_id: Set(profile.user_id.clone()),
            cv: Set(profile.cv),
            cv_approved: Set(profile.cv_approved),
            approved_at: Set(profile.approved_at),
            subscription_active: Set(profile.subscription_active),
            subscription_expires_at: Set(profile.subscription_expires_at),
        };

        model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!(
                    "Guide profile already exists for {}",
                    profile.user_id
                ))
            } else {
                db_err(e)
            }
        })?;

        debug!("Created guide profile for {}", profile.user_id);
        Ok(())
    }

    async fn get(&self, user_id: &str) -> DomainResult<Option<GuideProfile>> {
        let model = guide::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(guide_model_to_domain))
    }

    async fn set_approved(&self, user_id: &str, approved_at: DateTime<Utc>) -> DomainResult<()> {
        // Flag and timestamp go out in a single UPDATE
        let result = guide::Entity::update_many()
            .col_expr(guide::Column::CvApproved, Expr::value(true))
            .col_expr(guide::Column::ApprovedAt, Expr::value(Some(approved_at)))
            .filter(guide::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(Self::missing(user_id));
        }

        info!("Guide {} approved at {}", user_id, approved_at);
        Ok(())
    }

    async fn set_cv(&self, user_id: &str, cv_key: &str) -> DomainResult<()> {
        let existing = guide::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| Self::missing(user_id))?;

        let mut active: guide::ActiveModel = existing.into();
        active.cv = Set(Some(cv_key.to_string()));
        active.update(&self.db).await.map_err(db_err)?;

        debug!("Guide {} CV set to {}", user_id, cv_key);
        Ok(())
    }

    async fn set_subscription(
        &self,
        user_id: &str,
        active_flag: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let existing = guide::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| Self::missing(user_id))?;

        let mut active: guide::ActiveModel = existing.into();
        active.subscription_active = Set(active_flag);
        active.subscription_expires_at = Set(expires_at);
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>> {
        let models = guide::Entity::find()
            .filter(guide::Column::CvApproved.eq(false))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(guide_model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        guide::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn count_pending(&self) -> DomainResult<u64> {
        guide::Entity::find()
            .filter(guide::Column::CvApproved.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
