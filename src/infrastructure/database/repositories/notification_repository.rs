//! SeaORM implementation of NotificationRepository

use async_trait::async_trait;
use log::{debug, warn};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    DomainResult, Notification, NotificationKind, NotificationRepository, NotificationSink,
};
use crate::infrastructure::database::entities::notification;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn notification_model_to_domain(m: notification::Model) -> Option<Notification> {
    let Some(kind) = NotificationKind::from_str(&m.kind) else {
        warn!("Skipping notification {} with unknown kind {}", m.id, m.kind);
        return None;
    };
    Some(Notification {
        id: m.id,
        user_id: m.user_id,
        kind,
        content: m.content,
        is_read: m.is_read,
        created_at: m.created_at,
    })
}

#[async_trait]
impl NotificationSink for SeaOrmNotificationRepository {
    async fn emit(
        &self,
        user_id: &str,
        kind: NotificationKind,
        content: &str,
    ) -> DomainResult<Notification> {
        let n = Notification::new(user_id, kind, content);
        let model = notification::ActiveModel {
            id: Set(n.id.clone()),
            user_id: Set(n.user_id.clone()),
            kind: Set(n.kind.as_str().to_string()),
            content: Set(n.content.clone()),
            is_read: Set(n.is_read),
            created_at: Set(n.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;

        debug!("Notification {} ({}) sent to {}", n.id, n.kind.as_str(), user_id);
        Ok(n)
    }
}

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .filter_map(notification_model_to_domain)
            .collect())
    }
}
