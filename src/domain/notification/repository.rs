use async_trait::async_trait;

use super::model::{Notification, NotificationKind};
use crate::domain::DomainResult;

/// Write side used by workflows that notify users.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(
        &self,
        user_id: &str,
        kind: NotificationKind,
        content: &str,
    ) -> DomainResult<Notification>;
}

#[async_trait]
pub trait NotificationRepository: NotificationSink {
    /// Notifications of a user, newest first
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Notification>>;
}
