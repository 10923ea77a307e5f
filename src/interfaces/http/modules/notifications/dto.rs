use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Notification;

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationDto {
    pub id: String,
    #[schema(example = "CV")]
    pub kind: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind.as_str().to_string(),
            content: n.content,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}
