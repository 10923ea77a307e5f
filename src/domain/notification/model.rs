use chrono::{DateTime, Utc};

/// Notification type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// CV moderation outcome
    Cv,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cv => "CV",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CV" => Some(Self::Cv),
            _ => None,
        }
    }
}

/// Event directed at a single user
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: impl Into<String>, kind: NotificationKind, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            kind,
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
