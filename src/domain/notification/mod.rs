//! Notification aggregate

pub mod model;
pub mod repository;

pub use model::{Notification, NotificationKind};
pub use repository::{NotificationRepository, NotificationSink};
