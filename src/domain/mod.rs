pub mod document;
pub mod guide;
pub mod notification;
pub mod plan;
pub mod region;
pub mod repositories;
pub mod session;
pub mod tourist;
pub mod user;

// Re-export commonly used types
pub use document::DocumentStore;
pub use guide::{GuideProfile, GuideProfileRepository};
pub use notification::{Notification, NotificationKind, NotificationRepository, NotificationSink};
pub use plan::{NewPlan, Plan, PlanRepository};
pub use region::{Region, RegionRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use session::{AdminActor, GuideActor, Principal, Session, SessionStore, TouristActor};
pub use tourist::{TouristProfile, TouristProfileRepository};
pub use user::{NewUser, User, UserRepository, UserRole};

pub use crate::shared::errors::DomainError;
