//! Application layer: use cases over the domain ports

pub mod admin;
pub mod approval;
pub mod catalog;
pub mod gate;
pub mod guide;
pub mod identity;

pub use admin::{AdminService, AdminStats, PendingGuide};
pub use approval::{ApprovalOutcome, ApprovalWorkflow, NotificationDelivery, CV_APPROVED_MESSAGE};
pub use catalog::CatalogService;
pub use gate::{
    ApprovedGuide, AuthorizationGate, Clearance, GatePolicy, ProfileRequirement,
    NOT_APPROVED_MESSAGE,
};
pub use guide::{
    ContactUpdate, CvDocument, GuideDashboard, GuideProfileView, GuideService, SubscriptionStatus,
};
pub use identity::{IdentityService, LoginOutcome, Registration};
