//! Guide area: dashboard, profile, CV, subscription and plans

pub mod service;
pub mod uploads;

pub use service::{
    ContactUpdate, GuideDashboard, GuideProfileView, GuideService, SubscriptionStatus,
    RECENT_PLANS_LIMIT,
};
pub use uploads::{CvDocument, DEFAULT_MAX_CV_BYTES, PDF_CONTENT_TYPE};
