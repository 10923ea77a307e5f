//! Guide area DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{GuideDashboard, GuideProfileView, SubscriptionStatus};
use crate::domain::NewPlan;
use crate::interfaces::http::modules::catalog::PlanDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct GuideDashboardDto {
    pub plan_count: u64,
    /// Latest plans by start date
    pub recent_plans: Vec<PlanDto>,
}

impl From<GuideDashboard> for GuideDashboardDto {
    fn from(d: GuideDashboard) -> Self {
        Self {
            plan_count: d.plan_count,
            recent_plans: d.recent_plans.into_iter().map(PlanDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuideProfileDto {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// Storage key of the uploaded CV
    pub cv: Option<String>,
    pub cv_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub subscription_active: bool,
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

impl From<GuideProfileView> for GuideProfileDto {
    fn from(v: GuideProfileView) -> Self {
        Self {
            user_id: v.user.id,
            full_name: v.user.full_name,
            email: v.user.email,
            phone: v.user.phone,
            bio: v.user.bio,
            cv: v.profile.cv,
            cv_approved: v.profile.cv_approved,
            approved_at: v.profile.approved_at,
            subscription_active: v.profile.subscription_active,
            subscription_expires_at: v.profile.subscription_expires_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 30, message = "phone must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 2000, message = "bio must be at most 2000 characters"))]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CvUploadResponse {
    /// Storage key now recorded on the profile
    pub cv: String,
    /// Always false right after an upload; approval is a separate step
    pub cv_approved: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionDto {
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<SubscriptionStatus> for SubscriptionDto {
    fn from(s: SubscriptionStatus) -> Self {
        Self {
            active: s.active,
            expires_at: s.expires_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    #[schema(example = "Desert Tour")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Price in millimes
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
}

impl From<CreatePlanRequest> for NewPlan {
    fn from(r: CreatePlanRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            price: r.price,
        }
    }
}
