//! Admin area DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::{AdminStats, ApprovalOutcome, PendingGuide};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStatsDto {
    pub tourists: u64,
    pub guides: u64,
    pub plans: u64,
    /// Guides with an uploaded CV still waiting for review
    pub pending_cvs: u64,
}

impl From<AdminStats> for AdminStatsDto {
    fn from(s: AdminStats) -> Self {
        Self {
            tourists: s.tourists,
            guides: s.guides,
            plans: s.plans,
            pending_cvs: s.pending_cvs,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingGuideDto {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub cv: Option<String>,
}

impl From<PendingGuide> for PendingGuideDto {
    fn from(g: PendingGuide) -> Self {
        Self {
            user_id: g.user_id,
            full_name: g.full_name,
            email: g.email,
            cv: g.cv,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApprovalDto {
    pub guide_id: String,
    pub approved_at: DateTime<Utc>,
    /// False when the approval was saved but the guide could not be notified
    pub notified: bool,
}

impl From<ApprovalOutcome> for ApprovalDto {
    fn from(o: ApprovalOutcome) -> Self {
        Self {
            notified: o.notification.is_delivered(),
            guide_id: o.guide_id,
            approved_at: o.approved_at,
        }
    }
}
