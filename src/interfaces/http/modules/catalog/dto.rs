//! Region and plan DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Plan, Region};

#[derive(Debug, Serialize, ToSchema)]
pub struct RegionDto {
    pub id: i32,
    pub name: String,
}

impl From<Region> for RegionDto {
    fn from(r: Region) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanDto {
    pub id: String,
    pub guide_id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Price in millimes (1 TND = 1000)
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Plan> for PlanDto {
    fn from(p: Plan) -> Self {
        Self {
            id: p.id,
            guide_id: p.guide_id,
            title: p.title,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            price: p.price,
            created_at: p.created_at,
        }
    }
}
