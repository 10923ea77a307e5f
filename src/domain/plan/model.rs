//! Plan domain entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::shared::errors::DomainError;

/// Tourism plan owned by one guide.
///
/// `price` is stored in millimes (1 TND = 1000 millimes).
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: String,
    pub guide_id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Plan fields supplied by the guide
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: i64,
}

impl NewPlan {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Plan title is required".into()));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(
                "Plan end date must not be before its start date".into(),
            ));
        }
        if self.price < 0 {
            return Err(DomainError::Validation("Plan price must not be negative".into()));
        }
        Ok(())
    }
}

impl Plan {
    pub fn from_new(id: impl Into<String>, guide_id: impl Into<String>, new: NewPlan) -> Self {
        Self {
            id: id.into(),
            guide_id: guide_id.into(),
            title: new.title.trim().to_string(),
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            price: new.price,
            created_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
