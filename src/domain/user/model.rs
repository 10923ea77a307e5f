//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// Closed set of account roles. Assigned at registration, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Tourist,
    Guide,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tourist => "TOURIST",
            Self::Guide => "GUIDE",
            Self::Admin => "ADMIN",
        }
    }

    /// Where a freshly logged-in user of this role lands.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Self::Tourist => "/",
            Self::Guide => "/api/v1/guide/dashboard",
            Self::Admin => "/api/v1/admin/dashboard",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOURIST" | "TOURISTE" => Ok(Self::Tourist),
            "GUIDE" => Ok(Self::Guide),
            "ADMIN" => Ok(Self::Admin),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
