//! Session and principal types

use chrono::{DateTime, Duration, Utc};

use crate::domain::user::UserRole;

/// Authenticated session held server-side, keyed by the hash of its token.
///
/// Expiry is absolute: activity does not extend it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token_hash: String,
    pub user_id: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token_hash: impl Into<String>,
        user_id: impl Into<String>,
        role: UserRole,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            token_hash: token_hash.into(),
            user_id: user_id.into(),
            role,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn principal(&self) -> Principal {
        Principal::from_parts(&self.user_id, self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouristActor {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideActor {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminActor {
    pub user_id: String,
}

/// The requester behind a session, one variant per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Tourist(TouristActor),
    Guide(GuideActor),
    Admin(AdminActor),
}

impl Principal {
    pub fn from_parts(user_id: &str, role: UserRole) -> Self {
        let user_id = user_id.to_string();
        match role {
            UserRole::Tourist => Self::Tourist(TouristActor { user_id }),
            UserRole::Guide => Self::Guide(GuideActor { user_id }),
            UserRole::Admin => Self::Admin(AdminActor { user_id }),
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::Tourist(a) => &a.user_id,
            Self::Guide(a) => &a.user_id,
            Self::Admin(a) => &a.user_id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Tourist(_) => UserRole::Tourist,
            Self::Guide(_) => UserRole::Guide,
            Self::Admin(_) => UserRole::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_at_absolute_deadline() {
        let s = Session::new("hash", "u-1", UserRole::Guide, Duration::seconds(3600));
        assert!(!s.is_expired());
        assert!(s.is_expired_at(s.created_at + Duration::seconds(3600)));
        assert!(!s.is_expired_at(s.created_at + Duration::seconds(3599)));
    }

    #[test]
    fn principal_matches_session_role() {
        let s = Session::new("hash", "u-7", UserRole::Admin, Duration::minutes(5));
        let p = s.principal();
        assert_eq!(p.role(), UserRole::Admin);
        assert_eq!(p.user_id(), "u-7");
        assert!(matches!(p, Principal::Admin(AdminActor { .. })));
    }
}
