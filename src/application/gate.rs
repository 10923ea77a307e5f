//! Authorization gate
//!
//! One decision function parameterized by a [`GatePolicy`]: required role
//! plus an optional guide-profile predicate. The gate never writes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    DomainError, DomainResult, GuideActor, Principal, RepositoryProvider, Session, UserRole,
};

/// Rejection message for guides whose CV has not been approved yet.
pub const NOT_APPROVED_MESSAGE: &str =
    "Your CV must be approved by an administrator before you can create plans";

/// Extra condition on the requester's guide profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRequirement {
    None,
    ApprovedCv,
}

/// Named authorization rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    pub name: &'static str,
    /// `None` admits any authenticated role
    pub role: Option<UserRole>,
    pub profile: ProfileRequirement,
}

impl GatePolicy {
    pub const CREATE_PLAN: Self = Self {
        name: "create_plan",
        role: Some(UserRole::Guide),
        profile: ProfileRequirement::ApprovedCv,
    };

    pub const GUIDE_PLANS: Self = Self {
        name: "guide_plans",
        role: Some(UserRole::Guide),
        profile: ProfileRequirement::ApprovedCv,
    };

    pub const GUIDE_AREA: Self = Self {
        name: "guide_area",
        role: Some(UserRole::Guide),
        profile: ProfileRequirement::None,
    };

    pub const ADMIN_AREA: Self = Self {
        name: "admin_area",
        role: Some(UserRole::Admin),
        profile: ProfileRequirement::None,
    };

    pub const TOURIST_AREA: Self = Self {
        name: "tourist_area",
        role: Some(UserRole::Tourist),
        profile: ProfileRequirement::None,
    };

    pub const AUTHENTICATED: Self = Self {
        name: "authenticated",
        role: None,
        profile: ProfileRequirement::None,
    };
}

/// Proof that a guide passed the approved-CV check.
///
/// Only the gate can build one, so plan operations that take it cannot be
/// reached by an unapproved guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedGuide {
    user_id: String,
}

impl ApprovedGuide {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn actor(&self) -> GuideActor {
        GuideActor {
            user_id: self.user_id.clone(),
        }
    }
}

/// What an allowed request carries into the gated handler
#[derive(Debug, Clone)]
pub struct Clearance {
    pub principal: Principal,
    pub approved_guide: Option<ApprovedGuide>,
}

pub struct AuthorizationGate {
    repos: Arc<dyn RepositoryProvider>,
}

impl AuthorizationGate {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn authorize(
        &self,
        session: Option<&Session>,
        policy: &GatePolicy,
    ) -> DomainResult<Clearance> {
        let decision = self.decide(session, policy).await;

        let outcome = match &decision {
            Ok(_) => "allowed",
            Err(DomainError::Unauthenticated) => "unauthenticated",
            Err(DomainError::WrongRole { .. }) => "wrong_role",
            Err(DomainError::NotApproved(_)) => "not_approved",
            Err(_) => "error",
        };
        metrics::counter!("gate_decisions_total", "policy" => policy.name, "outcome" => outcome)
            .increment(1);

        decision
    }

    async fn decide(
        &self,
        session: Option<&Session>,
        policy: &GatePolicy,
    ) -> DomainResult<Clearance> {
        let session = match session {
            Some(s) if !s.is_expired() => s,
            _ => return Err(DomainError::Unauthenticated),
        };

        if let Some(required) = policy.role {
            if session.role != required {
                debug!(
                    policy = policy.name,
                    user_id = %session.user_id,
                    role = %session.role,
                    "Gate: role mismatch"
                );
                return Err(DomainError::WrongRole {
                    required: required.as_str(),
                    actual: session.role.as_str(),
                });
            }
        }

        let principal = session.principal();

        let approved_guide = match policy.profile {
            ProfileRequirement::None => None,
            ProfileRequirement::ApprovedCv => Some(self.approved_guide(&session.user_id).await?),
        };

        Ok(Clearance {
            principal,
            approved_guide,
        })
    }

    async fn approved_guide(&self, user_id: &str) -> DomainResult<ApprovedGuide> {
        let profile = self.repos.guides().get(user_id).await.map_err(|e| {
            warn!(user_id = %user_id, error = %e, "Gate: guide profile lookup failed");
            e
        })?;

        match profile {
            // An approval without its timestamp is not trusted
            Some(p) if p.cv_approved && p.approved_at.is_some() => Ok(ApprovedGuide {
                user_id: p.user_id,
            }),
            // An orphaned guide account without a profile is treated as unapproved
            _ => Err(DomainError::NotApproved(NOT_APPROVED_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use crate::domain::{GuideProfile, GuideProfileRepository};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct UnreachableGuides;

    #[async_trait]
    impl GuideProfileRepository for UnreachableGuides {
        async fn create(&self, _: GuideProfile) -> DomainResult<()> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn get(&self, _: &str) -> DomainResult<Option<GuideProfile>> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn set_approved(&self, _: &str, _: DateTime<Utc>) -> DomainResult<()> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn set_cv(&self, _: &str, _: &str) -> DomainResult<()> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn set_subscription(
            &self,
            _: &str,
            _: bool,
            _: Option<DateTime<Utc>>,
        ) -> DomainResult<()> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn count(&self) -> DomainResult<u64> {
            Err(DomainError::Storage("database is locked".into()))
        }
        async fn count_pending(&self) -> DomainResult<u64> {
            Err(DomainError::Storage("database is locked".into()))
        }
    }

    fn session(user_id: &str, role: UserRole) -> Session {
        Session::new("hash", user_id, role, Duration::hours(1))
    }

    async fn gate_with_guide(approved: bool) -> AuthorizationGate {
        let repos = InMemoryRepositoryProvider::new();
        repos.guides().create(GuideProfile::new("g-1")).await.unwrap();
        if approved {
            repos.guides().set_approved("g-1", Utc::now()).await.unwrap();
        }
        AuthorizationGate::new(Arc::new(repos))
    }

    #[tokio::test]
    async fn missing_session_is_unauthenticated() {
        let gate = gate_with_guide(true).await;
        let err = gate.authorize(None, &GatePolicy::GUIDE_AREA).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn expired_session_is_unauthenticated() {
        let gate = gate_with_guide(true).await;
        let mut s = session("g-1", UserRole::Guide);
        s.expires_at = Utc::now() - Duration::seconds(1);
        let err = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn tourist_in_guide_area_is_wrong_role() {
        let gate = gate_with_guide(true).await;
        let s = session("t-1", UserRole::Tourist);
        let err = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::WrongRole {
                required: "GUIDE",
                actual: "TOURIST"
            }
        ));
        assert!(err.redirects_to_login());
    }

    #[tokio::test]
    async fn unapproved_guide_cannot_create_plans() {
        let gate = gate_with_guide(false).await;
        let s = session("g-1", UserRole::Guide);
        let err = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap_err();
        match err {
            DomainError::NotApproved(msg) => assert_eq!(msg, NOT_APPROVED_MESSAGE),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unapproved_guide_still_reaches_guide_area() {
        let gate = gate_with_guide(false).await;
        let s = session("g-1", UserRole::Guide);
        let clearance = gate.authorize(Some(&s), &GatePolicy::GUIDE_AREA).await.unwrap();
        assert!(clearance.approved_guide.is_none());
        assert_eq!(clearance.principal.user_id(), "g-1");
    }

    #[tokio::test]
    async fn guide_without_profile_is_not_approved() {
        let gate = AuthorizationGate::new(Arc::new(InMemoryRepositoryProvider::new()));
        let s = session("orphan", UserRole::Guide);
        let err = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotApproved(_)));
    }

    #[tokio::test]
    async fn approved_guide_is_cleared_with_proof() {
        let gate = gate_with_guide(true).await;
        let s = session("g-1", UserRole::Guide);
        let clearance = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap();
        let proof = clearance.approved_guide.expect("approved guide");
        assert_eq!(proof.user_id(), "g-1");
        assert_eq!(proof.actor().user_id, "g-1");
    }

    #[tokio::test]
    async fn profile_lookup_failure_is_a_storage_error() {
        let repos = InMemoryRepositoryProvider::new().with_guides(Arc::new(UnreachableGuides));
        let gate = AuthorizationGate::new(Arc::new(repos));
        let s = session("g-1", UserRole::Guide);
        let err = gate
            .authorize(Some(&s), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn any_role_passes_the_authenticated_policy() {
        let gate = gate_with_guide(false).await;
        for role in [UserRole::Tourist, UserRole::Guide, UserRole::Admin] {
            let s = session("u-1", role);
            let clearance = gate
                .authorize(Some(&s), &GatePolicy::AUTHENTICATED)
                .await
                .unwrap();
            assert_eq!(clearance.principal.role(), role);
        }
    }
}
