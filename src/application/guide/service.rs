//! Guide area use cases
//!
//! Plan operations take an [`ApprovedGuide`], which only the authorization
//! gate hands out. Everything else needs a plain guide session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::uploads::CvDocument;
use crate::application::gate::ApprovedGuide;
use crate::domain::{
    DocumentStore, DomainError, DomainResult, GuideActor, GuideProfile, NewPlan, Plan,
    RepositoryProvider, User,
};

/// Number of plans shown on the guide dashboard
pub const RECENT_PLANS_LIMIT: u64 = 5;

#[derive(Debug, Clone)]
pub struct GuideDashboard {
    pub plan_count: u64,
    pub recent_plans: Vec<Plan>,
}

#[derive(Debug, Clone)]
pub struct GuideProfileView {
    pub user: User,
    pub profile: GuideProfile,
}

#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionStatus {
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

pub struct GuideService {
    repos: Arc<dyn RepositoryProvider>,
    documents: Arc<dyn DocumentStore>,
    max_cv_bytes: usize,
}

impl GuideService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        documents: Arc<dyn DocumentStore>,
        max_cv_bytes: usize,
    ) -> Self {
        Self {
            repos,
            documents,
            max_cv_bytes,
        }
    }

    pub fn max_cv_bytes(&self) -> usize {
        self.max_cv_bytes
    }

    async fn guide_profile(&self, guide: &GuideActor) -> DomainResult<GuideProfile> {
        self.repos
            .guides()
            .get(&guide.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("GuideProfile", "user_id", &guide.user_id))
    }

    pub async fn dashboard(&self, guide: &GuideActor) -> DomainResult<GuideDashboard> {
        let plans = self.repos.plans();
        Ok(GuideDashboard {
            plan_count: plans.count_by_owner(&guide.user_id).await?,
            recent_plans: plans
                .latest_by_owner(&guide.user_id, RECENT_PLANS_LIMIT)
                .await?,
        })
    }

    pub async fn profile(&self, guide: &GuideActor) -> DomainResult<GuideProfileView> {
        let user = self
            .repos
            .users()
            .find_by_id(&guide.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", &guide.user_id))?;
        let profile = self.guide_profile(guide).await?;
        Ok(GuideProfileView { user, profile })
    }

    pub async fn update_profile(
        &self,
        guide: &GuideActor,
        update: ContactUpdate,
    ) -> DomainResult<GuideProfileView> {
        let blank_to_none = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.repos
            .users()
            .update_contact(
                &guide.user_id,
                blank_to_none(update.phone),
                blank_to_none(update.bio),
            )
            .await?;
        self.profile(guide).await
    }

    /// Store a CV and point the profile at it. Approval state is untouched.
    pub async fn upload_cv(&self, guide: &GuideActor, cv: CvDocument) -> DomainResult<String> {
        cv.validate(self.max_cv_bytes)?;
        // Make sure there is a profile to attach to before writing the file
        self.guide_profile(guide).await?;

        let key = cv.storage_key(&guide.user_id, Utc::now().timestamp_millis());
        self.documents.put(&key, &cv.bytes).await?;
        self.repos.guides().set_cv(&guide.user_id, &key).await?;

        info!(guide_id = %guide.user_id, key = %key, size = cv.bytes.len(), "CV uploaded");
        Ok(key)
    }

    pub async fn subscription(&self, guide: &GuideActor) -> DomainResult<SubscriptionStatus> {
        let profile = self.guide_profile(guide).await?;
        Ok(SubscriptionStatus {
            active: profile.subscription_active,
            expires_at: profile.subscription_expires_at,
        })
    }

    /// Payment is not collected; activation always succeeds.
    pub async fn activate_subscription(
        &self,
        guide: &GuideActor,
    ) -> DomainResult<SubscriptionStatus> {
        let mut profile = self.guide_profile(guide).await?;
        profile.activate_subscription(Utc::now());
        self.repos
            .guides()
            .set_subscription(
                &guide.user_id,
                profile.subscription_active,
                profile.subscription_expires_at,
            )
            .await?;

        info!(guide_id = %guide.user_id, "Subscription activated");
        Ok(SubscriptionStatus {
            active: profile.subscription_active,
            expires_at: profile.subscription_expires_at,
        })
    }

    pub async fn list_plans(&self, guide: &ApprovedGuide) -> DomainResult<Vec<Plan>> {
        self.repos.plans().list_by_owner(guide.user_id()).await
    }

    pub async fn create_plan(&self, guide: &ApprovedGuide, plan: NewPlan) -> DomainResult<Plan> {
        plan.validate()?;
        let plan = self.repos.plans().create(guide.user_id(), plan).await?;
        info!(guide_id = %guide.user_id(), plan_id = %plan.id, title = %plan.title, "Plan created");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    use crate::application::gate::{AuthorizationGate, GatePolicy};
    use crate::domain::{NewUser, Session, UserRole};
    use crate::infrastructure::storage::{InMemoryDocumentStore, InMemoryRepositoryProvider};

    struct Fixture {
        service: GuideService,
        repos: Arc<InMemoryRepositoryProvider>,
        documents: Arc<InMemoryDocumentStore>,
        guide: GuideActor,
    }

    async fn fixture() -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let user = repos
            .users()
            .create(NewUser {
                full_name: "Leila Mansour".into(),
                email: "leila@example.tn".into(),
                password_hash: "hash".into(),
                role: UserRole::Guide,
            })
            .await
            .unwrap();
        repos
            .guides()
            .create(GuideProfile::new(user.id.clone()))
            .await
            .unwrap();

        let documents = Arc::new(InMemoryDocumentStore::new());
        let service = GuideService::new(repos.clone(), documents.clone(), 1024);
        Fixture {
            service,
            repos,
            documents,
            guide: GuideActor { user_id: user.id },
        }
    }

    async fn approved(f: &Fixture) -> ApprovedGuide {
        f.repos
            .guides()
            .set_approved(&f.guide.user_id, Utc::now())
            .await
            .unwrap();
        let gate = AuthorizationGate::new(f.repos.clone());
        let session = Session::new("h", f.guide.user_id.clone(), UserRole::Guide, Duration::hours(1));
        gate.authorize(Some(&session), &GatePolicy::CREATE_PLAN)
            .await
            .unwrap()
            .approved_guide
            .unwrap()
    }

    fn pdf() -> CvDocument {
        CvDocument {
            file_name: "cv.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.7 resume".to_vec(),
        }
    }

    fn plan(title: &str, day: u32) -> NewPlan {
        NewPlan {
            title: title.into(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, day + 2).unwrap(),
            price: 120_000,
        }
    }

    #[tokio::test]
    async fn cv_upload_attaches_key_without_approving() {
        let f = fixture().await;
        let key = f.service.upload_cv(&f.guide, pdf()).await.unwrap();

        assert!(key.ends_with(&format!("-{}-cv.pdf", f.guide.user_id)));
        assert!(f.documents.contains(&key));
        let profile = f.repos.guides().get(&f.guide.user_id).await.unwrap().unwrap();
        assert_eq!(profile.cv.as_deref(), Some(key.as_str()));
        assert!(!profile.cv_approved);
    }

    #[tokio::test]
    async fn rejected_upload_stores_nothing() {
        let f = fixture().await;
        let mut cv = pdf();
        cv.bytes = vec![0u8; 2048];
        let err = f.service.upload_cv(&f.guide, cv).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(f.documents.is_empty());
        let profile = f.repos.guides().get(&f.guide.user_id).await.unwrap().unwrap();
        assert!(profile.cv.is_none());
    }

    #[tokio::test]
    async fn subscription_activation_leaves_approval_alone() {
        let f = fixture().await;
        let before = Utc::now();
        let status = f.service.activate_subscription(&f.guide).await.unwrap();

        assert!(status.active);
        let expires = status.expires_at.unwrap();
        assert!(expires >= before + Duration::days(28));
        assert!(expires <= Utc::now() + Duration::days(31));

        let profile = f.repos.guides().get(&f.guide.user_id).await.unwrap().unwrap();
        assert!(!profile.cv_approved);
        assert_eq!(f.service.subscription(&f.guide).await.unwrap(), status);
    }

    #[tokio::test]
    async fn approved_guide_creates_and_lists_plans() {
        let f = fixture().await;
        let proof = approved(&f).await;

        let created = f.service.create_plan(&proof, plan("Desert Tour", 3)).await.unwrap();
        assert_eq!(created.guide_id, f.guide.user_id);
        f.service.create_plan(&proof, plan("Medina Walk", 10)).await.unwrap();

        let plans = f.service.list_plans(&proof).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].title, "Medina Walk");
    }

    #[tokio::test]
    async fn invalid_plan_is_rejected_before_storage() {
        let f = fixture().await;
        let proof = approved(&f).await;
        let mut bad = plan("Desert Tour", 10);
        bad.end_date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();

        let err = f.service.create_plan(&proof, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(f.repos.plans().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dashboard_shows_five_latest_plans() {
        let f = fixture().await;
        let proof = approved(&f).await;
        for day in 1..=7 {
            f.service
                .create_plan(&proof, plan(&format!("Plan {day}"), day))
                .await
                .unwrap();
        }

        let dashboard = f.service.dashboard(&f.guide).await.unwrap();
        assert_eq!(dashboard.plan_count, 7);
        assert_eq!(dashboard.recent_plans.len(), RECENT_PLANS_LIMIT as usize);
        assert_eq!(dashboard.recent_plans[0].title, "Plan 7");
    }

    #[tokio::test]
    async fn profile_update_sets_contact_fields() {
        let f = fixture().await;
        let view = f
            .service
            .update_profile(
                &f.guide,
                ContactUpdate {
                    phone: Some("+216 20 000 000".into()),
                    bio: Some("   ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(view.user.phone.as_deref(), Some("+216 20 000 000"));
        assert!(view.user.bio.is_none());
    }
}
