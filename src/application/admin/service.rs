//! Administrator use cases: statistics, pending CVs, approval

use std::sync::Arc;

use tracing::warn;

use crate::application::approval::{ApprovalOutcome, ApprovalWorkflow};
use crate::domain::{AdminActor, DomainResult, RepositoryProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub tourists: u64,
    pub guides: u64,
    pub plans: u64,
    pub pending_cvs: u64,
}

/// Guide waiting for CV review
#[derive(Debug, Clone)]
pub struct PendingGuide {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub cv: Option<String>,
}

pub struct AdminService {
    repos: Arc<dyn RepositoryProvider>,
    approvals: ApprovalWorkflow,
}

impl AdminService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            approvals: ApprovalWorkflow::new(repos.clone()),
            repos,
        }
    }

    /// Platform counters. A storage failure shows zeros instead of an error page.
    pub async fn dashboard(&self, admin: &AdminActor) -> AdminStats {
        match self.collect_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(admin_id = %admin.user_id, error = %e, "Admin statistics unavailable");
                AdminStats::default()
            }
        }
    }

    async fn collect_stats(&self) -> DomainResult<AdminStats> {
        Ok(AdminStats {
            tourists: self.repos.tourists().count().await?,
            guides: self.repos.guides().count().await?,
            plans: self.repos.plans().count().await?,
            pending_cvs: self.repos.guides().count_pending().await?,
        })
    }

    /// Guides awaiting review. Like the dashboard, a storage failure yields an
    /// empty list.
    pub async fn pending_guides(&self, admin: &AdminActor) -> Vec<PendingGuide> {
        match self.collect_pending().await {
            Ok(pending) => pending,
            Err(e) => {
                warn!(admin_id = %admin.user_id, error = %e, "Pending CV list unavailable");
                Vec::new()
            }
        }
    }

    async fn collect_pending(&self) -> DomainResult<Vec<PendingGuide>> {
        let profiles = self.repos.guides().list_pending().await?;

        let mut pending = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let Some(user) = self.repos.users().find_by_id(&profile.user_id).await? else {
                warn!(user_id = %profile.user_id, "Guide profile without user account");
                continue;
            };
            pending.push(PendingGuide {
                user_id: profile.user_id,
                full_name: user.full_name,
                email: user.email,
                cv: profile.cv,
            });
        }
        pending.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(pending)
    }

    pub async fn approve(&self, admin: &AdminActor, guide_id: &str) -> DomainResult<ApprovalOutcome> {
        self.approvals.approve(admin, guide_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use chrono::{DateTime, Utc};

    use crate::domain::{
        DomainError, GuideProfile, GuideProfileRepository, NewPlan, NewUser, Plan,
        PlanRepository, UserRole,
    };
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct OfflinePlans;

    #[async_trait]
    impl PlanRepository for OfflinePlans {
        async fn create(&self, _: &str, _: NewPlan) -> DomainResult<Plan> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn list_by_owner(&self, _: &str) -> DomainResult<Vec<Plan>> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn latest_by_owner(&self, _: &str, _: u64) -> DomainResult<Vec<Plan>> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn count_by_owner(&self, _: &str) -> DomainResult<u64> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn list_all(&self) -> DomainResult<Vec<Plan>> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn count(&self) -> DomainResult<u64> {
            Err(DomainError::Storage("offline".into()))
        }
    }

    struct OfflineGuides;

    #[async_trait]
    impl GuideProfileRepository for OfflineGuides {
        async fn create(&self, _: GuideProfile) -> DomainResult<()> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn get(&self, _: &str) -> DomainResult<Option<GuideProfile>> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn set_approved(&self, _: &str, _: DateTime<Utc>) -> DomainResult<()> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn set_cv(&self, _: &str, _: &str) -> DomainResult<()> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn set_subscription(
            &self,
            _: &str,
            _: bool,
            _: Option<DateTime<Utc>>,
        ) -> DomainResult<()> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn count(&self) -> DomainResult<u64> {
            Err(DomainError::Storage("offline".into()))
        }
        async fn count_pending(&self) -> DomainResult<u64> {
            Err(DomainError::Storage("offline".into()))
        }
    }

    fn admin() -> AdminActor {
        AdminActor {
            user_id: "admin-1".into(),
        }
    }

    async fn add_guide(repos: &InMemoryRepositoryProvider, name: &str, email: &str) -> String {
        let user = repos
            .users()
            .create(NewUser {
                full_name: name.into(),
                email: email.into(),
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
        user.id
    }

    #[tokio::test]
    async fn pending_list_shows_names_and_drops_approved() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let hedi = add_guide(&repos, "Hedi Karray", "hedi@example.tn").await;
        add_guide(&repos, "Amel Jaziri", "amel@example.tn").await;
        let service = AdminService::new(repos.clone());

        service.approve(&admin(), &hedi).await.unwrap();

        let pending = service.pending_guides(&admin()).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].full_name, "Amel Jaziri");
        assert!(pending[0].cv.is_none());
    }

    #[tokio::test]
    async fn dashboard_counts_everything() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let g = add_guide(&repos, "Hedi Karray", "hedi@example.tn").await;
        add_guide(&repos, "Amel Jaziri", "amel@example.tn").await;
        repos
            .plans()
            .create(
                &g,
                NewPlan {
                    title: "Cap Bon".into(),
                    description: String::new(),
                    start_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
                    price: 0,
                },
            )
            .await
            .unwrap();
        let service = AdminService::new(repos.clone());
        service.approve(&admin(), &g).await.unwrap();

        let stats = service.dashboard(&admin()).await;
        assert_eq!(
            stats,
            AdminStats {
                tourists: 0,
                guides: 2,
                plans: 1,
                pending_cvs: 1
            }
        );
    }

    #[tokio::test]
    async fn dashboard_degrades_to_zeros_on_storage_failure() {
        let repos = InMemoryRepositoryProvider::new().with_plans(Arc::new(OfflinePlans));
        add_guide(&repos, "Hedi Karray", "hedi@example.tn").await;
        let service = AdminService::new(Arc::new(repos));

        assert_eq!(service.dashboard(&admin()).await, AdminStats::default());
    }

    #[tokio::test]
    async fn pending_list_is_empty_on_storage_failure() {
        let repos = InMemoryRepositoryProvider::new().with_guides(Arc::new(OfflineGuides));
        let service = AdminService::new(Arc::new(repos));

        assert!(service.pending_guides(&admin()).await.is_empty());
    }
}
