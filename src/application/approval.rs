//! Guide CV approval workflow
//!
//! Two steps: the approval write is durable and decides success; the
//! notification that follows is best-effort and only reported.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    AdminActor, DomainResult, Notification, NotificationKind, RepositoryProvider,
};

pub const CV_APPROVED_MESSAGE: &str = "Your CV has been approved";

/// Result of the best-effort notification step
#[derive(Debug, Clone)]
pub enum NotificationDelivery {
    Delivered(Notification),
    Failed(String),
}

impl NotificationDelivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub guide_id: String,
    pub approved_at: DateTime<Utc>,
    pub notification: NotificationDelivery,
}

pub struct ApprovalWorkflow {
    repos: Arc<dyn RepositoryProvider>,
}

impl ApprovalWorkflow {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Approve a guide's CV. Re-approving is allowed: the timestamp moves
    /// forward and the guide is notified again.
    pub async fn approve(&self, admin: &AdminActor, guide_id: &str) -> DomainResult<ApprovalOutcome> {
        let approved_at = self.commit_approval(guide_id).await?;

        info!(
            admin_id = %admin.user_id,
            guide_id = %guide_id,
            approved_at = %approved_at,
            "Guide CV approved"
        );
        metrics::counter!("guide_approvals_total").increment(1);

        let notification = self.notify_guide(guide_id).await;

        Ok(ApprovalOutcome {
            guide_id: guide_id.to_string(),
            approved_at,
            notification,
        })
    }

    async fn commit_approval(&self, guide_id: &str) -> DomainResult<DateTime<Utc>> {
        let approved_at = Utc::now();
        self.repos.guides().set_approved(guide_id, approved_at).await?;
        Ok(approved_at)
    }

    async fn notify_guide(&self, guide_id: &str) -> NotificationDelivery {
        match self
            .repos
            .notifications()
            .emit(guide_id, NotificationKind::Cv, CV_APPROVED_MESSAGE)
            .await
        {
            Ok(n) => NotificationDelivery::Delivered(n),
            Err(e) => {
                warn!(guide_id = %guide_id, error = %e, "Approval notification not sent");
                metrics::counter!("approval_notifications_failed_total").increment(1);
                NotificationDelivery::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::{
        DomainError, GuideProfile, GuideProfileRepository, NotificationRepository,
        NotificationSink,
    };
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct DroppedNotifications;

    #[async_trait]
    impl NotificationSink for DroppedNotifications {
        async fn emit(
            &self,
            _: &str,
            _: NotificationKind,
            _: &str,
        ) -> DomainResult<Notification> {
            Err(DomainError::Storage("notifications table unavailable".into()))
        }
    }

    #[async_trait]
    impl NotificationRepository for DroppedNotifications {
        async fn list_for_user(&self, _: &str) -> DomainResult<Vec<Notification>> {
            Ok(Vec::new())
        }
    }

    /// Profiles can be read but every write fails
    struct ReadOnlyGuides;

    #[async_trait]
    impl GuideProfileRepository for ReadOnlyGuides {
        async fn create(&self, _: GuideProfile) -> DomainResult<()> {
            Err(DomainError::Storage("attempt to write a readonly database".into()))
        }
        async fn get(&self, user_id: &str) -> DomainResult<Option<GuideProfile>> {
            Ok(Some(GuideProfile::new(user_id)))
        }
        async fn set_approved(&self, _: &str, _: DateTime<Utc>) -> DomainResult<()> {
            Err(DomainError::Storage("attempt to write a readonly database".into()))
        }
        async fn set_cv(&self, _: &str, _: &str) -> DomainResult<()> {
            Err(DomainError::Storage("attempt to write a readonly database".into()))
        }
        async fn set_subscription(
            &self,
            _: &str,
            _: bool,
            _: Option<DateTime<Utc>>,
        ) -> DomainResult<()> {
            Err(DomainError::Storage("attempt to write a readonly database".into()))
        }
        async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>> {
            Ok(Vec::new())
        }
        async fn count(&self) -> DomainResult<u64> {
            Ok(1)
        }
        async fn count_pending(&self) -> DomainResult<u64> {
            Ok(1)
        }
    }

    fn admin() -> AdminActor {
        AdminActor {
            user_id: "admin-1".into(),
        }
    }

    async fn repos_with_guide(repos: InMemoryRepositoryProvider) -> Arc<InMemoryRepositoryProvider> {
        repos.guides().create(GuideProfile::new("g-1")).await.unwrap();
        Arc::new(repos)
    }

    #[tokio::test]
    async fn approval_sets_flag_timestamp_and_notifies() {
        let repos = repos_with_guide(InMemoryRepositoryProvider::new()).await;
        let workflow = ApprovalWorkflow::new(repos.clone());

        let outcome = workflow.approve(&admin(), "g-1").await.unwrap();

        let profile = repos.guides().get("g-1").await.unwrap().unwrap();
        assert!(profile.cv_approved);
        assert_eq!(profile.approved_at, Some(outcome.approved_at));

        let inbox = repos.notifications().list_for_user("g-1").await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Cv);
        assert_eq!(inbox[0].content, CV_APPROVED_MESSAGE);
        assert!(!inbox[0].is_read);
        assert!(outcome.notification.is_delivered());
    }

    #[tokio::test]
    async fn approval_is_idempotent() {
        let repos = repos_with_guide(InMemoryRepositoryProvider::new()).await;
        let workflow = ApprovalWorkflow::new(repos.clone());

        let first = workflow.approve(&admin(), "g-1").await.unwrap();
        let second = workflow.approve(&admin(), "g-1").await.unwrap();

        assert!(second.approved_at >= first.approved_at);
        let profile = repos.guides().get("g-1").await.unwrap().unwrap();
        assert!(profile.cv_approved);
        assert_eq!(profile.approved_at, Some(second.approved_at));
        assert_eq!(repos.notifications().list_for_user("g-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn notification_failure_keeps_the_approval() {
        let repos = repos_with_guide(
            InMemoryRepositoryProvider::new().with_notifications(Arc::new(DroppedNotifications)),
        )
        .await;
        let workflow = ApprovalWorkflow::new(repos.clone());

        let outcome = workflow.approve(&admin(), "g-1").await.unwrap();

        assert!(matches!(outcome.notification, NotificationDelivery::Failed(_)));
        let profile = repos.guides().get("g-1").await.unwrap().unwrap();
        assert!(profile.cv_approved);
        assert!(profile.approved_at.is_some());
    }

    #[tokio::test]
    async fn unknown_guide_is_not_found_and_nobody_is_notified() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let workflow = ApprovalWorkflow::new(repos.clone());

        let err = workflow.approve(&admin(), "ghost").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(repos.notifications().list_for_user("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_approval_write_stops_before_notifying() {
        let repos = Arc::new(InMemoryRepositoryProvider::new().with_guides(Arc::new(ReadOnlyGuides)));
        let workflow = ApprovalWorkflow::new(repos.clone());

        let err = workflow.approve(&admin(), "g-1").await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        let profile = repos.guides().get("g-1").await.unwrap().unwrap();
        assert!(!profile.cv_approved);
        assert!(repos.notifications().list_for_user("g-1").await.unwrap().is_empty());
    }
}
