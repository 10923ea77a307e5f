//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    GuideProfileRepository, NotificationRepository, PlanRepository, RegionRepository,
    RepositoryProvider, TouristProfileRepository, UserRepository,
};

use super::guide_repository::SeaOrmGuideProfileRepository;
use super::notification_repository::SeaOrmNotificationRepository;
use super::plan_repository::SeaOrmPlanRepository;
use super::region_repository::SeaOrmRegionRepository;
use super::tourist_repository::SeaOrmTouristProfileRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let profile = repos.guides().get(&guide_id).await?;
/// let plans = repos.plans().list_by_owner(&guide_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    guides: SeaOrmGuideProfileRepository,
    tourists: SeaOrmTouristProfileRepository,
    plans: SeaOrmPlanRepository,
    notifications: SeaOrmNotificationRepository,
    regions: SeaOrmRegionRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            guides: SeaOrmGuideProfileRepository::new(db.clone()),
            tourists: SeaOrmTouristProfileRepository::new(db.clone()),
            plans: SeaOrmPlanRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            regions: SeaOrmRegionRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn guides(&self) -> &dyn GuideProfileRepository {
        &self.guides
    }

    fn tourists(&self) -> &dyn TouristProfileRepository {
        &self.tourists
    }

    fn plans(&self) -> &dyn PlanRepository {
        &self.plans
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn regions(&self) -> &dyn RegionRepository {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use crate::domain::{DomainError, GuideProfile, NewPlan, NewUser, NotificationKind, UserRole};
    use crate::infrastructure::database::migrator::Migrator;

    async fn provider() -> SeaOrmRepositoryProvider {
        // A single connection keeps the in-memory database alive for the test
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    async fn register_guide(repos: &SeaOrmRepositoryProvider, email: &str) -> String {
        let user = repos
            .users()
            .create(NewUser {
                full_name: "Youssef Trabelsi".into(),
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
    async fn regions_are_seeded_by_migration() {
        let repos = provider().await;
        let regions = repos.regions().list_all().await.unwrap();
        assert_eq!(regions.len(), 24);
        assert_eq!(regions[0].name, "Ariana");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repos = provider().await;
        register_guide(&repos, "guide@example.tn").await;
        let err = repos
            .users()
            .create(NewUser {
                full_name: "Other".into(),
                email: "GUIDE@example.tn".into(),
                password_hash: "hash".into(),
                role: UserRole::Tourist,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn approval_writes_flag_and_timestamp() {
        let repos = provider().await;
        let guide_id = register_guide(&repos, "guide@example.tn").await;
        assert_eq!(repos.guides().count_pending().await.unwrap(), 1);

        let at = Utc::now();
        repos.guides().set_approved(&guide_id, at).await.unwrap();

        let profile = repos.guides().get(&guide_id).await.unwrap().unwrap();
        assert!(profile.cv_approved);
        assert!(profile.approved_at.is_some());
        assert_eq!(repos.guides().count_pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn approving_unknown_guide_is_not_found() {
        let repos = provider().await;
        let err = repos
            .guides()
            .set_approved("missing", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn plans_and_notifications_round_trip() {
        let repos = provider().await;
        let guide_id = register_guide(&repos, "guide@example.tn").await;

        let plan = repos
            .plans()
            .create(
                &guide_id,
                NewPlan {
                    title: "Desert Tour".into(),
                    description: "Douz".into(),
                    start_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
                    price: 450_000,
                },
            )
            .await
            .unwrap();
        assert_eq!(plan.guide_id, guide_id);
        assert_eq!(repos.plans().count_by_owner(&guide_id).await.unwrap(), 1);
        assert_eq!(repos.plans().list_all().await.unwrap()[0].price, 450_000);

        repos
            .notifications()
            .emit(&guide_id, NotificationKind::Cv, "Your CV has been approved")
            .await
            .unwrap();
        let inbox = repos.notifications().list_for_user(&guide_id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Cv);
    }
}
