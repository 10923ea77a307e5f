//! In-memory storage implementation
//!
//! DashMap-backed repositories for development and testing. Each
//! repository is independent; [`InMemoryRepositoryProvider`] bundles them
//! and lets tests swap any single one for a double.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::region::GOVERNORATES;
use crate::domain::{
    DocumentStore, DomainError, DomainResult, GuideProfile, GuideProfileRepository, NewPlan,
    NewUser, Notification, NotificationKind, NotificationRepository, NotificationSink, Plan,
    PlanRepository, Region, RegionRepository, RepositoryProvider, Session, SessionStore,
    TouristProfile, TouristProfileRepository, User, UserRepository, UserRole,
};

// ── Users ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let email = new_user.email.to_lowercase();
        if self.users.iter().any(|u| u.email == email) {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: new_user.full_name,
            email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            phone: None,
            bio: None,
            is_active: true,
            created_at: Utc::now(),
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn update_contact(
        &self,
        id: &str,
        phone: Option<String>,
        bio: Option<String>,
    ) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        user.phone = phone;
        user.bio = bio;
        Ok(())
    }

    async fn count_by_role(&self, role: UserRole) -> DomainResult<u64> {
        Ok(self.users.iter().filter(|u| u.role == role).count() as u64)
    }
}

// ── Guide profiles ──────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryGuideProfileRepository {
    profiles: DashMap<String, GuideProfile>,
}

impl InMemoryGuideProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, user_id: &str, f: F) -> DomainResult<()>
    where
        F: FnOnce(&mut GuideProfile),
    {
        let mut profile = self
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| DomainError::not_found("GuideProfile", "user_id", user_id))?;
        f(&mut profile);
        Ok(())
    }
}

#[async_trait]
impl GuideProfileRepository for InMemoryGuideProfileRepository {
    async fn create(&self, profile: GuideProfile) -> DomainResult<()> {
        if self.profiles.contains_key(&profile.user_id) {
            return Err(DomainError::Conflict(format!(
                "Guide profile already exists for {}",
                profile.user_id
            )));
        }
        self.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }

    async fn get(&self, user_id: &str) -> DomainResult<Option<GuideProfile>> {
        Ok(self.profiles.get(user_id).map(|p| p.clone()))
    }

    async fn set_approved(&self, user_id: &str, approved_at: DateTime<Utc>) -> DomainResult<()> {
        self.update(user_id, |p| p.approve(approved_at))
    }

    async fn set_cv(&self, user_id: &str, cv_key: &str) -> DomainResult<()> {
        self.update(user_id, |p| p.attach_cv(cv_key))
    }

    async fn set_subscription(
        &self,
        user_id: &str,
        active: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        self.update(user_id, |p| {
            p.subscription_active = active;
            p.subscription_expires_at = expires_at;
        })
    }

    async fn list_pending(&self) -> DomainResult<Vec<GuideProfile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| !p.cv_approved)
            .map(|p| p.value().clone())
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.profiles.len() as u64)
    }

    async fn count_pending(&self) -> DomainResult<u64> {
        Ok(self.profiles.iter().filter(|p| !p.cv_approved).count() as u64)
    }
}

// ── Tourist profiles ────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryTouristProfileRepository {
    profiles: DashMap<String, TouristProfile>,
}

impl InMemoryTouristProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TouristProfileRepository for InMemoryTouristProfileRepository {
    async fn create(&self, profile: TouristProfile) -> DomainResult<()> {
        self.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.profiles.len() as u64)
    }
}

// ── Plans ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: DashMap<String, Plan>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn owned_by(&self, owner_id: &str) -> Vec<Plan> {
        let mut plans: Vec<Plan> = self
            .plans
            .iter()
            .filter(|p| p.guide_id == owner_id)
            .map(|p| p.value().clone())
            .collect();
        plans.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        plans
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn create(&self, owner_id: &str, plan: NewPlan) -> DomainResult<Plan> {
        let plan = Plan::from_new(uuid::Uuid::new_v4().to_string(), owner_id, plan);
        self.plans.insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn list_by_owner(&self, owner_id: &str) -> DomainResult<Vec<Plan>> {
        Ok(self.owned_by(owner_id))
    }

    async fn latest_by_owner(&self, owner_id: &str, limit: u64) -> DomainResult<Vec<Plan>> {
        let mut plans = self.owned_by(owner_id);
        plans.truncate(limit as usize);
        Ok(plans)
    }

    async fn count_by_owner(&self, owner_id: &str) -> DomainResult<u64> {
        Ok(self.plans.iter().filter(|p| p.guide_id == owner_id).count() as u64)
    }

    async fn list_all(&self) -> DomainResult<Vec<Plan>> {
        let mut plans: Vec<Plan> = self.plans.iter().map(|p| p.value().clone()).collect();
        plans.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(plans)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.plans.len() as u64)
    }
}

// ── Notifications ───────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: DashMap<String, Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationRepository {
    async fn emit(
        &self,
        user_id: &str,
        kind: NotificationKind,
        content: &str,
    ) -> DomainResult<Notification> {
        let notification = Notification::new(user_id, kind, content);
        self.notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Notification>> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .map(|n| n.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

// ── Regions ─────────────────────────────────────────────────────

pub struct InMemoryRegionRepository {
    regions: DashMap<i32, Region>,
    counter: AtomicI32,
}

impl InMemoryRegionRepository {
    /// Seeded with the governorate list, like the database migration.
    pub fn new() -> Self {
        let repo = Self {
            regions: DashMap::new(),
            counter: AtomicI32::new(1),
        };
        for name in GOVERNORATES {
            let id = repo.counter.fetch_add(1, Ordering::SeqCst);
            repo.regions.insert(
                id,
                Region {
                    id,
                    name: name.to_string(),
                },
            );
        }
        repo
    }
}

impl Default for InMemoryRegionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegionRepository for InMemoryRegionRepository {
    async fn list_all(&self) -> DomainResult<Vec<Region>> {
        let mut regions: Vec<Region> = self.regions.iter().map(|r| r.value().clone()).collect();
        regions.sort_by_key(|r| r.id);
        Ok(regions)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// Bundle of in-memory repositories.
///
/// ```ignore
/// let repos = InMemoryRepositoryProvider::new()
///     .with_notifications(Arc::new(BrokenNotifications));
/// ```
pub struct InMemoryRepositoryProvider {
    users: Arc<dyn UserRepository>,
    guides: Arc<dyn GuideProfileRepository>,
    tourists: Arc<dyn TouristProfileRepository>,
    plans: Arc<dyn PlanRepository>,
    notifications: Arc<dyn NotificationRepository>,
    regions: Arc<dyn RegionRepository>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            guides: Arc::new(InMemoryGuideProfileRepository::new()),
            tourists: Arc::new(InMemoryTouristProfileRepository::new()),
            plans: Arc::new(InMemoryPlanRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            regions: Arc::new(InMemoryRegionRepository::new()),
        }
    }

    pub fn with_users(mut self, users: Arc<dyn UserRepository>) -> Self {
        self.users = users;
        self
    }

    pub fn with_guides(mut self, guides: Arc<dyn GuideProfileRepository>) -> Self {
        self.guides = guides;
        self
    }

    pub fn with_plans(mut self, plans: Arc<dyn PlanRepository>) -> Self {
        self.plans = plans;
        self
    }

    pub fn with_notifications(mut self, notifications: Arc<dyn NotificationRepository>) -> Self {
        self.notifications = notifications;
        self
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    fn guides(&self) -> &dyn GuideProfileRepository {
        self.guides.as_ref()
    }

    fn tourists(&self) -> &dyn TouristProfileRepository {
        self.tourists.as_ref()
    }

    fn plans(&self) -> &dyn PlanRepository {
        self.plans.as_ref()
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        self.notifications.as_ref()
    }

    fn regions(&self) -> &dyn RegionRepository {
        self.regions.as_ref()
    }
}

// ── Sessions ────────────────────────────────────────────────────

/// Process-local session store.
///
/// Expired sessions are purged when read and swept whenever a new session is stored.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token_hash: &str) -> DomainResult<Option<Session>> {
        let session = self.sessions.get(token_hash).map(|s| s.clone());
        match session {
            Some(s) if s.is_expired() => {
                self.sessions.remove(token_hash);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn set(&self, session: Session) -> DomainResult<()> {
        let now = Utc::now();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        self.sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    async fn expire(&self, token_hash: &str) -> DomainResult<()> {
        self.sessions.remove(token_hash);
        Ok(())
    }
}

// ── Documents ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, Vec<u8>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> DomainResult<()> {
        self.documents.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
