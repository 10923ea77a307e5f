use async_trait::async_trait;

use super::{NewUser, User, UserRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. A duplicate email is a `Conflict`.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn update_contact(
        &self,
        id: &str,
        phone: Option<String>,
        bio: Option<String>,
    ) -> DomainResult<()>;

    async fn count_by_role(&self, role: UserRole) -> DomainResult<u64>;
}
