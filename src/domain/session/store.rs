use async_trait::async_trait;

use super::model::Session;
use crate::domain::DomainResult;

/// Server-side session storage.
///
/// Implementations must never hand out an expired session from `get`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, token_hash: &str) -> DomainResult<Option<Session>>;
    async fn set(&self, session: Session) -> DomainResult<()>;
    async fn expire(&self, token_hash: &str) -> DomainResult<()>;
}
