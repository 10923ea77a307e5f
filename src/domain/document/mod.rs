//! Uploaded document storage port

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Content area for uploaded files, addressed by a caller-chosen key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> DomainResult<()>;
}
