//! Storage implementations that live outside the database

mod documents;
mod memory;

pub use documents::LocalDocumentStore;
pub use memory::{
    InMemoryDocumentStore, InMemoryGuideProfileRepository, InMemoryNotificationRepository,
    InMemoryPlanRepository, InMemoryRegionRepository, InMemoryRepositoryProvider,
    InMemorySessionStore, InMemoryTouristProfileRepository, InMemoryUserRepository,
};
