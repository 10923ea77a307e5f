//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_guides;
mod m20250101_000003_create_tourists;
mod m20250101_000004_create_plans;
mod m20250101_000005_create_notifications;
mod m20250101_000006_create_regions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_guides::Migration),
            Box::new(m20250101_000003_create_tourists::Migration),
            Box::new(m20250101_000004_create_plans::Migration),
            Box::new(m20250101_000005_create_notifications::Migration),
            Box::new(m20250101_000006_create_regions::Migration),
        ]
    }
}
