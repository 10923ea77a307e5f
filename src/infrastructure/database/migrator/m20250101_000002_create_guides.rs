//! Create guides table (one row per GUIDE account)

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guides::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guides::Cv).string())
                    .col(
                        ColumnDef::new(Guides::CvApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Guides::ApprovedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Guides::SubscriptionActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Guides::SubscriptionExpiresAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guides_user")
                            .from(Guides::Table, Guides::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending-approval listing
        manager
            .create_index(
                Index::create()
                    .name("idx_guides_cv_approved")
                    .table(Guides::Table)
                    .col(Guides::CvApproved)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Guides {
    Table,
    UserId,
    Cv,
    CvApproved,
    ApprovedAt,
    SubscriptionActive,
    SubscriptionExpiresAt,
}
