//! Create plans table

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
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plans::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plans::GuideId).string().not_null())
                    .col(ColumnDef::new(Plans::Title).string().not_null())
                    .col(
                        ColumnDef::new(Plans::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Plans::StartDate).date().not_null())
                    .col(ColumnDef::new(Plans::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Plans::Price)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Plans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plans_guide")
                            .from(Plans::Table, Plans::GuideId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plans_guide_start")
                    .table(Plans::Table)
                    .col(Plans::GuideId)
                    .col(Plans::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Plans {
    Table,
    Id,
    GuideId,
    Title,
    Description,
    StartDate,
    EndDate,
    Price,
    CreatedAt,
}
