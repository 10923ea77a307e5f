//! Create tourists table

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
                    .table(Tourists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tourists::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tourists::Nationality).string())
                    .col(ColumnDef::new(Tourists::Phone).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tourists_user")
                            .from(Tourists::Table, Tourists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tourists::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tourists {
    Table,
    UserId,
    Nationality,
    Phone,
}
