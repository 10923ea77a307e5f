//! Create regions table and seed the governorates

use sea_orm_migration::prelude::*;

use crate::domain::region::GOVERNORATES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Regions::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_regions_name")
                    .table(Regions::Table)
                    .col(Regions::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Regions::Table).columns([Regions::Name]);
        for name in GOVERNORATES {
            insert
                .values([name.into()])
                .map_err(|e| DbErr::Migration(format!("region seed: {}", e)))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Regions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Regions {
    Table,
    Id,
    Name,
}
