//! Plan entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning guide (users.id)
    pub guide_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub start_date: Date,
    pub end_date: Date,

    /// Millimes
    pub price: i64,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::GuideId",
        to = "super::user::Column::Id"
    )]
    Guide,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
