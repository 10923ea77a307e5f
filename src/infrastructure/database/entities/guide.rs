//! Guide profile entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guides")]
pub struct Model {
    /// Same id as the owning user row
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    /// Storage key of the uploaded CV
    #[sea_orm(nullable)]
    pub cv: Option<String>,

    pub cv_approved: bool,

    #[sea_orm(nullable)]
    pub approved_at: Option<DateTimeUtc>,

    pub subscription_active: bool,

    #[sea_orm(nullable)]
    pub subscription_expires_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
