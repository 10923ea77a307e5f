//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Tourist => UserRole::Tourist,
        user::UserRole::Guide => UserRole::Guide,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Tourist => user::UserRole::Tourist,
        UserRole::Guide => user::UserRole::Guide,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        full_name: model.full_name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        phone: model.phone,
        bio: model.bio,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            full_name: Set(new_user.full_name),
            email: Set(new_user.email.to_lowercase()),
            password_hash: Set(new_user.password_hash),
            role: Set(domain_role_to_entity(new_user.role)),
            phone: Set(None),
            bio: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Email already registered".to_string())
            } else {
                db_err(e)
            }
        })?;

        debug!("Created user {} ({})", inserted.id, entity_role_to_domain(inserted.role));
        Ok(user_model_to_domain(inserted))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_contact(
        &self,
        id: &str,
        phone: Option<String>,
        bio: Option<String>,
    ) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        let mut active: user::ActiveModel = existing.into();
        active.phone = Set(phone);
        active.bio = Set(bio);
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn count_by_role(&self, role: UserRole) -> DomainResult<u64> {
        user::Entity::find()
            .filter(user::Column::Role.eq(domain_role_to_entity(role)))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
