//! Identity service: registration, login, sessions
//!
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, DomainResult, GuideProfile, NewUser, Notification, Principal, RepositoryProvider,
    Session, SessionStore, TouristProfile, User, UserRole,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::crypto::session_token::{generate_session_token, hash_session_token};
use crate::shared::errors::InfraError;

const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Self-registration request. Tourist-only fields are ignored for guides.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub nationality: Option<String>,
    pub phone: Option<String>,
}

/// Successful login: the raw token is only ever returned here
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub session: Session,
    pub user: User,
}

impl LoginOutcome {
    pub fn landing_path(&self) -> &'static str {
        self.user.role.landing_path()
    }
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        sessions: Arc<dyn SessionStore>,
        session_ttl: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repos,
            sessions,
            session_ttl,
            bcrypt_cost,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a tourist or guide account.
    ///
    /// Guides get an unapproved profile with no CV. If that second write
    /// fails the account stays behind without a profile and the error is
    /// reported; the gate keeps such a guide out of plan creation.
    pub async fn register(&self, reg: Registration) -> DomainResult<User> {
        if reg.role == UserRole::Admin {
            return Err(DomainError::Validation(
                "Administrator accounts cannot be self-registered".into(),
            ));
        }
        validate_credentials(&reg.full_name, &reg.email, &reg.password)?;

        if self.repos.users().find_by_email(&reg.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let user = self
            .create_account(&reg.full_name, &reg.email, &reg.password, reg.role)
            .await?;

        match user.role {
            UserRole::Guide => {
                if let Err(e) = self.repos.guides().create(GuideProfile::new(user.id.clone())).await {
                    warn!(user_id = %user.id, error = %e, "Guide profile not created");
                    return Err(e);
                }
            }
            UserRole::Tourist => {
                self.repos
                    .tourists()
                    .create(TouristProfile {
                        user_id: user.id.clone(),
                        nationality: reg.nationality,
                        phone: reg.phone,
                    })
                    .await?;
            }
            UserRole::Admin => {}
        }

        info!(user_id = %user.id, role = %user.role, "New user registered");
        Ok(user)
    }

    /// Create the configured administrator when no admin account exists yet.
    /// Returns the new account, or `None` when an admin is already present.
    pub async fn bootstrap_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count_by_role(UserRole::Admin).await? > 0 {
            return Ok(None);
        }
        validate_credentials(full_name, email, password)?;

        let admin = self
            .create_account(full_name, email, password, UserRole::Admin)
            .await?;
        info!(user_id = %admin.id, email = %admin.email, "Default admin created");
        Ok(Some(admin))
    }

    async fn create_account(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        let password_hash = hash_password(password, self.bcrypt_cost)
            .map_err(|e| InfraError::Crypto(e.to_string()))?;

        self.repos
            .users()
            .create(NewUser {
                full_name: full_name.trim().to_string(),
                email: email.trim().to_lowercase(),
                password_hash,
                role,
            })
            .await
    }

    // ── Sessions ────────────────────────────────────────────────

    /// Check credentials and open a new session. A failed attempt creates
    /// nothing and leaves existing sessions alone.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let Some(user) = self.repos.users().find_by_email(email.trim()).await? else {
            debug!("Login rejected: unknown email");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        // A malformed stored hash counts as a mismatch
        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            debug!(user_id = %user.id, "Login rejected: bad password");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let token = generate_session_token();
        let session = Session::new(
            hash_session_token(&token),
            user.id.clone(),
            user.role,
            self.session_ttl,
        );
        self.sessions.set(session.clone()).await?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginOutcome {
            token,
            session,
            user,
        })
    }

    /// Look up the live session behind a raw token
    pub async fn resolve(&self, token: &str) -> DomainResult<Option<Session>> {
        self.sessions.get(&hash_session_token(token)).await
    }

    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.sessions.expire(&hash_session_token(token)).await?;
        debug!("Session expired by logout");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn current_user(&self, principal: &Principal) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(principal.user_id())
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", principal.user_id()))
    }

    /// Notifications addressed to the requester, newest first
    pub async fn notifications(&self, principal: &Principal) -> DomainResult<Vec<Notification>> {
        self.repos
            .notifications()
            .list_for_user(principal.user_id())
            .await
    }
}

fn validate_credentials(full_name: &str, email: &str, password: &str) -> DomainResult<()> {
    if full_name.trim().is_empty() {
        return Err(DomainError::Validation("Full name is required".into()));
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
