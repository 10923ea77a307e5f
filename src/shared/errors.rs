use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// No valid session accompanies the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// A session exists but belongs to another role.
    #[error("Wrong role: {required} required, session belongs to {actual}")]
    WrongRole {
        required: &'static str,
        actual: &'static str,
    },

    /// Guide gate rejection. The message is shown to the guide as-is.
    #[error("{0}")]
    NotApproved(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Unauthenticated and role-mismatch rejections land on the login entry point.
    pub fn redirects_to_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::WrongRole { .. })
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        DomainError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_session_failures_redirect_to_login() {
        assert!(DomainError::Unauthenticated.redirects_to_login());
        assert!(DomainError::WrongRole {
            required: "GUIDE",
            actual: "TOURIST"
        }
        .redirects_to_login());
        assert!(!DomainError::NotApproved("pending".into()).redirects_to_login());
        assert!(!DomainError::Storage("down".into()).redirects_to_login());
    }

    #[test]
    fn infra_errors_become_storage_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: DomainError = InfraError::from(io).into();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
