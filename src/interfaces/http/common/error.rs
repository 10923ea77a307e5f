//! Domain error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Where unauthenticated and wrong-role requests are sent
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Handler error: wraps a [`DomainError`] and renders it in the API envelope.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Unauthenticated | DomainError::WrongRole { .. } => StatusCode::SEE_OTHER,
            DomainError::NotApproved(_) => StatusCode::FORBIDDEN,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.redirects_to_login() {
            return Redirect::to(LOGIN_PATH).into_response();
        }

        let status = self.status();
        let message = match &self.0 {
            DomainError::Storage(detail) => {
                error!(error = %detail, "Storage failure while handling request");
                "Internal server error".to_string()
            }
            DomainError::Validation(msg)
            | DomainError::Conflict(msg)
            | DomainError::Unauthorized(msg)
            | DomainError::NotApproved(msg) => msg.clone(),
            other => other.to_string(),
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
