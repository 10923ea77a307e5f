//! Authentication API handlers

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::application::Registration;
use crate::domain::{Principal, UserRole};
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::{extract_session_token, SESSION_COOKIE};
use crate::interfaces::http::router::AppState;

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    let role: UserRole = request.role.parse()?;

    let user = state
        .identity
        .register(Registration {
            full_name: request.full_name,
            email: request.email,
            password: request.password,
            role,
            nationality: request.nationality,
            phone: request.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened; `sid` cookie set", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .identity
        .login(&request.email, &request.password)
        .await?;

    let expires_in = state.identity.session_ttl().num_seconds();
    let cookie = session_cookie(&outcome.token, expires_in);
    let redirect_to = outcome.landing_path().to_string();

    let response = LoginResponse {
        token: outcome.token,
        token_type: "Bearer".to_string(),
        expires_in,
        redirect_to,
        user: outcome.user.into(),
    };

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success(response)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session expired; cookie cleared", body = ApiResponse<EmptyData>)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_session_token(&headers) {
        state.identity.logout(&token).await?;
    }

    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie("", 0))]),
        Json(ApiResponse::success(EmptyData {})),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 303, description = "Not logged in; redirect to login")
    ),
    security(("session" = []))
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state.identity.current_user(&principal).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// Landing point for the 303 issued to requests without a valid session
#[utoipa::path(
    get,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    responses(
        (status = 401, description = "Login required", body = ApiResponse<EmptyData>)
    )
)]
pub async fn login_prompt() -> (StatusCode, Json<ApiResponse<EmptyData>>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error(
            "Login required: POST email and password to this endpoint",
        )),
    )
}
