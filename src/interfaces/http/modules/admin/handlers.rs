//! Admin area handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::dto::{AdminStatsDto, ApprovalDto, PendingGuideDto};
use crate::domain::AdminActor;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    tag = "Admin",
    responses(
        (status = 200, description = "Platform counters", body = ApiResponse<AdminStatsDto>)
    ),
    security(("session" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminActor>,
) -> Json<ApiResponse<AdminStatsDto>> {
    let stats = state.admin.dashboard(&admin).await;
    Json(ApiResponse::success(stats.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/guides/pending",
    tag = "Admin",
    responses(
        (status = 200, description = "Guides whose CV awaits review", body = ApiResponse<Vec<PendingGuideDto>>)
    ),
    security(("session" = []))
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminActor>,
) -> Json<ApiResponse<Vec<PendingGuideDto>>> {
    let pending = state.admin.pending_guides(&admin).await;
    Json(ApiResponse::success(
        pending.into_iter().map(PendingGuideDto::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/guides/{id}/approve",
    tag = "Admin",
    params(("id" = String, Path, description = "Guide user id")),
    responses(
        (status = 200, description = "CV approved", body = ApiResponse<ApprovalDto>),
        (status = 404, description = "No guide profile with this id")
    ),
    security(("session" = []))
)]
pub async fn approve_guide(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminActor>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ApprovalDto>>, ApiError> {
    let outcome = state.admin.approve(&admin, &id).await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}
