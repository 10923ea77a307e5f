use axum::{extract::State, Extension, Json};

use super::dto::NotificationDto;
use crate::domain::Principal;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Own notifications, newest first", body = ApiResponse<Vec<NotificationDto>>)
    ),
    security(("session" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<Vec<NotificationDto>>>, ApiError> {
    let items = state.identity.notifications(&principal).await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(NotificationDto::from).collect(),
    )))
}
