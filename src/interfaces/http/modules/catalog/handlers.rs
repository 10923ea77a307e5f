//! Public region list and tourist plan catalog handlers

use axum::{extract::State, Extension, Json};

use super::dto::{PlanDto, RegionDto};
use crate::domain::TouristActor;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/regions",
    tag = "Catalog",
    responses(
        (status = 200, description = "Governorates", body = ApiResponse<Vec<RegionDto>>)
    )
)]
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RegionDto>>>, ApiError> {
    let regions = state.catalog.regions().await?;
    Ok(Json(ApiResponse::success(
        regions.into_iter().map(RegionDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/tourist/plans",
    tag = "Catalog",
    responses(
        (status = 200, description = "All published plans", body = ApiResponse<Vec<PlanDto>>),
        (status = 303, description = "Not logged in as a tourist")
    ),
    security(("session" = []))
)]
pub async fn list_all_plans(
    State(state): State<AppState>,
    Extension(tourist): Extension<TouristActor>,
) -> Result<Json<ApiResponse<Vec<PlanDto>>>, ApiError> {
    let plans = state.catalog.all_plans(&tourist).await?;
    Ok(Json(ApiResponse::success(
        plans.into_iter().map(PlanDto::from).collect(),
    )))
}
