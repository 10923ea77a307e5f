//! Guide area handlers

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreatePlanRequest, CvUploadResponse, GuideDashboardDto, GuideProfileDto, SubscriptionDto,
    UpdateProfileRequest,
};
use crate::application::{ApprovedGuide, ContactUpdate, CvDocument};
use crate::domain::{DomainError, GuideActor};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::catalog::PlanDto;
use crate::interfaces::http::router::AppState;

/// Multipart field carrying the CV
const CV_FIELD: &str = "cv";

#[utoipa::path(
    get,
    path = "/api/v1/guide/dashboard",
    tag = "Guide",
    responses(
        (status = 200, description = "Plan count and latest plans", body = ApiResponse<GuideDashboardDto>)
    ),
    security(("session" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
) -> Result<Json<ApiResponse<GuideDashboardDto>>, ApiError> {
    let dashboard = state.guides.dashboard(&guide).await?;
    Ok(Json(ApiResponse::success(dashboard.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/guide/profile",
    tag = "Guide",
    responses(
        (status = 200, description = "Guide profile", body = ApiResponse<GuideProfileDto>)
    ),
    security(("session" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
) -> Result<Json<ApiResponse<GuideProfileDto>>, ApiError> {
    let view = state.guides.profile(&guide).await?;
    Ok(Json(ApiResponse::success(view.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/guide/profile",
    tag = "Guide",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<GuideProfileDto>),
        (status = 422, description = "Validation error")
    ),
    security(("session" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<GuideProfileDto>>, ApiError> {
    let view = state
        .guides
        .update_profile(
            &guide,
            ContactUpdate {
                phone: request.phone,
                bio: request.bio,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(view.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/guide/cv",
    tag = "Guide",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Field `cv`: a PDF document of at most 5 MiB"
    ),
    responses(
        (status = 201, description = "CV stored, awaiting approval", body = ApiResponse<CvUploadResponse>),
        (status = 422, description = "Not a PDF, empty, or too large")
    ),
    security(("session" = []))
)]
pub async fn upload_cv(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CvUploadResponse>>), ApiError> {
    let mut document = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(CV_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::Validation(format!("Invalid upload: {}", e)))?;
        document = Some(CvDocument {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let document = document
        .ok_or_else(|| DomainError::Validation(format!("Missing `{}` file field", CV_FIELD)))?;
    let key = state.guides.upload_cv(&guide, document).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CvUploadResponse {
            cv: key,
            cv_approved: false,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/guide/subscription",
    tag = "Guide",
    responses(
        (status = 200, description = "Subscription state", body = ApiResponse<SubscriptionDto>)
    ),
    security(("session" = []))
)]
pub async fn subscription(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, ApiError> {
    let status = state.guides.subscription(&guide).await?;
    Ok(Json(ApiResponse::success(status.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/guide/subscription/activate",
    tag = "Guide",
    responses(
        (status = 200, description = "Subscription active for one month", body = ApiResponse<SubscriptionDto>)
    ),
    security(("session" = []))
)]
pub async fn activate_subscription(
    State(state): State<AppState>,
    Extension(guide): Extension<GuideActor>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, ApiError> {
    let status = state.guides.activate_subscription(&guide).await?;
    Ok(Json(ApiResponse::success(status.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/guide/plans",
    tag = "Guide",
    responses(
        (status = 200, description = "Own plans, latest start first", body = ApiResponse<Vec<PlanDto>>),
        (status = 403, description = "CV not approved yet")
    ),
    security(("session" = []))
)]
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(guide): Extension<ApprovedGuide>,
) -> Result<Json<ApiResponse<Vec<PlanDto>>>, ApiError> {
    let plans = state.guides.list_plans(&guide).await?;
    Ok(Json(ApiResponse::success(
        plans.into_iter().map(PlanDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/guide/plans",
    tag = "Guide",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanDto>),
        (status = 403, description = "CV not approved yet"),
        (status = 422, description = "Validation error")
    ),
    security(("session" = []))
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Extension(guide): Extension<ApprovedGuide>,
    ValidatedJson(request): ValidatedJson<CreatePlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanDto>>), ApiError> {
    let plan = state.guides.create_plan(&guide, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(plan.into()))))
}
