//! JSON body extractor that runs `validator` rules before the handler

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::{ApiError, ApiResponse};
use crate::domain::DomainError;

/// `Json<T>` plus `Validate`. Rule violations surface as
/// [`DomainError::Validation`], so they share the 422 mapping with the
/// services.
///
/// ```ignore
/// async fn create_plan(
///     Extension(guide): Extension<ApprovedGuide>,
///     ValidatedJson(request): ValidatedJson<CreatePlanRequest>,
/// ) -> Result<(StatusCode, Json<ApiResponse<PlanDto>>), ApiError>
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    /// Body missing, not JSON, or not the expected shape
    Malformed(JsonRejection),
    /// Body parsed but broke a field rule
    Invalid(ValidationErrors),
}

/// `field: message` pairs ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.clone(), msg)
            })
        })
        .collect();
    parts.sort();

    if parts.is_empty() {
        return "Validation failed".to_string();
    }
    parts
        .into_iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Malformed(rejection) => (
                rejection.status(),
                Json(ApiResponse::<()>::error(format!(
                    "Malformed request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response(),
            Self::Invalid(errors) => ApiError(DomainError::Validation(describe(&errors))).into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::interfaces::http::modules::guide::CreatePlanRequest;

    async fn accept_plan(ValidatedJson(request): ValidatedJson<CreatePlanRequest>) -> String {
        request.title
    }

    async fn post_plan(content_type: Option<&str>, body: String) -> (StatusCode, Value) {
        let mut builder = axum::http::Request::post("/plans");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let resp = Router::new()
            .route("/plans", post(accept_plan))
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn plan(title: &str, price: i64) -> String {
        json!({
            "title": title,
            "start_date": "2026-03-20",
            "end_date": "2026-03-22",
            "price": price,
        })
        .to_string()
    }

    #[tokio::test]
    async fn valid_plan_reaches_the_handler() {
        let (status, _) = post_plan(Some("application/json"), plan("Kerkennah by felucca", 90_000)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn rule_violations_are_listed_by_field() {
        let (status, body) = post_plan(Some("application/json"), plan("", -1)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "price: price must not be negative; title: title must be 1-200 characters"
        );
    }

    #[tokio::test]
    async fn truncated_body_is_a_bad_request() {
        let (status, body) = post_plan(Some("application/json"), "{\"title\":".into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Malformed request body"));
    }

    #[tokio::test]
    async fn missing_content_type_is_unsupported() {
        let (status, _) = post_plan(None, plan("Desert Tour", 0)).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
