//! Session resolution and gate middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::GatePolicy;
use crate::domain::{Principal, Session};
use crate::interfaces::http::common::ApiError;
use crate::interfaces::http::router::AppState;

/// Name of the session cookie set at login
pub const SESSION_COOKIE: &str = "sid";

/// Raw session token from `Authorization: Bearer …` or the `sid` cookie.
/// The header wins when both are present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find(|t| !t.is_empty())
        .map(String::from)
}

/// State for one gated route group: the services plus the policy to enforce
#[derive(Clone)]
pub struct GateState {
    pub app: AppState,
    pub policy: GatePolicy,
}

impl GateState {
    pub fn new(app: &AppState, policy: GatePolicy) -> Self {
        Self {
            app: app.clone(),
            policy,
        }
    }
}

async fn resolve_session(app: &AppState, headers: &HeaderMap) -> Result<Option<Session>, ApiError> {
    match extract_session_token(headers) {
        Some(token) => Ok(app.identity.resolve(&token).await?),
        None => Ok(None),
    }
}

/// Runs the authorization gate before the wrapped handler.
///
/// On success the request carries the [`Principal`], the role-specific
/// actor, and for approved-CV policies the
/// [`ApprovedGuide`](crate::application::ApprovedGuide) proof.
pub async fn gate_middleware(
    State(gate): State<GateState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = match resolve_session(&gate.app, request.headers()).await {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let clearance = match gate.app.gate.authorize(session.as_ref(), &gate.policy).await {
        Ok(c) => c,
        Err(e) => return ApiError(e).into_response(),
    };

    let extensions = request.extensions_mut();
    match &clearance.principal {
        Principal::Tourist(actor) => {
            extensions.insert(actor.clone());
        }
        Principal::Guide(actor) => {
            extensions.insert(actor.clone());
        }
        Principal::Admin(actor) => {
            extensions.insert(actor.clone());
        }
    }
    if let Some(approved) = clearance.approved_guide {
        extensions.insert(approved);
    }
    extensions.insert(clearance.principal);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_is_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=fromcookie"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=tok42; lang=fr"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok42"));
    }

    #[test]
    fn similar_cookie_names_do_not_match() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sidebar=open; sid="));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn no_credentials_means_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_session_token(&headers), None);
    }
}
