//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AdminService, AuthorizationGate, CatalogService, GatePolicy, GuideService, IdentityService,
};
use crate::domain::{DocumentStore, RepositoryProvider, SessionStore};
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{gate_middleware, GateState, SESSION_COOKIE};
use crate::interfaces::http::modules::{
    admin, auth, catalog, guide, health, metrics, notifications, request_id,
};

/// Multipart framing allowance on top of the CV size limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Tunables the services are built with
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub session_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub max_cv_bytes: usize,
}

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub guides: Arc<GuideService>,
    pub admin: Arc<AdminService>,
    pub catalog: Arc<CatalogService>,
    pub gate: Arc<AuthorizationGate>,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        sessions: Arc<dyn SessionStore>,
        documents: Arc<dyn DocumentStore>,
        settings: &ServiceSettings,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(
                repos.clone(),
                sessions,
                settings.session_ttl,
                settings.bcrypt_cost,
            )),
            guides: Arc::new(GuideService::new(
                repos.clone(),
                documents,
                settings.max_cv_bytes,
            )),
            admin: Arc::new(AdminService::new(repos.clone())),
            catalog: Arc::new(CatalogService::new(repos.clone())),
            gate: Arc::new(AuthorizationGate::new(repos)),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token returned by /api/v1/auth/login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::login_prompt,
        auth::logout,
        auth::get_current_user,
        catalog::list_regions,
        catalog::list_all_plans,
        guide::dashboard,
        guide::get_profile,
        guide::update_profile,
        guide::upload_cv,
        guide::subscription,
        guide::activate_subscription,
        guide::list_plans,
        guide::create_plan,
        admin::dashboard,
        admin::list_pending,
        admin::approve_guide,
        notifications::list_notifications,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            catalog::RegionDto,
            catalog::PlanDto,
            guide::GuideDashboardDto,
            guide::GuideProfileDto,
            guide::UpdateProfileRequest,
            guide::CvUploadResponse,
            guide::SubscriptionDto,
            guide::CreatePlanRequest,
            admin::AdminStatsDto,
            admin::PendingGuideDto,
            admin::ApprovalDto,
            notifications::NotificationDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Registration, login and sessions"),
        (name = "Catalog", description = "Regions and the tourist plan catalog"),
        (name = "Guide", description = "Guide dashboard, profile, CV upload, subscription and plans"),
        (name = "Admin", description = "Platform statistics and CV approval"),
        (name = "Notifications", description = "Per-user notification inbox"),
    ),
    info(
        title = "Inside Tunisia API",
        version = "0.1.0",
        description = "Tourism portal connecting tourists with approved local guides"
    )
)]
pub struct ApiDoc;

/// Build the full router.
///
/// `db` is only used by `/health`; pass `None` when running on in-memory stores.
pub fn create_api_router(
    state: AppState,
    db: Option<DatabaseConnection>,
    prometheus: PrometheusHandle,
) -> Router {
    let max_upload = state.guides.max_cv_bytes() + MULTIPART_OVERHEAD_BYTES;

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login).get(auth::login_prompt))
        .route("/logout", post(auth::logout))
        .merge(
            Router::new()
                .route("/me", get(auth::get_current_user))
                .route_layer(middleware::from_fn_with_state(
                    GateState::new(&state, GatePolicy::AUTHENTICATED),
                    gate_middleware,
                )),
        );

    let guide_routes = Router::new()
        .route("/dashboard", get(guide::dashboard))
        .route(
            "/profile",
            get(guide::get_profile).put(guide::update_profile),
        )
        .route(
            "/cv",
            post(guide::upload_cv).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/subscription", get(guide::subscription))
        .route(
            "/subscription/activate",
            post(guide::activate_subscription),
        )
        .route_layer(middleware::from_fn_with_state(
            GateState::new(&state, GatePolicy::GUIDE_AREA),
            gate_middleware,
        ))
        .route(
            "/plans",
            get(guide::list_plans)
                .layer(middleware::from_fn_with_state(
                    GateState::new(&state, GatePolicy::GUIDE_PLANS),
                    gate_middleware,
                ))
                .merge(post(guide::create_plan).layer(middleware::from_fn_with_state(
                    GateState::new(&state, GatePolicy::CREATE_PLAN),
                    gate_middleware,
                ))),
        );

    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/guides/pending", get(admin::list_pending))
        .route("/guides/{id}/approve", post(admin::approve_guide))
        .route_layer(middleware::from_fn_with_state(
            GateState::new(&state, GatePolicy::ADMIN_AREA),
            gate_middleware,
        ));

    let tourist_routes = Router::new()
        .route("/plans", get(catalog::list_all_plans))
        .route_layer(middleware::from_fn_with_state(
            GateState::new(&state, GatePolicy::TOURIST_AREA),
            gate_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(notifications::list_notifications))
        .route_layer(middleware::from_fn_with_state(
            GateState::new(&state, GatePolicy::AUTHENTICATED),
            gate_middleware,
        ));

    let api = Router::new()
        .route("/regions", get(catalog::list_regions))
        .nest("/auth", auth_routes)
        .nest("/guide", guide_routes)
        .nest("/admin", admin_routes)
        .nest("/tourist", tourist_routes)
        .nest("/notifications", notification_routes)
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState::new(db));

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState { handle: prometheus });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1", api)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
