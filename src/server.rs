//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database and
//! migrations, default admin, REST API, and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::{DocumentStore, RepositoryProvider, SessionStore};
use crate::infrastructure::{
    init_database, InMemorySessionStore, LocalDocumentStore, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::modules::metrics::describe_portal_metrics;
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub struct ServerOptions {
    pub config: AppConfig,
    /// Create the configured admin when no admin account exists (default: true)
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            create_default_admin: true,
        }
    }
}

/// Handle to a running portal
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub state: AppState,
    pub config: AppConfig,
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can be installed once per process; later starts reuse it.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_portal_metrics();
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the default admin (if enabled)
    /// 4. Start the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        config.validate()?;

        info!("Starting Inside Tunisia...");
        let prometheus = prometheus_handle()?;

        let db = init_database(&config.database_config()).await?;

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let local_documents = LocalDocumentStore::new(config.uploads.dir.clone());
        info!("Uploads directory: {}", local_documents.root().display());
        let documents: Arc<dyn DocumentStore> = Arc::new(local_documents);

        let state = AppState::new(
            repos.clone(),
            sessions,
            documents,
            &config.service_settings(),
        );

        if opts.create_default_admin {
            create_default_admin(&state, &config).await;
        }

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let router = create_api_router(state.clone(), Some(db.clone()), prometheus);

        let api_addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let api_port = listener.local_addr()?.port();
        info!("REST API listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            state,
            config,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGINT / SIGTERM
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Wait for the shutdown signal, let in-flight requests drain (bounded
    /// by `server.shutdown_timeout`), then close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API stopped"),
                    Err(e) => error!("REST API task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Closing the database with requests still in flight");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }
        info!("👋 Inside Tunisia shutdown complete");
    }
}

async fn create_default_admin(state: &AppState, config: &AppConfig) {
    let admin = &config.admin;
    match state
        .identity
        .bootstrap_admin(&admin.full_name, &admin.email, &admin.password)
        .await
    {
        Ok(Some(user)) => {
            info!("Default admin created: {}", user.email);
            warn!("⚠️  Change the default admin password");
        }
        Ok(None) => {}
        Err(e) => error!("Failed to create default admin: {}", e),
    }
}

/// Install the global tracing subscriber. Call once, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
