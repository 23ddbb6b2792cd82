//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Database connectivity check and schema setup in the background
//! - Graceful shutdown on SIGTERM/Ctrl+C, then pool close

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{check_connection, schema};

/// Largest accepted JSON body
const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3001",
    "http://127.0.0.1:5173",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3001)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = local dev origins only)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the router with every route and middleware layer.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = LOCAL_ORIGINS
            .iter()
            .map(|origin| HeaderValue::from_static(*origin))
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::operations::router())
        .merge(routes::configuration::router())
        .merge(routes::journal::router())
        .merge(routes::costs::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// Binds first and prepares the database in the background, so the API
/// comes up even while PostgreSQL is unreachable.
///
/// # Example
///
/// ```ignore
/// let pool = create_lazy_pool(settings.connect_options()?, DEFAULT_MAX_CONNECTIONS);
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    serve(listener, pool, config.cors_permissive, shutdown_signal()).await
}

/// Serve on a bound listener until `shutdown` resolves, then close the pool.
pub async fn serve<F>(
    listener: TcpListener,
    pool: PgPool,
    cors_permissive: bool,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let startup = tokio::spawn(prepare_database(pool.clone()));
    let app = build_router(AppState::new(pool.clone()), cors_permissive);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    startup.abort();
    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Connectivity check, then the schema initializer. Failures are logged only.
async fn prepare_database(pool: PgPool) {
    match check_connection(&pool).await {
        Ok(now) => tracing::info!(server_time = %now, "Connected to PostgreSQL"),
        Err(e) => {
            tracing::error!("PostgreSQL connectivity check failed, skipping schema setup: {}", e);
            return;
        }
    }

    if let Err(e) = schema::run(&pool).await {
        tracing::error!("Failed to create journal tables: {}", e);
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
