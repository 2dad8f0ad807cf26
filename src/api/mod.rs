mod handlers;
mod page;

use std::future::Future;
use std::sync::Arc;

use axum::middleware::map_response;
use axum::routing::get;
use axum::Router;

use crate::contracts::MatchEnumerator;
use crate::sequence::EnumeratorKind;

pub use handlers::{AppState, CalculateQuery, ErrorResponse, StatsResponse};

/// Creates the API router.
pub fn create_router<E: MatchEnumerator + 'static>(state: Arc<AppState<E>>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calculate", get(handlers::calculate::<E>))
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats::<E>))
        .route("/metrics", get(handlers::metrics::<E>))
        .fallback(handlers::not_found)
        .layer(map_response(handlers::add_cors_headers))
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Reads `DIGITSEQ_HOST` and `DIGITSEQ_PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("DIGITSEQ_HOST").unwrap_or(default.host),
            port: std::env::var("DIGITSEQ_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default.port),
        }
    }
}

/// Query execution configuration.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Maximum number of enumerations running at once.
    /// Requests beyond it get 503 instead of queueing.
    /// Default: 64
    pub max_inflight_queries: usize,
    /// Enumeration strategy.
    /// Default: unranking
    pub enumerator: EnumeratorKind,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_inflight_queries: 64,
            enumerator: EnumeratorKind::default(),
        }
    }
}

impl QueryConfig {
    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `DIGITSEQ_MAX_INFLIGHT_QUERIES`: Max concurrent enumerations (default: 64)
    /// - `DIGITSEQ_ENUMERATOR`: `unranking` or `brute-force` (default: unranking)
    pub fn from_env() -> Self {
        let default = Self::default();

        let max_inflight_queries = std::env::var("DIGITSEQ_MAX_INFLIGHT_QUERIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.max_inflight_queries);

        let enumerator = match std::env::var("DIGITSEQ_ENUMERATOR") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Ignoring DIGITSEQ_ENUMERATOR");
                default.enumerator
            }),
            Err(_) => default.enumerator,
        };

        Self {
            max_inflight_queries,
            enumerator,
        }
    }
}

/// Starts the HTTP server and runs until `shutdown` resolves.
pub async fn start_server<E, F>(
    config: ServerConfig,
    state: Arc<AppState<E>>,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    E: MatchEnumerator + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
