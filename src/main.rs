use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use digitseq::api::{start_server, AppState, QueryConfig, ServerConfig};
use digitseq::metrics::QueryMetrics;
use digitseq::query::QueryService;
use digitseq::sequence::TOTAL_MATCHES;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("digitseq=info".parse()?))
        .init();

    tracing::info!("digitseq starting...");

    let query_config = QueryConfig::from_env();
    let service = QueryService::with_kind(query_config.enumerator);
    tracing::info!(
        enumerator = service.enumerator_name(),
        max_inflight_queries = query_config.max_inflight_queries,
        total_matches = TOTAL_MATCHES,
        "Serving N-th integer without repeated digits"
    );

    let state = Arc::new(AppState::new(
        service,
        Arc::new(QueryMetrics::new()),
        &query_config,
    ));

    start_server(ServerConfig::from_env(), state, shutdown_signal()).await?;

    tracing::info!("digitseq stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
