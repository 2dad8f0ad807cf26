use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::api::page::INDEX_HTML;
use crate::api::QueryConfig;
use crate::contracts::{CancellationToken, MatchEnumerator, QueryError, QueryResponse};
use crate::metrics::{QueryMetrics, QueryOutcome, QueryStats};
use crate::query::{parse_ordinal, QueryService};
use crate::sequence::{check_ordinal, EnumeratorBackend};

/// Application state shared across handlers.
pub struct AppState<E: MatchEnumerator = EnumeratorBackend> {
    pub service: QueryService<E>,
    pub metrics: Arc<QueryMetrics>,
    /// Bounds concurrent enumerations
    pub query_semaphore: Arc<Semaphore>,
    pub max_inflight_queries: usize,
}

impl<E: MatchEnumerator> AppState<E> {
    pub fn new(service: QueryService<E>, metrics: Arc<QueryMetrics>, config: &QueryConfig) -> Self {
        Self {
            service,
            metrics,
            query_semaphore: Arc::new(Semaphore::new(config.max_inflight_queries)),
            max_inflight_queries: config.max_inflight_queries,
        }
    }

    /// Takes a computation slot, or fails immediately when all are in use.
    fn try_acquire_query_permit(&self) -> Result<OwnedSemaphorePermit, ApiError> {
        Arc::clone(&self.query_semaphore)
            .try_acquire_owned()
            .map_err(|_| {
                ApiError::Overloaded(format!(
                    "Too many concurrent queries (limit: {})",
                    self.max_inflight_queries
                ))
            })
    }
}

/// Query parameters for `/calculate`.
#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    pub n: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    Query(QueryError),
    BadRequest(String),
    Overloaded(String),
}

impl ApiError {
    fn outcome(&self) -> QueryOutcome {
        match self {
            ApiError::Query(QueryError::InvalidInput(_)) | ApiError::BadRequest(_) => {
                QueryOutcome::InvalidInput
            }
            ApiError::Query(QueryError::OutOfRange { .. }) => QueryOutcome::OutOfRange,
            ApiError::Query(QueryError::Cancelled) => QueryOutcome::Cancelled,
            ApiError::Query(QueryError::Internal(_)) => QueryOutcome::Internal,
            ApiError::Overloaded(_) => QueryOutcome::Overloaded,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            ApiError::Query(QueryError::InvalidInput(msg)) | ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    code: "INVALID_INPUT".into(),
                },
            ),
            ApiError::Query(e @ QueryError::OutOfRange { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: e.to_string(),
                    code: "OUT_OF_RANGE".into(),
                },
            ),
            ApiError::Query(QueryError::Cancelled) => (
                StatusCode::REQUEST_TIMEOUT,
                ErrorResponse {
                    error: "Query cancelled".into(),
                    code: "CANCELLED".into(),
                },
            ),
            // Details are logged where the error is raised.
            ApiError::Query(QueryError::Internal(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal error".into(),
                    code: "INTERNAL_ERROR".into(),
                },
            ),
            ApiError::Overloaded(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: msg,
                    code: "SERVER_OVERLOADED".into(),
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Query(e)
    }
}

/// GET /calculate?n=N
/// Returns the N-th digit-distinct integer and a preview of the sequence.
pub async fn calculate<E: MatchEnumerator + 'static>(
    State(state): State<Arc<AppState<E>>>,
    query: Result<Query<CalculateQuery>, QueryRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let start = Instant::now();

    let result = match query {
        Ok(Query(query)) => run_query(&state, query.n).await,
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    };

    let latency_us = start.elapsed().as_micros() as u64;
    match result {
        Ok((response, compute_us)) => {
            state.metrics.record(QueryOutcome::Success, compute_us);
            tracing::debug!(
                n = response.n,
                result = response.result,
                compute_us,
                latency_us,
                "Query answered"
            );
            Ok(Json(response))
        }
        Err(e) => {
            state.metrics.record(e.outcome(), latency_us);
            tracing::debug!(error = ?e, latency_us, "Query rejected");
            Err(e)
        }
    }
}

/// Validates the ordinal, then runs the enumeration on the blocking pool so the
/// accept loop stays responsive. Returns the response and the time spent computing it.
///
/// Malformed and out-of-range ordinals are rejected before a computation slot is taken.
/// If this future is dropped mid-computation, the drop guard cancels the token
/// and a brute-force walk stops at its next poll.
async fn run_query<E: MatchEnumerator + 'static>(
    state: &AppState<E>,
    raw: Option<String>,
) -> Result<(QueryResponse, u64), ApiError> {
    let n = parse_ordinal(raw.as_deref())?;
    check_ordinal(n).map_err(QueryError::from)?;

    let permit = state.try_acquire_query_permit()?;

    let service = state.service.clone();
    let cancel = CancellationToken::new();
    let guard = cancel.drop_guard();

    let joined = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let start = Instant::now();
        let result = service.answer_cancellable(n, &cancel);
        (result, start.elapsed().as_micros() as u64)
    })
    .await;
    guard.disarm();

    match joined {
        Ok((result, compute_us)) => result
            .map(|response| (response, compute_us))
            .map_err(ApiError::from),
        Err(e) => {
            tracing::error!(error = %e, "Query task failed");
            Err(ApiError::Query(QueryError::Internal(e.to_string())))
        }
    }
}

/// GET /
/// Input form that calls `/calculate` from the browser.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Page not found",
    )
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// Response for stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub enumerator: &'static str,
    pub queries: QueryStats,
    pub inflight_queries: usize,
    pub max_inflight_queries: usize,
}

/// GET /stats
pub async fn get_stats<E: MatchEnumerator + 'static>(
    State(state): State<Arc<AppState<E>>>,
) -> impl IntoResponse {
    let available = state.query_semaphore.available_permits();

    Json(StatsResponse {
        enumerator: state.service.enumerator_name(),
        queries: state.metrics.snapshot(),
        inflight_queries: state.max_inflight_queries.saturating_sub(available),
        max_inflight_queries: state.max_inflight_queries,
    })
}

/// GET /metrics
/// Prometheus text exposition format.
pub async fn metrics<E: MatchEnumerator + 'static>(
    State(state): State<Arc<AppState<E>>>,
) -> impl IntoResponse {
    let mut output = state.metrics.format_prometheus();
    output.push_str(&format!(
        "\n# HELP digitseq_inflight_queries_available Available query permits\n\
         # TYPE digitseq_inflight_queries_available gauge\n\
         digitseq_inflight_queries_available {}\n",
        state.query_semaphore.available_permits()
    ));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        output,
    )
}

/// Adds the permissive CORS headers the browser form relies on.
pub async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
