//! Concurrency tests for the digitseq service.
//!
//! These tests verify that queries are independent under concurrent access.
//! Run with: cargo test --test concurrency_tests

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::future::join_all;
use tower::ServiceExt;

use digitseq::api::{create_router, AppState, QueryConfig};
use digitseq::contracts::{CancellationToken, MatchEnumerator, QueryError};
use digitseq::metrics::QueryMetrics;
use digitseq::query::QueryService;
use digitseq::sequence::{BruteForceEnumerator, EnumeratorKind, UnrankingEnumerator};

// =============================================================================
// Thread-level Tests
// =============================================================================

/// Many threads sharing one service see identical results for identical ordinals.
#[test]
fn parallel_queries_are_deterministic() {
    let service = QueryService::with_kind(EnumeratorKind::Unranking);
    let num_threads = 8;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let s = service.clone();
            thread::spawn(move || {
                (1..=500u64)
                    .map(|n| s.handle(Some(&n.to_string())).unwrap().result)
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let results: Vec<Vec<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for other in &results[1..] {
        assert_eq!(&results[0], other, "threads disagreed");
    }
    assert!(results[0].windows(2).all(|w| w[0] < w[1]));
}

/// Brute-force and unranking enumerators used from different threads agree.
#[test]
fn enumerators_agree_across_threads() {
    let brute = Arc::new(BruteForceEnumerator::new());
    let unrank = Arc::new(UnrankingEnumerator::new());

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let brute = Arc::clone(&brute);
            let unrank = Arc::clone(&unrank);
            thread::spawn(move || {
                for n in (1 + t * 1_000)..=((t + 1) * 1_000) {
                    assert_eq!(brute.nth(n), unrank.nth(n), "n={}", n);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Cancelling from another thread stops a long brute-force walk.
#[test]
fn cancellation_from_another_thread() {
    let service = QueryService::with_kind(EnumeratorKind::BruteForce);
    let token = CancellationToken::new();

    let worker = {
        let token = token.clone();
        thread::spawn(move || service.handle_cancellable(Some("8877690"), &token))
    };

    thread::sleep(Duration::from_millis(50));
    token.cancel();

    assert_eq!(worker.join().unwrap(), Err(QueryError::Cancelled));
}

// =============================================================================
// HTTP-level Tests
// =============================================================================

/// Concurrent HTTP requests against one router all succeed with correct answers.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_queries() {
    let state = Arc::new(AppState::new(
        QueryService::with_kind(EnumeratorKind::Unranking),
        Arc::new(QueryMetrics::new()),
        &QueryConfig::default(),
    ));
    let app = create_router(Arc::clone(&state));

    let requests = (1..=50u64).map(|n| {
        let app = app.clone();
        async move {
            let response = app
                .oneshot(
                    Request::builder()
                        .uri(format!("/calculate?n={}", n))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            (n, json["result"].as_u64().unwrap())
        }
    });

    let results = join_all(requests).await;

    let expected = UnrankingEnumerator::new();
    for (n, result) in results {
        assert_eq!(Ok(result), expected.nth(n));
    }
    assert_eq!(state.metrics.snapshot().success_total, 50);
    assert_eq!(state.query_semaphore.available_permits(), 64);
}

/// A slow brute-force query does not block the health endpoint.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_query_does_not_block_health() {
    let config = QueryConfig {
        enumerator: EnumeratorKind::BruteForce,
        ..QueryConfig::default()
    };
    let state = Arc::new(AppState::new(
        QueryService::with_kind(config.enumerator),
        Arc::new(QueryMetrics::new()),
        &config,
    ));
    let app = create_router(state);

    let slow = tokio::spawn({
        let app = app.clone();
        async move {
            app.oneshot(
                Request::builder()
                    .uri("/calculate?n=8000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
        }
    });

    tokio::time::sleep(Duration::from_millis(20)).await;

    let health = tokio::time::timeout(
        Duration::from_secs(2),
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()),
    )
    .await
    .expect("health must answer while a query computes")
    .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    // Dropping the request cancels the walk through its drop guard.
    slow.abort();
}
