//! Query counters and latency histogram for the digitseq service.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

use super::Histogram;

/// How a query ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Success,
    InvalidInput,
    OutOfRange,
    Overloaded,
    Cancelled,
    Internal,
}

/// Lock-free counters for every query outcome plus compute latency.
pub struct QueryMetrics {
    start_time: Instant,
    pub queries_total: AtomicU64,
    pub success_total: AtomicU64,
    pub invalid_input_total: AtomicU64,
    pub out_of_range_total: AtomicU64,
    pub overloaded_total: AtomicU64,
    pub cancelled_total: AtomicU64,
    pub internal_errors_total: AtomicU64,
    /// Time spent computing successful queries, excluding parsing and queueing
    pub compute_latency_us: Histogram,
}

impl Default for QueryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            queries_total: AtomicU64::new(0),
            success_total: AtomicU64::new(0),
            invalid_input_total: AtomicU64::new(0),
            out_of_range_total: AtomicU64::new(0),
            overloaded_total: AtomicU64::new(0),
            cancelled_total: AtomicU64::new(0),
            internal_errors_total: AtomicU64::new(0),
            compute_latency_us: Histogram::new(),
        }
    }

    /// Records one finished query.
    #[inline]
    pub fn record(&self, outcome: QueryOutcome, latency_us: u64) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            QueryOutcome::Success => {
                self.compute_latency_us.observe(latency_us);
                &self.success_total
            }
            QueryOutcome::InvalidInput => &self.invalid_input_total,
            QueryOutcome::OutOfRange => &self.out_of_range_total,
            QueryOutcome::Overloaded => &self.overloaded_total,
            QueryOutcome::Cancelled => &self.cancelled_total,
            QueryOutcome::Internal => &self.internal_errors_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> QueryStats {
        let success = self.success_total.load(Ordering::Relaxed);
        QueryStats {
            uptime_secs: self.uptime_secs(),
            queries_total: self.queries_total.load(Ordering::Relaxed),
            success_total: success,
            invalid_input_total: self.invalid_input_total.load(Ordering::Relaxed),
            out_of_range_total: self.out_of_range_total.load(Ordering::Relaxed),
            overloaded_total: self.overloaded_total.load(Ordering::Relaxed),
            cancelled_total: self.cancelled_total.load(Ordering::Relaxed),
            internal_errors_total: self.internal_errors_total.load(Ordering::Relaxed),
            avg_compute_latency_us: safe_avg(self.compute_latency_us.sum(), success),
        }
    }

    /// Formats all counters and the latency histogram in Prometheus exposition format.
    pub fn format_prometheus(&self) -> String {
        let stats = self.snapshot();
        let mut output = String::with_capacity(2048);

        let _ = writeln!(output, "# HELP digitseq_uptime_secs Server uptime in seconds");
        let _ = writeln!(output, "# TYPE digitseq_uptime_secs gauge");
        let _ = writeln!(output, "digitseq_uptime_secs {:.3}", stats.uptime_secs);
        output.push('\n');

        let _ = writeln!(output, "# HELP digitseq_queries_total Total ordinal queries");
        let _ = writeln!(output, "# TYPE digitseq_queries_total counter");
        let _ = writeln!(output, "digitseq_queries_total {}", stats.queries_total);
        output.push('\n');

        let _ = writeln!(
            output,
            "# HELP digitseq_query_outcomes_total Ordinal queries by outcome"
        );
        let _ = writeln!(output, "# TYPE digitseq_query_outcomes_total counter");
        for (label, value) in [
            ("success", stats.success_total),
            ("invalid_input", stats.invalid_input_total),
            ("out_of_range", stats.out_of_range_total),
            ("overloaded", stats.overloaded_total),
            ("cancelled", stats.cancelled_total),
            ("internal", stats.internal_errors_total),
        ] {
            let _ = writeln!(
                output,
                "digitseq_query_outcomes_total{{outcome=\"{}\"}} {}",
                label, value
            );
        }
        output.push('\n');

        output.push_str(&self.compute_latency_us.format_prometheus(
            "digitseq_compute_latency_us",
            "Compute time of successful queries in microseconds, excluding parsing and queueing",
        ));

        output
    }
}

/// Serializable view of [`QueryMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct QueryStats {
    pub uptime_secs: f64,
    pub queries_total: u64,
    pub success_total: u64,
    pub invalid_input_total: u64,
    pub out_of_range_total: u64,
    pub overloaded_total: u64,
    pub cancelled_total: u64,
    pub internal_errors_total: u64,
    pub avg_compute_latency_us: f64,
}

#[inline]
fn safe_avg(sum: u64, count: u64) -> f64 {
    if count > 0 {
        sum as f64 / count as f64
    } else {
        0.0
    }
}
