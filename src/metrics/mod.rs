//! Observability metrics for digitseq.
//!
//! All counters are lock-free atomics so recording never contends with
//! request handling.

pub mod histogram;
pub mod registry;

pub use histogram::Histogram;
pub use registry::{QueryMetrics, QueryOutcome, QueryStats};
