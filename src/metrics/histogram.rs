//! Thread-safe histogram for query latency tracking.
//!
//! Buckets span from microseconds (unranking) to tens of seconds (brute-force
//! walks near the end of the sequence), enabling `histogram_quantile()` in
//! Prometheus.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of finite histogram buckets.
pub const BUCKET_COUNT: usize = 12;

/// Fixed histogram bucket upper bounds in microseconds.
pub const HISTOGRAM_BUCKETS: [u64; BUCKET_COUNT] = [
    1,          // 1μs
    5,          // 5μs
    25,         // 25μs
    100,        // 100μs
    500,        // 500μs
    1_000,      // 1ms
    10_000,     // 10ms
    100_000,    // 100ms
    1_000_000,  // 1s
    5_000_000,  // 5s
    30_000_000, // 30s
    60_000_000, // 60s
];

/// Lock-free latency histogram.
///
/// # Example
///
/// ```
/// use digitseq::metrics::Histogram;
///
/// let histogram = Histogram::new();
/// histogram.observe(150);
///
/// let (sum, count, _buckets) = histogram.snapshot();
/// assert_eq!(count, 1);
/// assert_eq!(sum, 150);
/// ```
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
    /// Cumulative - each bucket includes smaller values
    buckets: [AtomicU64; BUCKET_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    #[allow(clippy::declare_interior_mutable_const)]
    pub fn new() -> Self {
        const ZERO: AtomicU64 = AtomicU64::new(0);
        Self {
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
            buckets: [ZERO; BUCKET_COUNT],
        }
    }

    /// Records an observation in microseconds.
    #[inline]
    pub fn observe(&self, value_us: u64) {
        self.sum.fetch_add(value_us, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (bucket, &boundary) in self.buckets.iter().zip(HISTOGRAM_BUCKETS.iter()) {
            if value_us <= boundary {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Returns `(sum, count, cumulative bucket counts)`.
    pub fn snapshot(&self) -> (u64, u64, [u64; BUCKET_COUNT]) {
        let mut buckets = [0u64; BUCKET_COUNT];
        for (slot, bucket) in buckets.iter_mut().zip(self.buckets.iter()) {
            *slot = bucket.load(Ordering::Relaxed);
        }

        (
            self.sum.load(Ordering::Relaxed),
            self.count.load(Ordering::Relaxed),
            buckets,
        )
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    /// Formats the histogram in Prometheus exposition format.
    pub fn format_prometheus(&self, name: &str, help: &str) -> String {
        let (sum, count, buckets) = self.snapshot();

        let mut output = String::with_capacity(1024);
        let _ = writeln!(output, "# HELP {} {}", name, help);
        let _ = writeln!(output, "# TYPE {} histogram", name);

        for (boundary, bucket) in HISTOGRAM_BUCKETS.iter().zip(buckets.iter()) {
            let _ = writeln!(output, "{}_bucket{{le=\"{}\"}} {}", name, boundary, bucket);
        }

        let _ = writeln!(output, "{}_bucket{{le=\"+Inf\"}} {}", name, count);
        let _ = writeln!(output, "{}_sum {}", name, sum);
        let _ = writeln!(output, "{}_count {}", name, count);

        output
    }
}
