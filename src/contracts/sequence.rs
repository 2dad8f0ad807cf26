use crate::contracts::cancellation::CancellationToken;
use crate::contracts::error::SequenceError;

/// Enumerates digit-distinct integers in increasing order.
///
/// # Invariants
/// - `nth(a) < nth(b)` whenever `a < b` and both are in range (monotonic)
/// - `preview(n)` is a prefix of the match sequence of length `min(n, PREVIEW_LIMIT)`
/// - `nth(n)` for `n > TOTAL_MATCHES` is `OutOfRange`, never an unbounded walk
/// - Pure: identical `n` always yields an identical result
pub trait MatchEnumerator: Send + Sync {
    /// Returns the `n`-th match (1-based), abandoning the work once `cancel` fires.
    fn nth_cancellable(&self, n: u64, cancel: &CancellationToken) -> Result<u64, SequenceError>;

    /// Returns the first `min(n, PREVIEW_LIMIT)` matches.
    /// Fails with the same errors as `nth` for the same `n`.
    fn preview(&self, n: u64) -> Result<Vec<u64>, SequenceError>;

    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Returns the `n`-th match (1-based).
    fn nth(&self, n: u64) -> Result<u64, SequenceError> {
        self.nth_cancellable(n, &CancellationToken::new())
    }
}
