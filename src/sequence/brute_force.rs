use crate::contracts::{CancellationToken, MatchEnumerator, SequenceError};
use crate::sequence::bounds::{check_ordinal, preview_len, MAX_MATCH, TOTAL_MATCHES};
use crate::sequence::checker::is_unique;

/// How many matches are produced between cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 4096;

/// Iterator over digit-distinct integers in increasing order.
///
/// Walks candidates `1..=MAX_MATCH` through the checker and ends after the
/// largest match, so it is finite.
#[derive(Debug, Clone)]
pub struct DigitDistinct {
    next_candidate: u64,
}

impl Iterator for DigitDistinct {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.next_candidate <= MAX_MATCH {
            let candidate = self.next_candidate;
            self.next_candidate += 1;
            if is_unique(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Returns the match sequence from the start.
pub fn matches() -> DigitDistinct {
    DigitDistinct { next_candidate: 1 }
}

/// Reference enumerator: trial-and-test over increasing integers.
///
/// O(value) candidate tests; ordinals near `TOTAL_MATCHES` scan billions of
/// candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceEnumerator;

impl BruteForceEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl MatchEnumerator for BruteForceEnumerator {
    fn nth_cancellable(&self, n: u64, cancel: &CancellationToken) -> Result<u64, SequenceError> {
        check_ordinal(n)?;

        for (index, candidate) in (0u64..).zip(matches()) {
            if index % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
                tracing::debug!(n, scanned_matches = index, "Brute-force walk cancelled");
                return Err(SequenceError::Cancelled);
            }
            if index + 1 == n {
                return Ok(candidate);
            }
        }

        // check_ordinal guarantees the walk reaches n
        Err(SequenceError::OutOfRange {
            requested: n,
            total: TOTAL_MATCHES,
        })
    }

    fn preview(&self, n: u64) -> Result<Vec<u64>, SequenceError> {
        check_ordinal(n)?;
        Ok(matches().take(preview_len(n)).collect())
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}
