//! Digit-distinct integer sequence: predicate, bounds and enumerators.

pub mod bounds;
pub mod brute_force;
pub mod checker;
pub mod unranking;

use std::str::FromStr;

pub use bounds::{check_ordinal, MAX_MATCH, PREVIEW_LIMIT, TOTAL_MATCHES};
pub use brute_force::{matches, BruteForceEnumerator, DigitDistinct};
pub use checker::is_unique;
pub use unranking::{unrank, UnrankingEnumerator};

use crate::contracts::{CancellationToken, MatchEnumerator, SequenceError};

/// Which enumeration strategy the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumeratorKind {
    #[default]
    Unranking,
    BruteForce,
}

impl FromStr for EnumeratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unranking" | "unrank" => Ok(Self::Unranking),
            "brute-force" | "brute_force" | "bruteforce" => Ok(Self::BruteForce),
            other => Err(format!(
                "unknown enumerator '{}', expected 'unranking' or 'brute-force'",
                other
            )),
        }
    }
}

/// Enumerator selected at startup.
pub enum EnumeratorBackend {
    /// Positional construction, constant time per query
    Unranking(UnrankingEnumerator),
    /// Trial-and-test walk over increasing integers
    BruteForce(BruteForceEnumerator),
}

impl EnumeratorBackend {
    pub fn from_kind(kind: EnumeratorKind) -> Self {
        match kind {
            EnumeratorKind::Unranking => Self::Unranking(UnrankingEnumerator::new()),
            EnumeratorKind::BruteForce => Self::BruteForce(BruteForceEnumerator::new()),
        }
    }
}

impl Default for EnumeratorBackend {
    fn default() -> Self {
        Self::from_kind(EnumeratorKind::default())
    }
}

impl MatchEnumerator for EnumeratorBackend {
    fn nth_cancellable(&self, n: u64, cancel: &CancellationToken) -> Result<u64, SequenceError> {
        match self {
            Self::Unranking(e) => e.nth_cancellable(n, cancel),
            Self::BruteForce(e) => e.nth_cancellable(n, cancel),
        }
    }

    fn preview(&self, n: u64) -> Result<Vec<u64>, SequenceError> {
        match self {
            Self::Unranking(e) => e.preview(n),
            Self::BruteForce(e) => e.preview(n),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Unranking(e) => e.name(),
            Self::BruteForce(e) => e.name(),
        }
    }
}
