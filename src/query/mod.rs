//! Query boundary: validates raw ordinals and shapes responses.

mod ordinal;

use std::sync::Arc;

pub use ordinal::parse_ordinal;

use crate::contracts::{
    CancellationToken, MatchEnumerator, QueryError, QueryResponse, QUERY_DESCRIPTION,
};
use crate::sequence::{EnumeratorBackend, EnumeratorKind};

/// Answers "what is the N-th digit-distinct integer?" for raw, untrusted input.
///
/// Holds no per-request state; clones share the same enumerator.
pub struct QueryService<E: MatchEnumerator = EnumeratorBackend> {
    enumerator: Arc<E>,
}

impl<E: MatchEnumerator> Clone for QueryService<E> {
    fn clone(&self) -> Self {
        Self {
            enumerator: Arc::clone(&self.enumerator),
        }
    }
}

impl<E: MatchEnumerator> QueryService<E> {
    pub fn new(enumerator: E) -> Self {
        Self {
            enumerator: Arc::new(enumerator),
        }
    }

    /// Name of the enumerator in use.
    pub fn enumerator_name(&self) -> &'static str {
        self.enumerator.name()
    }

    /// Parses `raw`, then computes the result and its preview.
    pub fn handle(&self, raw: Option<&str>) -> Result<QueryResponse, QueryError> {
        self.handle_cancellable(raw, &CancellationToken::new())
    }

    /// Like [`handle`](Self::handle), but gives up with `Cancelled` once `cancel` fires.
    pub fn handle_cancellable(
        &self,
        raw: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, QueryError> {
        let n = parse_ordinal(raw)?;
        self.answer_cancellable(n, cancel)
    }

    /// Computes the result and preview for an ordinal that has already been parsed.
    pub fn answer_cancellable(
        &self,
        n: u64,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, QueryError> {
        let result = self.enumerator.nth_cancellable(n, cancel)?;
        let sequence = self.enumerator.preview(n)?;

        Ok(QueryResponse {
            n,
            result,
            sequence,
            description: QUERY_DESCRIPTION.to_string(),
        })
    }
}

impl QueryService<EnumeratorBackend> {
    /// Creates a service backed by the given enumeration strategy.
    pub fn with_kind(kind: EnumeratorKind) -> Self {
        Self::new(EnumeratorBackend::from_kind(kind))
    }
}

impl Default for QueryService<EnumeratorBackend> {
    fn default() -> Self {
        Self::with_kind(EnumeratorKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{BruteForceEnumerator, TOTAL_MATCHES};

    #[test]
    fn handle_ten() {
        let service = QueryService::with_kind(EnumeratorKind::Unranking);
        let response = service.handle(Some("10")).unwrap();
        assert_eq!(response.n, 10);
        assert_eq!(response.result, 10);
        assert_eq!(response.sequence, (1..=10).collect::<Vec<u64>>());
        assert_eq!(response.description, QUERY_DESCRIPTION);
    }

    #[test]
    fn non_positive_is_invalid_input() {
        let service = QueryService::with_kind(EnumeratorKind::Unranking);
        assert!(matches!(
            service.handle(Some("0")),
            Err(QueryError::InvalidInput(_))
        ));
        assert!(matches!(
            service.handle(Some("-5")),
            Err(QueryError::InvalidInput(_))
        ));
        assert!(matches!(service.handle(None), Err(QueryError::InvalidInput(_))));
    }

    #[test]
    fn beyond_total_is_out_of_range() {
        let service = QueryService::new(BruteForceEnumerator::new());
        let raw = (TOTAL_MATCHES + 1).to_string();
        assert_eq!(
            service.handle(Some(&raw)),
            Err(QueryError::OutOfRange {
                requested: raw.clone(),
                total: TOTAL_MATCHES
            })
        );
    }

    #[test]
    fn cancelled_brute_force_query() {
        let service = QueryService::new(BruteForceEnumerator::new());
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(
            service.handle_cancellable(Some("5000000"), &token),
            Err(QueryError::Cancelled)
        );
    }

    #[test]
    fn answer_matches_handle() {
        let service = QueryService::with_kind(EnumeratorKind::Unranking);
        let token = CancellationToken::new();
        assert_eq!(
            service.answer_cancellable(11, &token),
            service.handle(Some("11"))
        );
        assert_eq!(
            service.answer_cancellable(TOTAL_MATCHES + 1, &token),
            Err(QueryError::OutOfRange {
                requested: (TOTAL_MATCHES + 1).to_string(),
                total: TOTAL_MATCHES
            })
        );
    }

    #[test]
    fn clones_share_enumerator() {
        let service = QueryService::with_kind(EnumeratorKind::Unranking);
        let clone = service.clone();
        assert_eq!(service.handle(Some("11")), clone.handle(Some("11")));
        assert_eq!(clone.enumerator_name(), "unranking");
    }
}
