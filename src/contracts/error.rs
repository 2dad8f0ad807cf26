use thiserror::Error;

/// Errors raised by a [`MatchEnumerator`](crate::contracts::MatchEnumerator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid argument: ordinal must be at least 1")]
    InvalidArgument,

    #[error("Ordinal {requested} out of range: only {total} digit-distinct integers exist")]
    OutOfRange { requested: u64, total: u64 },

    #[error("Enumeration cancelled")]
    Cancelled,
}

/// Errors raised by the query boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ordinal {requested} out of range: only {total} digit-distinct integers exist")]
    OutOfRange { requested: String, total: u64 },

    #[error("Query cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SequenceError> for QueryError {
    fn from(e: SequenceError) -> Self {
        match e {
            // The boundary validates before calling in, so this only fires on a logic error.
            SequenceError::InvalidArgument => QueryError::InvalidInput(e.to_string()),
            SequenceError::OutOfRange { requested, total } => QueryError::OutOfRange {
                requested: requested.to_string(),
                total,
            },
            SequenceError::Cancelled => QueryError::Cancelled,
        }
    }
}
