pub mod cancellation;
pub mod error;
pub mod query;
pub mod sequence;

pub use cancellation::{CancelOnDrop, CancellationToken};
pub use error::{QueryError, SequenceError};
pub use query::{QueryResponse, QUERY_DESCRIPTION};
pub use sequence::MatchEnumerator;
