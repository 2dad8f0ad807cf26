use serde::{Deserialize, Serialize};

/// Human-readable label attached to every successful query.
pub const QUERY_DESCRIPTION: &str = "N-th number in the sequence of integers without repeated digits";

/// Successful answer to an ordinal query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The requested ordinal.
    pub n: u64,
    /// The `n`-th digit-distinct integer.
    pub result: u64,
    /// The first `min(n, 20)` digit-distinct integers.
    pub sequence: Vec<u64>,
    pub description: String,
}
