//! Size of the digit-distinct sequence.
//!
//! Only ten decimal digits exist, so no integer longer than ten digits can have
//! all-distinct digits and the sequence is finite.

use crate::contracts::SequenceError;

/// Longest possible digit-distinct integer, in digits.
pub const MAX_DIGITS: u32 = 10;

/// Upper bound on preview length.
pub const PREVIEW_LIMIT: u64 = 20;

/// Largest digit-distinct integer.
pub const MAX_MATCH: u64 = 9_876_543_210;

/// Number of ordered selections of `k` items out of `n`, `n! / (n - k)!`.
pub const fn permutations(n: u64, k: u64) -> u64 {
    let mut acc = 1;
    let mut i = 0;
    while i < k {
        acc *= n - i;
        i += 1;
    }
    acc
}

/// Count of digit-distinct integers with exactly `len` digits.
///
/// The leading digit has 9 choices (no zero), each following position picks from
/// the digits not used yet.
pub const fn matches_with_len(len: u32) -> u64 {
    if len == 0 || len > MAX_DIGITS {
        return 0;
    }
    9 * permutations(9, (len - 1) as u64)
}

/// Total count of digit-distinct integers.
pub const TOTAL_MATCHES: u64 = {
    let mut total = 0;
    let mut len = 1;
    while len <= MAX_DIGITS {
        total += matches_with_len(len);
        len += 1;
    }
    total
};

const _: () = assert!(TOTAL_MATCHES == 8_877_690);
const _: () = assert!(PREVIEW_LIMIT <= TOTAL_MATCHES);

/// Rejects ordinals that name no match.
#[inline]
pub fn check_ordinal(n: u64) -> Result<(), SequenceError> {
    if n == 0 {
        return Err(SequenceError::InvalidArgument);
    }
    if n > TOTAL_MATCHES {
        return Err(SequenceError::OutOfRange {
            requested: n,
            total: TOTAL_MATCHES,
        });
    }
    Ok(())
}

/// Length of the preview returned for ordinal `n`.
#[inline]
pub fn preview_len(n: u64) -> usize {
    n.min(PREVIEW_LIMIT) as usize
}
