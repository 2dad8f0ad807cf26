use crate::contracts::{CancellationToken, MatchEnumerator, SequenceError};
use crate::sequence::bounds::{
    check_ordinal, matches_with_len, permutations, preview_len, MAX_DIGITS, TOTAL_MATCHES,
};

/// Builds the `n`-th digit-distinct integer directly, without walking.
///
/// The rank is first split into a digit length and an offset within that
/// length. Each position then picks the `offset / block`-th smallest unused
/// digit, where `block` is the number of ways to fill the positions after it.
pub fn unrank(n: u64) -> Result<u64, SequenceError> {
    check_ordinal(n)?;

    let (len, mut offset) = split_rank(n - 1);
    let mut used: u16 = 0;
    let mut value = 0u64;

    for position in 0..len {
        let block = permutations(9 - position as u64, (len - 1 - position) as u64);
        let skip = (offset / block) as usize;
        offset %= block;

        let first = if position == 0 { 1 } else { 0 };
        let digit = (first..10u64)
            .filter(|&d| used & (1 << d) == 0)
            .nth(skip)
            .ok_or(SequenceError::OutOfRange {
                requested: n,
                total: TOTAL_MATCHES,
            })?;

        used |= 1 << digit;
        value = value * 10 + digit;
    }

    Ok(value)
}

/// Splits a 0-based rank into `(digit length, 0-based offset within that length)`.
fn split_rank(mut rank: u64) -> (u32, u64) {
    let mut len = 1;
    while len < MAX_DIGITS && rank >= matches_with_len(len) {
        rank -= matches_with_len(len);
        len += 1;
    }
    (len, rank)
}

/// Constant-time enumerator built on [`unrank`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrankingEnumerator;

impl UnrankingEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl MatchEnumerator for UnrankingEnumerator {
    fn nth_cancellable(&self, n: u64, _cancel: &CancellationToken) -> Result<u64, SequenceError> {
        unrank(n)
    }

    fn preview(&self, n: u64) -> Result<Vec<u64>, SequenceError> {
        check_ordinal(n)?;
        (1..=preview_len(n) as u64).map(unrank).collect()
    }

    fn name(&self) -> &'static str {
        "unranking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::bounds::MAX_MATCH;

    #[test]
    fn small_ordinals() {
        assert_eq!(unrank(1).unwrap(), 1);
        assert_eq!(unrank(10).unwrap(), 10);
        assert_eq!(unrank(11).unwrap(), 12);
        assert_eq!(unrank(19).unwrap(), 20);
        assert_eq!(unrank(20).unwrap(), 21);
    }

    #[test]
    fn length_boundaries() {
        // 9 one-digit + 81 two-digit matches
        assert_eq!(unrank(90).unwrap(), 98);
        assert_eq!(unrank(91).unwrap(), 102);
        assert_eq!(unrank(738).unwrap(), 987);
        assert_eq!(unrank(739).unwrap(), 1023);
    }

    #[test]
    fn last_match_is_largest() {
        assert_eq!(unrank(TOTAL_MATCHES).unwrap(), MAX_MATCH);
        assert_eq!(unrank(TOTAL_MATCHES - 1).unwrap(), 9_876_543_201);
        assert_eq!(
            unrank(TOTAL_MATCHES - matches_with_len(10) + 1).unwrap(),
            1_023_456_789
        );
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            unrank(TOTAL_MATCHES + 1),
            Err(SequenceError::OutOfRange {
                requested: TOTAL_MATCHES + 1,
                total: TOTAL_MATCHES
            })
        );
        assert_eq!(unrank(0), Err(SequenceError::InvalidArgument));
    }

    #[test]
    fn split_rank_walks_lengths() {
        assert_eq!(split_rank(0), (1, 0));
        assert_eq!(split_rank(8), (1, 8));
        assert_eq!(split_rank(9), (2, 0));
        assert_eq!(split_rank(TOTAL_MATCHES - 1), (10, matches_with_len(10) - 1));
    }

    #[test]
    fn preview_matches_nth() {
        let e = UnrankingEnumerator::new();
        let preview = e.preview(15).unwrap();
        assert_eq!(preview.len(), 15);
        assert_eq!(*preview.last().unwrap(), e.nth(15).unwrap());
    }
}
