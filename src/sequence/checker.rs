/// Returns true iff no decimal digit of `candidate` repeats.
///
/// Candidates start at 1; single-digit values are trivially unique.
#[inline]
pub fn is_unique(candidate: u64) -> bool {
    debug_assert!(candidate >= 1, "candidates are positive integers");

    let mut seen: u16 = 0;
    let mut rest = candidate;
    loop {
        let bit = 1u16 << (rest % 10);
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
        rest /= 10;
        if rest == 0 {
            return true;
        }
    }
}
