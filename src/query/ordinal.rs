use std::num::IntErrorKind;

use crate::contracts::QueryError;
use crate::sequence::TOTAL_MATCHES;

/// Parses a raw ordinal parameter.
///
/// Missing, blank, non-numeric, zero and negative values are `InvalidInput`.
/// A digit string too large for `i64` is still a well-formed positive integer,
/// so it is reported as `OutOfRange`. Trailing garbage such as `"10abc"` or `"2.5"`
/// is rejected rather than truncated to its numeric prefix.
pub fn parse_ordinal(raw: Option<&str>) -> Result<u64, QueryError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| QueryError::InvalidInput("missing ordinal parameter 'n'".into()))?;

    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n as u64),
        Ok(n) => Err(QueryError::InvalidInput(format!(
            "N must be a positive integer, got {}",
            n
        ))),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(QueryError::OutOfRange {
            requested: raw.to_string(),
            total: TOTAL_MATCHES,
        }),
        Err(_) => Err(QueryError::InvalidInput(format!(
            "N must be a positive integer, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(raw: Option<&str>) -> bool {
        matches!(parse_ordinal(raw), Err(QueryError::InvalidInput(_)))
    }

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_ordinal(Some("1")), Ok(1));
        assert_eq!(parse_ordinal(Some(" 42 ")), Ok(42));
        assert_eq!(parse_ordinal(Some("+7")), Ok(7));
    }

    #[test]
    fn rejects_missing_and_malformed() {
        assert!(is_invalid(None));
        assert!(is_invalid(Some("")));
        assert!(is_invalid(Some("   ")));
        assert!(is_invalid(Some("abc")));
        assert!(is_invalid(Some("1.5")));
        assert!(is_invalid(Some("10abc")));
        assert!(is_invalid(Some("2.5")));
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(is_invalid(Some("0")));
        assert!(is_invalid(Some("-5")));
        assert!(is_invalid(Some("-99999999999999999999999")));
    }

    #[test]
    fn huge_positive_is_out_of_range() {
        assert_eq!(
            parse_ordinal(Some("99999999999999999999999")),
            Err(QueryError::OutOfRange {
                requested: "99999999999999999999999".into(),
                total: TOTAL_MATCHES
            })
        );
    }
}
