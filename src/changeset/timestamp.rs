//! Normalized timestamp codec.
//!
//! Raw identity lines carry `<epoch-seconds> <tz-token>`. The normalized
//! form renders the epoch as a UTC clock time and appends the tz token
//! verbatim with no separator; the offset is *not* applied to the clock
//! fields. Downstream consumers depend on the literal string shape, so
//! that quirk is preserved rather than corrected.

use chrono::DateTime;
use thiserror::Error;

/// Returned by [`ChangeSet::timestamp_millis`](super::ChangeSet::timestamp_millis)
/// when the stored date string cannot be re-parsed.
pub const EPOCH_MILLIS_SENTINEL: i64 = -1;

/// Clock-field pattern of the normalized form.
const CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Normalized form with the trailing offset, for the reverse direction.
const CLOCK_TZ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A date string that did not match the normalized pattern.
#[derive(Debug, Error)]
#[error("date string is not in normalized form: {0}")]
pub struct TimestampError(#[from] chrono::ParseError);

/// Converts a raw `<epoch-seconds> <tz-token>` pair into the normalized
/// date string, e.g. `"0 +0000"` becomes `"1970-01-01T00:00:00+0000"`.
///
/// Returns `None` when the pair is malformed: no space, a non-numeric or
/// out-of-range epoch.
pub fn normalize(raw: &str) -> Option<String> {
    let (epoch, tz) = raw.split_once(' ')?;
    let secs: i64 = epoch.parse().ok()?;
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(format!("{}{tz}", utc.format(CLOCK_FORMAT)))
}

/// Re-parses a normalized date string into epoch milliseconds.
///
/// Accepts exactly the pattern produced by [`normalize`]. Unlike the
/// formatting direction, the trailing offset *is* interpreted here, so
/// the two directions only round-trip for `+0000` dates.
pub fn epoch_millis(date: &str) -> Result<i64, TimestampError> {
    let parsed = DateTime::parse_from_str(date, CLOCK_TZ_FORMAT)?;
    Ok(parsed.timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_normalizes_to_utc_with_literal_offset() {
        assert_eq!(
            normalize("0 +0000").as_deref(),
            Some("1970-01-01T00:00:00+0000")
        );
    }

    #[test]
    fn offset_is_appended_verbatim_not_applied() {
        // 1234567890 is 2009-02-13T23:31:30 UTC; the -0700 literal rides
        // along without shifting the clock fields.
        assert_eq!(
            normalize("1234567890 -0700").as_deref(),
            Some("2009-02-13T23:31:30-0700")
        );
    }

    #[test]
    fn malformed_pairs_normalize_to_none() {
        assert_eq!(normalize("1234567890"), None);
        assert_eq!(normalize("yesterday +0000"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn epoch_millis_round_trips_utc() {
        let date = normalize("0 +0000").unwrap();
        assert_eq!(epoch_millis(&date).unwrap(), 0);

        let date = normalize("86400 +0000").unwrap();
        assert_eq!(epoch_millis(&date).unwrap(), 86_400_000);
    }

    #[test]
    fn epoch_millis_rejects_unnormalized_strings() {
        assert!(epoch_millis("garbage").is_err());
        assert!(epoch_millis("1970-01-01 00:00:00").is_err());
        assert!(epoch_millis("").is_err());
    }
}
