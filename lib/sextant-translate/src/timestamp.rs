use chrono::{DateTime, Datelike as _, SecondsFormat};
use sextant_model::Timestamp;
use snafu::OptionExt as _;

use crate::error::{InvalidTimestamp, TranslateError};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

// RFC 3339 only has room for four-digit years.
const MAX_YEAR: i32 = 9999;

/// Formats a timestamp as an RFC 3339 UTC string.
///
/// The result has second precision, followed by the nanoseconds as a fraction with trailing zeros removed, followed by
/// `Z`. A timestamp with zero nanoseconds has no fractional part at all:
///
/// - `(0, 0)` becomes `1970-01-01T00:00:00Z`
/// - `(0, 500_000_000)` becomes `1970-01-01T00:00:00.5Z`
/// - `(0, 1)` becomes `1970-01-01T00:00:00.000000001Z`
///
/// # Errors
///
/// If the seconds are negative, the nanoseconds are outside of `0..=999_999_999`, or the timestamp lies beyond the
/// year 9999, an error is returned.
pub fn format_timestamp(timestamp: Timestamp) -> Result<String, TranslateError> {
    let seconds = timestamp.seconds();
    let nanos = timestamp.nanos();
    if seconds < 0 || !(0..NANOS_PER_SECOND).contains(&nanos) {
        return InvalidTimestamp { seconds, nanos }.fail();
    }

    let datetime = DateTime::from_timestamp(seconds, 0)
        .filter(|datetime| datetime.year() <= MAX_YEAR)
        .context(InvalidTimestamp { seconds, nanos })?;

    let mut formatted = datetime.to_rfc3339_opts(SecondsFormat::Secs, true);
    if nanos != 0 {
        // Splice the fraction in before the trailing zone marker.
        let fraction = format!("{:09}", nanos);
        formatted.insert_str(formatted.len() - 1, &format!(".{}", fraction.trim_end_matches('0')));
    }

    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn format(seconds: i64, nanos: i64) -> String {
        format_timestamp(Timestamp::new(seconds, nanos)).unwrap()
    }

    #[test]
    fn epoch() {
        assert_eq!(format(0, 0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn fraction_trimmed() {
        assert_eq!(format(0, 500_000_000), "1970-01-01T00:00:00.5Z");
        assert_eq!(format(0, 120_000_000), "1970-01-01T00:00:00.12Z");
        assert_eq!(format(0, 1), "1970-01-01T00:00:00.000000001Z");
        assert_eq!(format(0, 999_999_999), "1970-01-01T00:00:00.999999999Z");
        assert_eq!(format(0, 10), "1970-01-01T00:00:00.00000001Z");
    }

    #[test]
    fn realistic() {
        assert_eq!(format(1_546_300_800, 0), "2019-01-01T00:00:00Z");
        assert_eq!(format(1_546_300_800 + 3_661, 250_000), "2019-01-01T01:01:01.00025Z");
    }

    #[test]
    fn latest_accepted_second() {
        // 9999-12-31T23:59:59Z
        assert_eq!(format(253_402_300_799, 0), "9999-12-31T23:59:59Z");
    }

    #[test]
    fn invalid_timestamps() {
        let invalid = [
            (-1, 0),
            (0, -1),
            (0, NANOS_PER_SECOND),
            (253_402_300_800, 0),
            (i64::MAX, 0),
        ];

        for (seconds, nanos) in invalid {
            let result = format_timestamp(Timestamp::new(seconds, nanos));
            assert!(
                matches!(result, Err(TranslateError::InvalidTimestamp { seconds: s, nanos: n }) if s == seconds && n == nanos),
                "expected ({}, {}) to be rejected, got {:?}",
                seconds,
                nanos,
                result
            );
        }
    }

    proptest! {
        #[test]
        fn property_test_shape(seconds in 0i64..253_402_300_800, nanos in 0i64..NANOS_PER_SECOND) {
            let formatted = format(seconds, nanos);
            let whole = format(seconds, 0);

            prop_assert!(formatted.ends_with('Z'));
            prop_assert_eq!(&formatted[..19], whole.trim_end_matches('Z'));

            match formatted[19..formatted.len() - 1].strip_prefix('.') {
                None => prop_assert_eq!(nanos, 0),
                Some(fraction) => {
                    prop_assert!(!fraction.is_empty() && fraction.len() <= 9);
                    prop_assert!(!fraction.ends_with('0'));

                    let padded = format!("{:0<9}", fraction);
                    prop_assert_eq!(padded.parse::<i64>().unwrap(), nanos);
                }
            }
        }
    }
}
