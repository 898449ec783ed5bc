//! Randomized back-dated timestamps.

use rand::Rng;
use thiserror::Error;
use time::{
    Duration, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// How far back a generated post may be dated, in days (ten years).
pub const POST_BACKDATE_DAYS: i64 = 3650;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("inverted date range: lower bound {lower} is after upper bound {upper}")]
    Inverted {
        lower: OffsetDateTime,
        upper: OffsetDateTime,
    },
}

/// Draws a timestamp uniformly at random from `[lower, upper]` inclusive,
/// with one-second resolution.
///
/// An inverted range (`lower > upper`, e.g. a parent post somehow dated in
/// the future) is rejected rather than silently swapped or clamped.
pub fn random_between(
    lower: OffsetDateTime,
    upper: OffsetDateTime,
    rng: &mut impl Rng,
) -> Result<OffsetDateTime, DateRangeError> {
    if lower > upper {
        return Err(DateRangeError::Inverted { lower, upper });
    }

    let ts = rng.gen_range(lower.unix_timestamp()..=upper.unix_timestamp());
    Ok(OffsetDateTime::from_unix_timestamp(ts).expect("timestamp between two valid datetimes"))
}

/// Draws a publish timestamp for a post: uniform within the last ten years.
pub fn random_past_date(now: OffsetDateTime, rng: &mut impl Rng) -> OffsetDateTime {
    let lower = now - Duration::days(POST_BACKDATE_DAYS);
    random_between(lower, now, rng).expect("backdate window is never inverted")
}

/// Formats a timestamp as an absolute UTC `YYYY-MM-DD HH:MM:SS` string.
pub fn format_timestamp(t: OffsetDateTime) -> String {
    t.to_offset(UtcOffset::UTC)
        .format(&TIMESTAMP_FORMAT)
        .expect("formatting a UTC timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use time::macros::datetime;

    #[test]
    fn test_random_between_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let lower = datetime!(2020-01-01 00:00:00 UTC);
        let upper = datetime!(2024-06-15 12:30:00 UTC);

        for _ in 0..500 {
            let t = random_between(lower, upper, &mut rng).unwrap();
            assert!(t >= lower && t <= upper);
        }
    }

    #[test]
    fn test_degenerate_range_returns_the_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        let at = datetime!(2023-03-03 03:03:03 UTC);
        assert_eq!(random_between(at, at, &mut rng).unwrap(), at);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let lower = datetime!(2024-01-01 00:00:00 UTC);
        let upper = datetime!(2020-01-01 00:00:00 UTC);

        let err = random_between(lower, upper, &mut rng).unwrap_err();
        assert_eq!(err, DateRangeError::Inverted { lower, upper });
    }

    #[test]
    fn test_random_past_date_within_ten_years() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = datetime!(2026-01-01 00:00:00 UTC);

        for _ in 0..500 {
            let t = random_past_date(now, &mut rng);
            assert!(t <= now);
            assert!(t >= now - Duration::days(POST_BACKDATE_DAYS));
        }
    }

    #[test]
    fn test_format_timestamp() {
        let t = datetime!(2021-02-03 04:05:06 UTC);
        assert_eq!(format_timestamp(t), "2021-02-03 04:05:06");
    }

    #[test]
    fn test_format_timestamp_converts_to_utc() {
        let t = datetime!(2021-02-03 04:05:06 +02:00);
        assert_eq!(format_timestamp(t), "2021-02-03 02:05:06");
    }
}
