//! Record timestamps
//!
//! Entities carry `created_at` / `updated_at` audit columns. Timestamps are kept
//! at microsecond precision so values survive a round trip through PostgreSQL
//! unchanged, and every mutation must move `updated_at` strictly forward.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Returns the current time truncated to microsecond precision
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Returns a timestamp strictly later than `previous`
///
/// Uses the current time when the clock has moved past `previous`, otherwise
/// bumps `previous` by one microsecond.
pub fn advance_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = current_timestamp();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_current_timestamp_has_microsecond_precision() {
        let ts = current_timestamp();
        assert_eq!(ts.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_advance_from_future_timestamp_bumps_by_one_microsecond() {
        let future = current_timestamp() + Duration::hours(1);
        assert_eq!(advance_timestamp(future), future + Duration::microseconds(1));
    }
}
