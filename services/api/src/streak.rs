//! Login streak computation

use chrono::{DateTime, Days, Utc};

/// Compute the streak that a login happening at `now` produces.
///
/// The streak counts consecutive calendar-day logins: a login on the day
/// after the previous one increments it, a gap of two or more days resets it
/// to zero, and repeat logins on the same day leave it unchanged. A user who
/// has never logged in keeps the stored value. Callers persist the result and
/// unconditionally set `last_login` to `now`.
pub fn next_streak(streak: i64, last_login: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(last) = last_login else {
        return streak;
    };

    let today = now.date_naive();
    let Some(day_after_last) = last.date_naive().checked_add_days(Days::new(1)) else {
        return streak;
    };

    if today == day_after_last {
        streak + 1
    } else if today > day_after_last {
        0
    } else {
        streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_first_ever_login_keeps_default() {
        assert_eq!(next_streak(0, None, at(2024, 5, 10, 9)), 0);
    }

    #[test]
    fn test_next_calendar_day_increments() {
        let last = at(2024, 5, 10, 23);
        let now = at(2024, 5, 11, 1);
        assert_eq!(next_streak(3, Some(last), now), 4);
    }

    #[test]
    fn test_same_day_repeat_login_is_unchanged() {
        let last = at(2024, 5, 10, 8);
        let now = at(2024, 5, 10, 22);
        assert_eq!(next_streak(3, Some(last), now), 3);
    }

    #[test]
    fn test_two_day_gap_resets_to_zero() {
        let last = at(2024, 5, 10, 12);
        let now = at(2024, 5, 12, 12);
        assert_eq!(next_streak(7, Some(last), now), 0);
    }

    #[test]
    fn test_long_gap_resets_to_zero() {
        let last = at(2024, 1, 1, 12);
        let now = at(2024, 5, 12, 12);
        assert_eq!(next_streak(100, Some(last), now), 0);
    }
}
