//! Challenge completion-rate math.
//!
//! The rate is a full recompute over all of a challenge's progress
//! records: the sum of each participant's recorded completions over the
//! sum of the days each participant could have completed, as a rounded
//! percentage.

use crate::types::Day;

/// Default cap, in days, on the per-participant possible-days denominator.
///
/// Bounds the denominator so very old participants don't dilute the rate
/// indefinitely. Overridable via `RATE_WINDOW_DAYS` in server config.
pub const DEFAULT_RATE_WINDOW_DAYS: i64 = 30;

/// Days a participant could have completed: from their start date through
/// `today` inclusive, clamped to `[1, window_days]`.
pub fn possible_days(start_date: Day, today: Day, window_days: i64) -> i64 {
    let elapsed = (today - start_date).num_days() + 1;
    elapsed.clamp(1, window_days.max(1))
}

/// Challenge-wide completion rate in percent, rounded to the nearest
/// integer and clamped to `[0, 100]`.
///
/// Zero possible days (a challenge with no participants) yields 0.
pub fn completion_rate(total_actual: i64, total_possible: i64) -> i32 {
    if total_possible <= 0 {
        return 0;
    }
    let rate = (100.0 * total_actual as f64 / total_possible as f64).round() as i32;
    rate.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn possible_days_counts_start_day() {
        let start = day(2026, 3, 1);
        assert_eq!(possible_days(start, start, DEFAULT_RATE_WINDOW_DAYS), 1);
        assert_eq!(
            possible_days(start, day(2026, 3, 5), DEFAULT_RATE_WINDOW_DAYS),
            5
        );
    }

    #[test]
    fn possible_days_is_capped_by_the_window() {
        let start = day(2026, 1, 1);
        assert_eq!(
            possible_days(start, day(2026, 6, 1), DEFAULT_RATE_WINDOW_DAYS),
            DEFAULT_RATE_WINDOW_DAYS
        );
        assert_eq!(possible_days(start, day(2026, 6, 1), 7), 7);
    }

    #[test]
    fn possible_days_never_below_one() {
        // A start date in the future still counts as one possible day.
        let start = day(2026, 3, 10);
        assert_eq!(possible_days(start, day(2026, 3, 1), 30), 1);
    }

    #[test]
    fn rate_is_zero_without_participants() {
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn rate_rounds_to_nearest_integer() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(30, 30), 100);
    }

    #[test]
    fn rate_stays_within_bounds() {
        // A participant older than the window can have more completions
        // than capped possible days; the rate still tops out at 100.
        assert_eq!(completion_rate(60, 30), 100);
        assert_eq!(completion_rate(0, 30), 0);
    }
}
