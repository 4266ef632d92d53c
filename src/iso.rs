//! Gregorian day-count primitives shared by the ISO-based calendars.
//!
//! Conversion between `(year, month, day)` and epoch days is delegated to
//! `chrono::NaiveDate`; only the leap rule and month lengths are computed here.

use chrono::{Datelike, NaiveDate};

use crate::consts::{
    CENTURY_CYCLE, DAYS_CE_TO_UNIX_EPOCH, DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MONTHS_PER_YEAR,
};

pub(crate) const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub(crate) const fn days_in_month(year: i64, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MONTHS_PER_YEAR);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub(crate) const fn days_in_year(year: i64) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Inclusive ISO year bounds whose every day chrono can represent.
pub(crate) fn year_bounds() -> (i64, i64) {
    (i64::from(NaiveDate::MIN.year()) + 1, i64::from(NaiveDate::MAX.year()) - 1)
}

/// Epoch day of a valid ISO date, `None` if the date does not exist.
pub(crate) fn epoch_day(year: i64, month: u32, day: u32) -> Option<i64> {
    let year = i32::try_from(year).ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(i64::from(date.num_days_from_ce()) - DAYS_CE_TO_UNIX_EPOCH)
}

/// ISO `(year, month, day)` of an epoch day, `None` outside chrono's range.
pub(crate) fn from_epoch_day(epoch_day: i64) -> Option<(i64, u32, u32)> {
    let days_from_ce = i32::try_from(epoch_day.checked_add(DAYS_CE_TO_UNIX_EPOCH)?).ok()?;
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce)?;
    Some((i64::from(date.year()), date.month(), date.day()))
}

/// Epoch day of an anchor written as `YYYY-MM-DD`.
pub(crate) fn parse_epoch_day(text: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), crate::consts::ISO_DATE_FORMAT).ok()?;
    Some(i64::from(date.num_days_from_ce()) - DAYS_CE_TO_UNIX_EPOCH)
}

/// ISO day-of-week of an epoch day, Monday = 1 to Sunday = 7.
///
/// Calendar-independent: 1970-01-01 was a Thursday.
pub(crate) const fn day_of_week(epoch_day: i64) -> u32 {
    // rem_euclid keeps the result in 0..7, so the cast is lossless
    ((epoch_day + 3).rem_euclid(DAYS_PER_WEEK) + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i64,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        0,
                is_leap:     true,
                description: "year zero",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "negative multiple of 4",
            },
            TestCase {
                year:        -100,
                is_leap:     false,
                description: "negative century",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2024), 366);
    }

    #[test]
    fn test_epoch_day_known_values() {
        assert_eq!(epoch_day(1970, 1, 1), Some(0));
        assert_eq!(epoch_day(1970, 1, 2), Some(1));
        assert_eq!(epoch_day(1969, 12, 31), Some(-1));
        assert_eq!(epoch_day(2000, 1, 1), Some(10_957));
        assert_eq!(epoch_day(2023, 2, 29), None);
    }

    #[test]
    fn test_from_epoch_day_known_values() {
        assert_eq!(from_epoch_day(0), Some((1970, 1, 1)));
        assert_eq!(from_epoch_day(10_957), Some((2000, 1, 1)));
        assert_eq!(from_epoch_day(-1), Some((1969, 12, 31)));
        assert_eq!(from_epoch_day(i64::MAX), None);
    }

    #[test]
    fn test_parse_epoch_day() {
        assert_eq!(parse_epoch_day("1970-01-01"), Some(0));
        assert_eq!(parse_epoch_day(" 2000-01-01 "), Some(10_957));
        assert_eq!(parse_epoch_day("2000-02-30"), None);
        assert_eq!(parse_epoch_day("yesterday"), None);
    }

    #[test]
    fn test_day_of_week() {
        // 1970-01-01 Thursday, 2000-01-01 Saturday, 1969-12-29 Monday
        assert_eq!(day_of_week(0), 4);
        assert_eq!(day_of_week(10_957), 6);
        assert_eq!(day_of_week(-3), 1);
        assert_eq!(day_of_week(-4), 7);
    }

    #[test]
    fn test_year_bounds_round_trip() {
        let (min, max) = year_bounds();
        assert!(min < 0 && max > 9999);
        let first = epoch_day(min, 1, 1).expect("min year must be representable");
        let last = epoch_day(max, 12, 31).expect("max year must be representable");
        assert_eq!(from_epoch_day(first), Some((min, 1, 1)));
        assert_eq!(from_epoch_day(last), Some((max, 12, 31)));
    }
}
