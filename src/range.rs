use std::fmt;

use crate::{CalendarError, ChronoField};

/// The valid values of one field in one calendar.
///
/// A range may vary with context: a day-of-month is valid from 1 up to
/// somewhere between 28 and 31 in the ISO calendar, so the range records both
/// the smallest and the largest maximum (and likewise for the minimum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min:          i64,
    largest_min:  i64,
    smallest_max: i64,
    max:          i64,
}

impl ValueRange {
    /// A range with fixed bounds.
    pub const fn of(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self {
            min,
            largest_min: min,
            smallest_max: max,
            max,
        }
    }

    /// A range with a fixed minimum and a maximum that varies between `smallest_max` and `max`.
    pub const fn of_variable(min: i64, smallest_max: i64, max: i64) -> Self {
        debug_assert!(min <= smallest_max && smallest_max <= max);
        Self {
            min,
            largest_min: min,
            smallest_max,
            max,
        }
    }

    /// Returns the smallest valid value
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Returns the largest possible minimum
    pub const fn largest_min(&self) -> i64 {
        self.largest_min
    }

    /// Returns the smallest possible maximum
    pub const fn smallest_max(&self) -> i64 {
        self.smallest_max
    }

    /// Returns the largest valid value
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// True if neither bound varies
    pub const fn is_fixed(&self) -> bool {
        self.min == self.largest_min && self.smallest_max == self.max
    }

    /// True if `value` lies within the outer bounds
    pub const fn is_valid_value(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `value` unchanged when valid.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` naming `field` otherwise.
    pub fn check_valid_value(&self, value: i64, field: ChronoField) -> Result<i64, CalendarError> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(CalendarError::FieldOutOfRange {
                field,
                value,
                range: *self,
            })
        }
    }

    /// Like [`check_valid_value`](Self::check_valid_value), narrowed to `u32`
    /// for month and day fields whose range is known to be positive.
    pub(crate) fn check_valid_u32(&self, value: i64, field: ChronoField) -> Result<u32, CalendarError> {
        let value = self.check_valid_value(value, field)?;
        u32::try_from(value).map_err(|_| CalendarError::FieldOutOfRange {
            field,
            value,
            range: *self,
        })
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min)?;
        if self.min != self.largest_min {
            write!(f, "/{}", self.largest_min)?;
        }
        write!(f, " - {}", self.smallest_max)?;
        if self.smallest_max != self.max {
            write!(f, "/{}", self.max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_range() {
        let range = ValueRange::of(1, 12);
        assert!(range.is_fixed());
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), 12);
        assert_eq!(range.largest_min(), 1);
        assert_eq!(range.smallest_max(), 12);
    }

    #[test]
    fn test_variable_range() {
        let range = ValueRange::of_variable(1, 28, 31);
        assert!(!range.is_fixed());
        assert_eq!(range.smallest_max(), 28);
        assert_eq!(range.max(), 31);
    }

    #[test]
    fn test_is_valid_value_cases() {
        struct TestCase {
            value:       i64,
            is_valid:    bool,
            description: &'static str,
        }

        let range = ValueRange::of_variable(1, 28, 31);
        let cases = [
            TestCase {
                value:       0,
                is_valid:    false,
                description: "below minimum",
            },
            TestCase {
                value:       1,
                is_valid:    true,
                description: "minimum",
            },
            TestCase {
                value:       30,
                is_valid:    true,
                description: "between smallest and largest maximum",
            },
            TestCase {
                value:       31,
                is_valid:    true,
                description: "maximum",
            },
            TestCase {
                value:       32,
                is_valid:    false,
                description: "above maximum",
            },
        ];

        for case in &cases {
            assert_eq!(
                range.is_valid_value(case.value),
                case.is_valid,
                "value {} ({})",
                case.value,
                case.description
            );
        }
    }

    #[test]
    fn test_check_valid_value_error() {
        let range = ValueRange::of(1, 12);
        assert_eq!(range.check_valid_value(12, ChronoField::MonthOfYear), Ok(12));

        let err = range
            .check_valid_value(13, ChronoField::MonthOfYear)
            .expect_err("expected month 13 to be rejected");
        assert_eq!(
            err,
            CalendarError::FieldOutOfRange {
                field: ChronoField::MonthOfYear,
                value: 13,
                range,
            }
        );
    }

    #[test]
    fn test_check_valid_u32() {
        let range = ValueRange::of(1, 31);
        assert_eq!(range.check_valid_u32(31, ChronoField::DayOfMonth), Ok(31));
        assert!(range.check_valid_u32(-1, ChronoField::DayOfMonth).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueRange::of(1, 12).to_string(), "1 - 12");
        assert_eq!(ValueRange::of_variable(1, 28, 31).to_string(), "1 - 28/31");
    }
}
