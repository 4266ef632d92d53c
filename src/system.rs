use std::fmt;

use crate::consts::{DAYS_PER_WEEK, JANUARY, MIN_DAY, MONTHS_PER_YEAR};
use crate::{CalendarError, ChronoField, Era, ValueRange, iso};

/// The capability set every calendar provides.
///
/// Implementations describe one calendar's rules (eras, leap years, month
/// lengths and the mapping to epoch days). Field resolution, date arithmetic
/// and periods are written once against this trait. Every method is fallible
/// so calendars backed by lazily loaded data can report a broken
/// configuration from any entry point.
pub trait CalendarSystem: fmt::Debug + Send + Sync {
    /// Unique identifier, e.g. `Japanese`
    fn id(&self) -> &str;

    /// CLDR calendar type, e.g. `japanese`, if the calendar has one
    fn calendar_type(&self) -> Option<&str>;

    /// Eras in ascending order
    fn eras(&self) -> &[Era];

    /// Looks up an era by its numeric tag.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if no era carries `value`.
    fn era_of(&self, value: i64) -> Result<Era, CalendarError> {
        self.eras()
            .iter()
            .copied()
            .find(|era| i64::from(era.value()) == value)
            .ok_or_else(|| CalendarError::FieldOutOfRange {
                field: ChronoField::Era,
                value,
                range: era_range(self.eras()),
            })
    }

    /// Converts a year-of-era into a proleptic year.
    ///
    /// # Errors
    /// Fails if `era` does not belong to this calendar or the year-of-era is not part of it.
    fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError>;

    /// The era and year-of-era a valid date falls in.
    ///
    /// # Errors
    /// Fails if the date is outside the calendar's supported range.
    fn era_and_year_of_era(&self, year: i64, month: u32, day: u32) -> Result<(Era, i64), CalendarError>;

    /// The number of months in every year, or `None` when it varies.
    ///
    /// Month-based differences and period normalization need a fixed count.
    fn months_per_year(&self) -> Option<u32> {
        Some(MONTHS_PER_YEAR)
    }

    /// # Errors
    /// Fails if the year is outside the supported range.
    fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError>;

    /// # Errors
    /// Fails if the year or month is outside the supported range.
    fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError>;

    /// # Errors
    /// Fails if the year is outside the supported range.
    fn year_length(&self, year: i64) -> Result<u32, CalendarError>;

    /// Epoch day of a date, validating every component.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for the first invalid component.
    fn epoch_day(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError>;

    /// The `(year, month, day)` of an epoch day.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the epoch day is not supported.
    fn ymd_from_epoch_day(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError>;

    /// The range of valid values for a field, independent of any particular date.
    ///
    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError>;
}

/// Range spanned by a list of eras in ascending order.
pub(crate) fn era_range(eras: &[Era]) -> ValueRange {
    match (eras.first(), eras.last()) {
        (Some(first), Some(last)) => ValueRange::of(i64::from(first.value()), i64::from(last.value())),
        _ => ValueRange::of(0, 0),
    }
}

/// Validates `(year, month, day)` against a calendar's year range and month lengths.
pub(crate) fn check_date<C: CalendarSystem + ?Sized>(
    calendar: &C,
    year: i64,
    month: u32,
    day: u32,
) -> Result<(), CalendarError> {
    calendar
        .range(ChronoField::Year)?
        .check_valid_value(year, ChronoField::Year)?;
    calendar
        .range(ChronoField::MonthOfYear)?
        .check_valid_value(i64::from(month), ChronoField::MonthOfYear)?;
    let length = calendar.month_length(year, month)?;
    ValueRange::of(i64::from(MIN_DAY), i64::from(length)).check_valid_value(i64::from(day), ChronoField::DayOfMonth)?;
    Ok(())
}

/// Ranges shared by every calendar built on Gregorian months.
///
/// `years` is the proleptic year range and `first_epoch_day` the earliest
/// supported day. Era-dependent fields are left to the caller.
pub(crate) fn gregorian_range(field: ChronoField, years: ValueRange, first_epoch_day: i64) -> ValueRange {
    let months = i64::from(MONTHS_PER_YEAR);
    match field {
        ChronoField::DayOfWeek | ChronoField::AlignedDayOfWeekInMonth | ChronoField::AlignedDayOfWeekInYear => {
            ValueRange::of(1, DAYS_PER_WEEK)
        },
        ChronoField::DayOfMonth => ValueRange::of_variable(1, 28, 31),
        ChronoField::DayOfYear => ValueRange::of_variable(1, 365, 366),
        ChronoField::AlignedWeekOfMonth => ValueRange::of_variable(1, 4, 5),
        ChronoField::AlignedWeekOfYear => ValueRange::of(1, 53),
        ChronoField::MonthOfYear => ValueRange::of(i64::from(JANUARY), months),
        ChronoField::ProlepticMonth => ValueRange::of(years.min() * months, years.max() * months + months - 1),
        ChronoField::EpochDay => {
            let (_, iso_max) = iso::year_bounds();
            let last = iso::epoch_day(iso_max, 12, 31).unwrap_or(i64::MAX);
            ValueRange::of(first_epoch_day, last)
        },
        ChronoField::Year | ChronoField::YearOfEra | ChronoField::Era => years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_range() {
        let eras = [Era::new(0, "BCE"), Era::new(1, "CE")];
        assert_eq!(era_range(&eras), ValueRange::of(0, 1));
        assert_eq!(era_range(&[]), ValueRange::of(0, 0));
    }

    #[test]
    fn test_gregorian_range_fixed_fields() {
        let years = ValueRange::of(1, 9999);
        assert_eq!(gregorian_range(ChronoField::MonthOfYear, years, 0), ValueRange::of(1, 12));
        assert_eq!(gregorian_range(ChronoField::DayOfWeek, years, 0), ValueRange::of(1, 7));
        assert_eq!(
            gregorian_range(ChronoField::DayOfMonth, years, 0),
            ValueRange::of_variable(1, 28, 31)
        );
        assert_eq!(
            gregorian_range(ChronoField::ProlepticMonth, years, 0),
            ValueRange::of(12, 9999 * 12 + 11)
        );
        assert_eq!(gregorian_range(ChronoField::Year, years, 0), years);
    }
}
