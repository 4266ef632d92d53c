//! Epoch-day index for calendars whose month lengths are tabulated.
//!
//! The table stores the epoch day on which every tabulated month starts, plus
//! one trailing entry for the day after the last month. Month `i` (counted
//! from the first month of the first year) is `starts[i + 1] - starts[i]` days
//! long, so date to epoch-day is one lookup and epoch-day to date is a binary
//! search.

use std::collections::BTreeMap;

use crate::config::MonthLengths;
use crate::consts::{LUNAR_COMMON_YEAR_LENGTH, MAX_LUNAR_MONTH_LENGTH, MIN_LUNAR_MONTH_LENGTH, MONTHS_PER_YEAR};
use crate::{CalendarError, ChronoField, ValueRange, VariableCalendarConfig};

const STRIDE: usize = MONTHS_PER_YEAR as usize;

/// Immutable month-start index built from tabulated month lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    min_year:         i64,
    max_year:         i64,
    starts:           Vec<i64>,
    min_month_length: u32,
    max_month_length: u32,
    min_year_length:  u32,
    max_year_length:  u32,
}

impl MonthTable {
    /// Builds the table for `min_year..=max_year`.
    ///
    /// `anchor_epoch_day` is the epoch day of the first day of `min_year`.
    ///
    /// # Errors
    /// Returns `CalendarError::Configuration` if the range is empty, a year in
    /// range is missing, a year outside the range is supplied, or a month
    /// length lies outside 29..=32.
    pub fn new(
        calendar: &str,
        min_year: i64,
        max_year: i64,
        years: &BTreeMap<i64, MonthLengths>,
        anchor_epoch_day: i64,
    ) -> Result<Self, CalendarError> {
        if min_year > max_year {
            return Err(CalendarError::configuration(
                calendar,
                format!("empty year range {min_year}..={max_year}"),
            ));
        }
        if let Some(stray) = years.keys().find(|&&year| year < min_year || year > max_year) {
            return Err(CalendarError::configuration(
                calendar,
                format!("year {stray} outside {min_year}..={max_year}"),
            ));
        }

        let span = max_year
            .checked_sub(min_year)
            .and_then(|diff| diff.checked_add(1))
            .and_then(|span| usize::try_from(span).ok())
            .ok_or_else(|| CalendarError::configuration(calendar, "year range too large"))?;
        if years.len() != span {
            return Err(CalendarError::configuration(
                calendar,
                format!("missing year {}", first_missing_year(years, min_year)),
            ));
        }
        let mut starts = Vec::with_capacity(span * STRIDE + 1);
        starts.push(anchor_epoch_day);

        let mut min_month_length = u32::MAX;
        let mut max_month_length = u32::MIN;
        let mut min_year_length = u32::MAX;
        let mut max_year_length = u32::MIN;
        let mut next_start = anchor_epoch_day;

        for year in min_year..=max_year {
            let lengths = years
                .get(&year)
                .ok_or_else(|| CalendarError::configuration(calendar, format!("missing year {year}")))?;
            let mut year_length = 0;
            for &length in lengths {
                if !(MIN_LUNAR_MONTH_LENGTH..=MAX_LUNAR_MONTH_LENGTH).contains(&length) {
                    return Err(CalendarError::configuration(
                        calendar,
                        format!("year {year}: month length {length} outside {MIN_LUNAR_MONTH_LENGTH}..={MAX_LUNAR_MONTH_LENGTH}"),
                    ));
                }
                min_month_length = min_month_length.min(length);
                max_month_length = max_month_length.max(length);
                year_length += length;
                next_start = next_start
                    .checked_add(i64::from(length))
                    .ok_or_else(|| CalendarError::configuration(calendar, "epoch day overflow"))?;
                starts.push(next_start);
            }
            min_year_length = min_year_length.min(year_length);
            max_year_length = max_year_length.max(year_length);
        }

        Ok(Self {
            min_year,
            max_year,
            starts,
            min_month_length,
            max_month_length,
            min_year_length,
            max_year_length,
        })
    }

    /// Builds the table described by a variable-calendar record, spanning its
    /// smallest to largest tabulated year.
    ///
    /// # Errors
    /// Returns `CalendarError::Configuration` for any malformed entry, a gap
    /// between years, or an invalid anchor date.
    pub fn from_config(config: &VariableCalendarConfig) -> Result<Self, CalendarError> {
        let years = config.month_lengths()?;
        let anchor = config.anchor_epoch_day()?;
        let (Some(&min_year), Some(&max_year)) = (years.keys().next(), years.keys().next_back()) else {
            return Err(CalendarError::configuration(&config.id, "no year entries"));
        };
        Self::new(&config.id, min_year, max_year, &years, anchor)
    }

    /// Epoch day of a tabulated date.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for the first component outside the table.
    pub fn epoch_day_of(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError> {
        let index = self.month_index(year, month)?;
        let length = self.length_at(index);
        ValueRange::of(1, i64::from(length)).check_valid_value(i64::from(day), ChronoField::DayOfMonth)?;
        Ok(self.starts[index] + i64::from(day) - 1)
    }

    /// The tabulated `(year, month, day)` of an epoch day.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the epoch day precedes the
    /// first tabulated day or follows the last.
    pub fn date_of(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError> {
        self.epoch_day_range()
            .check_valid_value(epoch_day, ChronoField::EpochDay)?;
        // greatest start <= epoch_day; the range check guarantees one exists below the trailing entry
        let index = self.starts.partition_point(|&start| start <= epoch_day) - 1;
        let year = self.min_year + (index / STRIDE) as i64;
        let month = (index % STRIDE) as u32 + 1;
        let day = (epoch_day - self.starts[index]) as u32 + 1;
        Ok((year, month, day))
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the year or month is not tabulated.
    pub fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
        Ok(self.length_at(self.month_index(year, month)?))
    }

    /// Sum of a year's twelve month lengths.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the year is not tabulated.
    pub fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
        let first = self.month_index(year, 1)?;
        // each year spans at most 12 * 32 days
        Ok((self.starts[first + STRIDE] - self.starts[first]) as u32)
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the year is not tabulated.
    pub fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
        Ok(self.year_length(year)? > LUNAR_COMMON_YEAR_LENGTH)
    }

    pub const fn min_year(&self) -> i64 {
        self.min_year
    }

    pub const fn max_year(&self) -> i64 {
        self.max_year
    }

    pub const fn min_month_length(&self) -> u32 {
        self.min_month_length
    }

    pub const fn max_month_length(&self) -> u32 {
        self.max_month_length
    }

    pub const fn min_year_length(&self) -> u32 {
        self.min_year_length
    }

    pub const fn max_year_length(&self) -> u32 {
        self.max_year_length
    }

    /// Epoch day of the first tabulated day
    pub fn first_epoch_day(&self) -> i64 {
        self.starts.first().copied().unwrap_or_default()
    }

    /// Epoch day following the last tabulated day
    pub fn last_epoch_day(&self) -> i64 {
        self.starts.last().copied().unwrap_or_default()
    }

    /// Month-start epoch days, one per tabulated month plus the trailing end
    pub fn month_starts(&self) -> &[i64] {
        &self.starts
    }

    pub const fn year_range(&self) -> ValueRange {
        ValueRange::of(self.min_year, self.max_year)
    }

    pub fn epoch_day_range(&self) -> ValueRange {
        ValueRange::of(self.first_epoch_day(), self.last_epoch_day() - 1)
    }

    fn month_index(&self, year: i64, month: u32) -> Result<usize, CalendarError> {
        self.year_range().check_valid_value(year, ChronoField::Year)?;
        ValueRange::of(1, i64::from(MONTHS_PER_YEAR)).check_valid_value(i64::from(month), ChronoField::MonthOfYear)?;
        // year and month are range-checked, so the offset is non-negative
        Ok((year - self.min_year) as usize * STRIDE + (month - 1) as usize)
    }

    fn length_at(&self, index: usize) -> u32 {
        // adjacent starts differ by a validated month length
        (self.starts[index + 1] - self.starts[index]) as u32
    }
}

/// First year at or after `min_year` without an entry. `years` holds no key below `min_year`.
fn first_missing_year(years: &BTreeMap<i64, MonthLengths>, min_year: i64) -> i64 {
    let mut expected = min_year;
    for &year in years.keys() {
        if year != expected {
            break;
        }
        expected = expected.saturating_add(1);
    }
    expected
}
