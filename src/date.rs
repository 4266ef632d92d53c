use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::consts::{DAYS_PER_WEEK, PACKED_DAY_STRIDE};
use crate::{Calendar, CalendarError, ChronoField, ChronoUnit, Era, FieldValues, Period, ValueRange, iso};

/// A date in one calendar.
///
/// Holds the proleptic year, month and day together with the epoch day they
/// map to, so conversions and comparisons never recompute it. Every
/// operation returns a new date.
#[derive(Clone)]
pub struct CalendarDate {
    calendar:    Calendar,
    year:        i64,
    month:       u32,
    day:         u32,
    epoch_day:   i64,
    era:         Era,
    year_of_era: i64,
}

impl CalendarDate {
    /// Wraps already-validated components.
    pub(crate) fn new(calendar: Calendar, year: i64, month: u32, day: u32, epoch_day: i64) -> Result<Self, CalendarError> {
        let (era, year_of_era) = calendar.system().era_and_year_of_era(year, month, day)?;
        Ok(Self {
            calendar,
            year,
            month,
            day,
            epoch_day,
            era,
            year_of_era,
        })
    }

    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The proleptic year
    pub const fn year(&self) -> i64 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub const fn era(&self) -> Era {
        self.era
    }

    pub const fn year_of_era(&self) -> i64 {
        self.year_of_era
    }

    /// Days since 1970-01-01
    pub const fn epoch_day(&self) -> i64 {
        self.epoch_day
    }

    /// ISO day-of-week, Monday = 1 to Sunday = 7
    pub const fn day_of_week(&self) -> u32 {
        iso::day_of_week(self.epoch_day)
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn day_of_year(&self) -> Result<u32, CalendarError> {
        let first = self.calendar.system().epoch_day(self.year, 1, 1)?;
        // bounded by the year length
        Ok((self.epoch_day - first) as u32 + 1)
    }

    /// Months since month 1 of year 0.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedUnit` if the calendar has no fixed month count.
    pub fn proleptic_month(&self) -> Result<i64, CalendarError> {
        let months = self.fixed_months_per_year(ChronoUnit::Months)?;
        self.year
            .checked_mul(months)
            .and_then(|total| total.checked_add(i64::from(self.month) - 1))
            .ok_or(CalendarError::overflow("proleptic month"))
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn is_leap_year(&self) -> Result<bool, CalendarError> {
        self.calendar.is_leap_year(self.year)
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn length_of_month(&self) -> Result<u32, CalendarError> {
        self.calendar.month_length(self.year, self.month)
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn length_of_year(&self) -> Result<u32, CalendarError> {
        self.calendar.year_length(self.year)
    }

    /// The value of any date field.
    ///
    /// # Errors
    /// Fails when the calendar's data cannot be loaded, or for
    /// `ProlepticMonth` in a calendar without a fixed month count.
    pub fn get(&self, field: ChronoField) -> Result<i64, CalendarError> {
        let week_of = |day: u32| (i64::from(day) - 1) / DAYS_PER_WEEK + 1;
        let day_in_week = |day: u32| (i64::from(day) - 1) % DAYS_PER_WEEK + 1;
        Ok(match field {
            ChronoField::DayOfWeek => i64::from(self.day_of_week()),
            ChronoField::AlignedDayOfWeekInMonth => day_in_week(self.day),
            ChronoField::AlignedDayOfWeekInYear => day_in_week(self.day_of_year()?),
            ChronoField::DayOfMonth => i64::from(self.day),
            ChronoField::DayOfYear => i64::from(self.day_of_year()?),
            ChronoField::EpochDay => self.epoch_day,
            ChronoField::AlignedWeekOfMonth => week_of(self.day),
            ChronoField::AlignedWeekOfYear => week_of(self.day_of_year()?),
            ChronoField::MonthOfYear => i64::from(self.month),
            ChronoField::ProlepticMonth => self.proleptic_month()?,
            ChronoField::YearOfEra => self.year_of_era,
            ChronoField::Year => self.year,
            ChronoField::Era => i64::from(self.era.value()),
        })
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn plus_days(&self, days: i64) -> Result<Self, CalendarError> {
        if days == 0 {
            return Ok(self.clone());
        }
        let epoch_day = self
            .epoch_day
            .checked_add(days)
            .ok_or(CalendarError::overflow("plus days"))?;
        self.calendar.date_epoch_day(epoch_day)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, CalendarError> {
        let days = weeks
            .checked_mul(DAYS_PER_WEEK)
            .ok_or(CalendarError::overflow("plus weeks"))?;
        self.plus_days(days)
    }

    /// Adds months, clamping the day to the length of the target month.
    ///
    /// # Errors
    /// Fails if the target year lies outside the calendar's supported range.
    pub fn plus_months(&self, months: i64) -> Result<Self, CalendarError> {
        if months == 0 {
            return Ok(self.clone());
        }
        let per_year = self.fixed_months_per_year(ChronoUnit::Months)?;
        let target = self
            .proleptic_month()?
            .checked_add(months)
            .ok_or(CalendarError::overflow("plus months"))?;
        // rem_euclid of a positive divisor lies in 0..per_year
        let month = target.rem_euclid(per_year) as u32 + 1;
        self.resolve_previous_valid(target.div_euclid(per_year), month, self.day)
    }

    /// Adds years, clamping the day to the length of the target month.
    ///
    /// # Errors
    /// Fails if the target year lies outside the calendar's supported range.
    pub fn plus_years(&self, years: i64) -> Result<Self, CalendarError> {
        if years == 0 {
            return Ok(self.clone());
        }
        let year = self
            .year
            .checked_add(years)
            .ok_or(CalendarError::overflow("plus years"))?;
        self.resolve_previous_valid(year, self.month, self.day)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range, or
    /// for a month-based unit in a calendar without a fixed month count.
    pub fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, CalendarError> {
        let scaled = |factor: i64| {
            amount
                .checked_mul(factor)
                .ok_or(CalendarError::overflow("plus"))
        };
        match unit {
            ChronoUnit::Days => self.plus_days(amount),
            ChronoUnit::Weeks => self.plus_weeks(amount),
            ChronoUnit::Months => self.plus_months(amount),
            ChronoUnit::Years => self.plus_years(amount),
            ChronoUnit::Decades => self.plus_years(scaled(10)?),
            ChronoUnit::Centuries => self.plus_years(scaled(100)?),
            ChronoUnit::Millennia => self.plus_years(scaled(1000)?),
            ChronoUnit::Eras => {
                let value = i64::from(self.era.value())
                    .checked_add(amount)
                    .ok_or(CalendarError::overflow("plus eras"))?;
                let era = self.calendar.era_of(value)?;
                let year = self.calendar.proleptic_year(era, self.year_of_era)?;
                self.resolve_previous_valid(year, self.month, self.day)
            },
        }
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn minus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, CalendarError> {
        if amount == i64::MIN {
            return self.plus(i64::MAX, unit)?.plus(1, unit);
        }
        self.plus(-amount, unit)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn minus_days(&self, days: i64) -> Result<Self, CalendarError> {
        self.minus(days, ChronoUnit::Days)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, CalendarError> {
        self.minus(weeks, ChronoUnit::Weeks)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn minus_months(&self, months: i64) -> Result<Self, CalendarError> {
        self.minus(months, ChronoUnit::Months)
    }

    /// # Errors
    /// Fails if the result lies outside the calendar's supported range.
    pub fn minus_years(&self, years: i64) -> Result<Self, CalendarError> {
        self.minus(years, ChronoUnit::Years)
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the month has no such day.
    pub fn with_day_of_month(&self, day: u32) -> Result<Self, CalendarError> {
        self.calendar.date(self.year, self.month, day)
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn last_day_of_month(&self) -> Result<Self, CalendarError> {
        self.with_day_of_month(self.length_of_month()?)
    }

    /// The first date on or after this one falling on `day_of_week` (Monday = 1).
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for a weekday outside 1..=7,
    /// or if the result lies outside the calendar's supported range.
    pub fn next_or_same(&self, day_of_week: u32) -> Result<Self, CalendarError> {
        let target = ValueRange::of(1, DAYS_PER_WEEK).check_valid_value(i64::from(day_of_week), ChronoField::DayOfWeek)?;
        let current = i64::from(self.day_of_week());
        self.plus_days((target - current).rem_euclid(DAYS_PER_WEEK))
    }

    /// The amount of `unit` between this date and `end`, truncated toward zero.
    ///
    /// `end` is first converted into this date's calendar.
    ///
    /// # Errors
    /// Fails if `end` cannot be expressed in this calendar, or for a
    /// month-based unit in a calendar without a fixed month count.
    pub fn until(&self, end: &Self, unit: ChronoUnit) -> Result<i64, CalendarError> {
        let end = self.calendar.date_from(end)?;
        match unit {
            ChronoUnit::Days => Ok(end.epoch_day - self.epoch_day),
            ChronoUnit::Weeks => Ok((end.epoch_day - self.epoch_day) / DAYS_PER_WEEK),
            ChronoUnit::Eras => Ok(i64::from(end.era.value()) - i64::from(self.era.value())),
            ChronoUnit::Months | ChronoUnit::Years | ChronoUnit::Decades | ChronoUnit::Centuries | ChronoUnit::Millennia => {
                let per_year = self.fixed_months_per_year(unit)?;
                let months = end
                    .packed_month_day()?
                    .checked_sub(self.packed_month_day()?)
                    .ok_or(CalendarError::overflow("until"))?
                    / PACKED_DAY_STRIDE;
                let months_per_unit = unit
                    .months(per_year)
                    .ok_or(CalendarError::overflow("until"))?;
                Ok(months / months_per_unit)
            },
        }
    }

    /// The period between this date and `end` as years, months and days.
    ///
    /// # Errors
    /// Fails if `end` cannot be expressed in this calendar or the calendar
    /// has no fixed month count.
    pub fn until_period(&self, end: &Self) -> Result<Period, CalendarError> {
        let end = self.calendar.date_from(end)?;
        let per_year = self.fixed_months_per_year(ChronoUnit::Months)?;
        let mut total_months = end.proleptic_month()? - self.proleptic_month()?;
        let mut days = i64::from(end.day) - i64::from(self.day);
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let anchor = self.plus_months(total_months)?;
            days = end.epoch_day - anchor.epoch_day;
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i64::from(end.length_of_month()?);
        }
        Ok(self
            .calendar
            .period(total_months / per_year, total_months % per_year, days))
    }

    pub const fn is_before(&self, other: &Self) -> bool {
        self.epoch_day < other.epoch_day
    }

    pub const fn is_after(&self, other: &Self) -> bool {
        self.epoch_day > other.epoch_day
    }

    /// True if both dates fall on the same day, whatever their calendars
    pub const fn is_equal(&self, other: &Self) -> bool {
        self.epoch_day == other.epoch_day
    }

    /// Consumes the fields left over after resolution, checking each against this date.
    ///
    /// # Errors
    /// Returns `CalendarError::ConflictingFields` for the first leftover field
    /// whose value differs from the date's.
    pub fn cross_check(&self, fields: &mut FieldValues) -> Result<(), CalendarError> {
        for field in fields.fields() {
            let actual = self.get(field)?;
            match fields.remove(field) {
                Some(supplied) if supplied != actual => {
                    return Err(CalendarError::ConflictingFields {
                        field,
                        first: supplied,
                        second: actual,
                    });
                },
                _ => {},
            }
        }
        Ok(())
    }

    fn packed_month_day(&self) -> Result<i64, CalendarError> {
        self.proleptic_month()?
            .checked_mul(PACKED_DAY_STRIDE)
            .and_then(|packed| packed.checked_add(i64::from(self.day)))
            .ok_or(CalendarError::overflow("until"))
    }

    fn fixed_months_per_year(&self, unit: ChronoUnit) -> Result<i64, CalendarError> {
        self.calendar
            .months_per_year()
            .map(i64::from)
            .ok_or_else(|| CalendarError::UnsupportedUnit {
                unit,
                calendar: self.calendar.id().to_owned(),
            })
    }

    fn resolve_previous_valid(&self, year: i64, month: u32, day: u32) -> Result<Self, CalendarError> {
        let length = self.calendar.month_length(year, month)?;
        self.calendar.date(year, month, day.min(length))
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarDate")
            .field("calendar", &self.calendar.id())
            .field("year", &self.year)
            .field("month", &self.month)
            .field("day", &self.day)
            .field("epoch_day", &self.epoch_day)
            .finish()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{:02}-{:02}",
            self.calendar, self.era, self.year_of_era, self.month, self.day
        )
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.epoch_day == other.epoch_day && self.calendar == other.calendar
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.calendar.hash(state);
        self.epoch_day.hash(state);
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    /// Timeline order, then calendar id for the same day in different calendars
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_day
            .cmp(&other.epoch_day)
            .then_with(|| self.calendar.id().cmp(other.calendar.id()))
    }
}
