//! Field resolution: turning a bag of possibly redundant fields into one date.
//!
//! The resolver runs a fixed sequence of steps, removing every field it
//! interprets from the bag:
//!
//! 1. an epoch day short-circuits everything else;
//! 2. a proleptic month is split into year and month-of-year;
//! 3. year-of-era and era are combined into a year;
//! 4. the first complete field combination, in priority order, builds the date.
//!
//! Derived values are merged with [`FieldValues::add`], so a derived value
//! that disagrees with a supplied one fails with `ConflictingFields` whatever
//! the style.

use tracing::trace;

use crate::consts::DAYS_PER_WEEK;
use crate::{Calendar, CalendarDate, CalendarError, ChronoField, ChronoUnit, FieldValues, ResolverStyle};

use ChronoField::{
    AlignedDayOfWeekInMonth, AlignedDayOfWeekInYear, AlignedWeekOfMonth, AlignedWeekOfYear, DayOfMonth, DayOfWeek,
    DayOfYear, EpochDay, Era, MonthOfYear, ProlepticMonth, Year, YearOfEra,
};

/// Resolves field bags against one calendar under one style.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    calendar: &'a Calendar,
    style:    ResolverStyle,
}

impl<'a> FieldResolver<'a> {
    pub const fn new(calendar: &'a Calendar, style: ResolverStyle) -> Self {
        Self { calendar, style }
    }

    pub const fn style(&self) -> ResolverStyle {
        self.style
    }

    /// Resolves `fields` into a date.
    ///
    /// Returns `Ok(None)` when no complete field combination is present. The
    /// fields that were not used stay in the bag.
    ///
    /// # Errors
    /// Returns `ConflictingFields` when two values for one field disagree,
    /// `FieldOutOfRange` when a checked field is out of bounds, and under
    /// [`ResolverStyle::Strict`] `AmbiguousComposition` when an aligned-week
    /// composition leaves the requested month or year.
    #[tracing::instrument(level = "debug", skip_all, fields(calendar = %self.calendar.id(), style = %self.style))]
    pub fn resolve(&self, fields: &mut FieldValues) -> Result<Option<CalendarDate>, CalendarError> {
        if let Some(epoch_day) = fields.remove(EpochDay) {
            trace!(epoch_day, "resolved from epoch day");
            return self.calendar.date_epoch_day(epoch_day).map(Some);
        }
        self.resolve_proleptic_month(fields)?;
        let requested_era = self.resolve_year_of_era(fields)?;
        if !fields.contains(Year) {
            return Ok(None);
        }

        let date = if let Some([year, month, day]) = take_all(fields, [Year, MonthOfYear, DayOfMonth]) {
            trace!("resolving year, month, day-of-month");
            self.resolve_ymd(year, month, day)?
        } else if let Some([year, day]) = take_all(fields, [Year, DayOfYear]) {
            trace!("resolving year, day-of-year");
            self.resolve_yd(year, day)?
        } else if let Some([year, month, week, day]) =
            take_all(fields, [Year, MonthOfYear, AlignedWeekOfMonth, AlignedDayOfWeekInMonth])
        {
            trace!("resolving year, month, aligned week and day of month");
            self.resolve_ymaa(year, month, week, day)?
        } else if let Some([year, month, week, dow]) =
            take_all(fields, [Year, MonthOfYear, AlignedWeekOfMonth, DayOfWeek])
        {
            trace!("resolving year, month, aligned week, day-of-week");
            self.resolve_ymad(year, month, week, dow)?
        } else if let Some([year, week, day]) = take_all(fields, [Year, AlignedWeekOfYear, AlignedDayOfWeekInYear]) {
            trace!("resolving year, aligned week and day of year");
            self.resolve_yaa(year, week, day)?
        } else if let Some([year, week, dow]) = take_all(fields, [Year, AlignedWeekOfYear, DayOfWeek]) {
            trace!("resolving year, aligned week of year, day-of-week");
            self.resolve_yad(year, week, dow)?
        } else {
            trace!(remaining = fields.len(), "no complete field combination");
            return Ok(None);
        };
        if let Some((era, year_of_era)) = requested_era {
            self.check_requested_era(&date, era, year_of_era)?;
        }
        Ok(Some(date))
    }

    fn resolve_proleptic_month(&self, fields: &mut FieldValues) -> Result<(), CalendarError> {
        let Some(proleptic_month) = fields.remove(ProlepticMonth) else {
            return Ok(());
        };
        if self.style != ResolverStyle::Lenient {
            self.check(ProlepticMonth, proleptic_month)?;
        }
        let per_year = self
            .calendar
            .months_per_year()
            .map(i64::from)
            .ok_or_else(|| CalendarError::UnsupportedUnit {
                unit:     ChronoUnit::Months,
                calendar: self.calendar.id().to_owned(),
            })?;
        fields.add(MonthOfYear, proleptic_month.rem_euclid(per_year) + 1)?;
        fields.add(Year, proleptic_month.div_euclid(per_year))
    }

    /// Merges year-of-era into year, returning the era and year-of-era when both were supplied.
    fn resolve_year_of_era(&self, fields: &mut FieldValues) -> Result<Option<(crate::Era, i64)>, CalendarError> {
        let Some(year_of_era) = fields.remove(YearOfEra) else {
            if let Some(era) = fields.get(Era) {
                self.check(Era, era)?;
            }
            return Ok(None);
        };
        if self.style != ResolverStyle::Lenient {
            self.check(YearOfEra, year_of_era)?;
        }

        if let Some(era) = fields.remove(Era) {
            let era = self.calendar.era_of(self.check(Era, era)?)?;
            fields.add(Year, self.calendar.proleptic_year(era, year_of_era)?)?;
            return Ok(Some((era, year_of_era)));
        }

        if let Some(year) = fields.get(Year) {
            let era = if self.style == ResolverStyle::Strict {
                let year = self.check(Year, year)?;
                Some(self.calendar.system().era_and_year_of_era(year, 1, 1)?.0)
            } else {
                self.calendar
                    .system()
                    .era_and_year_of_era(year, 1, 1)
                    .map(|(era, _)| era)
                    .ok()
                    .or_else(|| self.calendar.eras().last().copied())
            };
            let year = match era {
                Some(era) => self.calendar.proleptic_year(era, year_of_era)?,
                None => year_of_era,
            };
            fields.add(Year, year)?;
            return Ok(None);
        }

        if self.style == ResolverStyle::Strict {
            // no era can be assumed, leave the field for a later attempt
            fields.insert(YearOfEra, year_of_era);
            return Ok(None);
        }
        let year = match self.calendar.eras().last() {
            Some(&era) => self.calendar.proleptic_year(era, year_of_era)?,
            None => year_of_era,
        };
        fields.add(Year, year)?;
        Ok(None)
    }

    /// Rejects a date outside the era it was requested in. SMART accepts a
    /// first year of era on either side, LENIENT accepts any era.
    fn check_requested_era(&self, date: &CalendarDate, era: crate::Era, year_of_era: i64) -> Result<(), CalendarError> {
        match self.style {
            ResolverStyle::Lenient => Ok(()),
            ResolverStyle::Smart if year_of_era == 1 || date.year_of_era() == 1 => Ok(()),
            ResolverStyle::Strict | ResolverStyle::Smart => self.calendar.check_era(date, era, year_of_era),
        }
    }

    fn resolve_ymd(&self, year: i64, month: i64, day: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            return self
                .first_of_year(year)?
                .plus_months(offset(month)?)?
                .plus_days(offset(day)?);
        }
        let month = self.check_u32(MonthOfYear, month)?;
        let day = self.check_u32(DayOfMonth, day)?;
        if self.style == ResolverStyle::Smart {
            let length = self.calendar.month_length(year, month)?;
            return self.calendar.date(year, month, day.min(length));
        }
        self.calendar.date(year, month, day)
    }

    fn resolve_yd(&self, year: i64, day_of_year: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            return self.first_of_year(year)?.plus_days(offset(day_of_year)?);
        }
        let day_of_year = self.check_u32(DayOfYear, day_of_year)?;
        self.calendar.date_year_day(year, day_of_year)
    }

    fn resolve_ymaa(&self, year: i64, month: i64, week: i64, day: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            return self
                .first_of_year(year)?
                .plus_months(offset(month)?)?
                .plus_weeks(offset(week)?)?
                .plus_days(offset(day)?);
        }
        let month = self.check_u32(MonthOfYear, month)?;
        let week = self.check(AlignedWeekOfMonth, week)?;
        let day = self.check(AlignedDayOfWeekInMonth, day)?;
        let date = self
            .calendar
            .date(year, month, 1)?
            .plus_days((week - 1) * DAYS_PER_WEEK + (day - 1))?;
        self.check_same_month(&date, month)?;
        Ok(date)
    }

    fn resolve_ymad(&self, year: i64, month: i64, week: i64, dow: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            let base = self
                .first_of_year(year)?
                .plus_months(offset(month)?)?
                .plus_weeks(offset(week)?)?;
            return next_or_same_lenient(&base, dow);
        }
        let month = self.check_u32(MonthOfYear, month)?;
        let week = self.check(AlignedWeekOfMonth, week)?;
        let dow = self.check_u32(DayOfWeek, dow)?;
        let date = self
            .calendar
            .date(year, month, 1)?
            .plus_days((week - 1) * DAYS_PER_WEEK)?
            .next_or_same(dow)?;
        self.check_same_month(&date, month)?;
        Ok(date)
    }

    fn resolve_yaa(&self, year: i64, week: i64, day: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            return self
                .first_of_year(year)?
                .plus_weeks(offset(week)?)?
                .plus_days(offset(day)?);
        }
        let week = self.check(AlignedWeekOfYear, week)?;
        let day = self.check(AlignedDayOfWeekInYear, day)?;
        let date = self
            .first_of_year(year)?
            .plus_days((week - 1) * DAYS_PER_WEEK + (day - 1))?;
        self.check_same_year(&date, year)?;
        Ok(date)
    }

    fn resolve_yad(&self, year: i64, week: i64, dow: i64) -> Result<CalendarDate, CalendarError> {
        let year = self.check(Year, year)?;
        if self.style == ResolverStyle::Lenient {
            let base = self.first_of_year(year)?.plus_weeks(offset(week)?)?;
            return next_or_same_lenient(&base, dow);
        }
        let week = self.check(AlignedWeekOfYear, week)?;
        let dow = self.check_u32(DayOfWeek, dow)?;
        let date = self
            .first_of_year(year)?
            .plus_days((week - 1) * DAYS_PER_WEEK)?
            .next_or_same(dow)?;
        self.check_same_year(&date, year)?;
        Ok(date)
    }

    fn first_of_year(&self, year: i64) -> Result<CalendarDate, CalendarError> {
        self.calendar.date(year, 1, 1)
    }

    fn check(&self, field: ChronoField, value: i64) -> Result<i64, CalendarError> {
        self.calendar.range(field)?.check_valid_value(value, field)
    }

    fn check_u32(&self, field: ChronoField, value: i64) -> Result<u32, CalendarError> {
        self.calendar.range(field)?.check_valid_u32(value, field)
    }

    fn check_same_month(&self, date: &CalendarDate, month: u32) -> Result<(), CalendarError> {
        if self.style == ResolverStyle::Strict && date.month() != month {
            return Err(CalendarError::AmbiguousComposition {
                field:     MonthOfYear,
                requested: i64::from(month),
                resolved:  i64::from(date.month()),
            });
        }
        Ok(())
    }

    fn check_same_year(&self, date: &CalendarDate, year: i64) -> Result<(), CalendarError> {
        if self.style == ResolverStyle::Strict && date.year() != year {
            return Err(CalendarError::AmbiguousComposition {
                field:     Year,
                requested: year,
                resolved:  date.year(),
            });
        }
        Ok(())
    }
}

/// Removes and returns all `keys` if every one is present, leaving the bag untouched otherwise.
fn take_all<const N: usize>(fields: &mut FieldValues, keys: [ChronoField; N]) -> Option<[i64; N]> {
    if !keys.iter().all(|&key| fields.contains(key)) {
        return None;
    }
    let mut values = [0; N];
    for (slot, key) in values.iter_mut().zip(keys) {
        *slot = fields.remove(key)?;
    }
    Some(values)
}

/// Zero-based offset of a one-based field value
fn offset(value: i64) -> Result<i64, CalendarError> {
    value
        .checked_sub(1)
        .ok_or(CalendarError::overflow("lenient field offset"))
}

/// Moves to the next-or-same weekday, folding weekdays outside 1..=7 into whole weeks.
fn next_or_same_lenient(base: &CalendarDate, dow: i64) -> Result<CalendarDate, CalendarError> {
    let zero_based = offset(dow)?;
    let weeks = zero_based.div_euclid(DAYS_PER_WEEK);
    // rem_euclid by 7 lies in 0..7
    let dow = zero_based.rem_euclid(DAYS_PER_WEEK) as u32 + 1;
    base.plus_weeks(weeks)?.next_or_same(dow)
}
