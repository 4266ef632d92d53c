use std::fmt;

use crate::{Calendar, CalendarDate, CalendarError, ChronoUnit};

/// A signed amount of years, months and days in one calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    calendar: Calendar,
    years:    i64,
    months:   i64,
    days:     i64,
}

impl Period {
    pub(crate) const fn new(calendar: Calendar, years: i64, months: i64, days: i64) -> Self {
        Self {
            calendar,
            years,
            months,
            days,
        }
    }

    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub const fn years(&self) -> i64 {
        self.years
    }

    pub const fn months(&self) -> i64 {
        self.months
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    /// The units this period is made of
    pub const fn units() -> [ChronoUnit; 3] {
        [ChronoUnit::Years, ChronoUnit::Months, ChronoUnit::Days]
    }

    /// # Errors
    /// Returns `CalendarError::UnsupportedUnit` for any unit but years, months and days.
    pub fn get(&self, unit: ChronoUnit) -> Result<i64, CalendarError> {
        match unit {
            ChronoUnit::Years => Ok(self.years),
            ChronoUnit::Months => Ok(self.months),
            ChronoUnit::Days => Ok(self.days),
            _ => Err(CalendarError::UnsupportedUnit {
                unit,
                calendar: self.calendar.id().to_owned(),
            }),
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// # Errors
    /// Returns `CalendarMismatch` if `other` belongs to another calendar, or `Overflow`.
    pub fn plus(&self, other: &Self) -> Result<Self, CalendarError> {
        self.check_calendar(&other.calendar)?;
        let add = |a: i64, b: i64| a.checked_add(b).ok_or(CalendarError::overflow("period plus"));
        Ok(Self::new(
            self.calendar.clone(),
            add(self.years, other.years)?,
            add(self.months, other.months)?,
            add(self.days, other.days)?,
        ))
    }

    /// # Errors
    /// Returns `CalendarMismatch` if `other` belongs to another calendar, or `Overflow`.
    pub fn minus(&self, other: &Self) -> Result<Self, CalendarError> {
        self.check_calendar(&other.calendar)?;
        let sub = |a: i64, b: i64| a.checked_sub(b).ok_or(CalendarError::overflow("period minus"));
        Ok(Self::new(
            self.calendar.clone(),
            sub(self.years, other.years)?,
            sub(self.months, other.months)?,
            sub(self.days, other.days)?,
        ))
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` if any component overflows.
    pub fn multiplied_by(&self, scalar: i64) -> Result<Self, CalendarError> {
        if self.is_zero() || scalar == 1 {
            return Ok(self.clone());
        }
        let mul = |a: i64| a.checked_mul(scalar).ok_or(CalendarError::overflow("period multiply"));
        Ok(Self::new(
            self.calendar.clone(),
            mul(self.years)?,
            mul(self.months)?,
            mul(self.days)?,
        ))
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` if a component is `i64::MIN`.
    pub fn negated(&self) -> Result<Self, CalendarError> {
        self.multiplied_by(-1)
    }

    /// Rebalances years and months so `|months|` is below the months in a year.
    ///
    /// Calendars without a fixed month count return the period unchanged.
    /// Days are never touched.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the month total overflows.
    pub fn normalized(&self) -> Result<Self, CalendarError> {
        let Some(per_year) = self.calendar.months_per_year().map(i64::from) else {
            return Ok(self.clone());
        };
        let total = self
            .years
            .checked_mul(per_year)
            .and_then(|months| months.checked_add(self.months))
            .ok_or(CalendarError::overflow("period normalize"))?;
        Ok(Self::new(
            self.calendar.clone(),
            total / per_year,
            total % per_year,
            self.days,
        ))
    }

    /// Adds this period to a date of the same calendar.
    ///
    /// # Errors
    /// Returns `CalendarMismatch` for a date of another calendar, or any error
    /// of the underlying date arithmetic.
    pub fn add_to(&self, date: &CalendarDate) -> Result<CalendarDate, CalendarError> {
        self.check_calendar(date.calendar())?;
        let mut result = match self.total_months()? {
            Some(months) if months != 0 => date.plus_months(months)?,
            Some(_) => date.clone(),
            None => date.plus_years(self.years)?.plus_months(self.months)?,
        };
        if self.days != 0 {
            result = result.plus_days(self.days)?;
        }
        Ok(result)
    }

    /// Subtracts this period from a date of the same calendar.
    ///
    /// # Errors
    /// Returns `CalendarMismatch` for a date of another calendar, or any error
    /// of the underlying date arithmetic.
    pub fn subtract_from(&self, date: &CalendarDate) -> Result<CalendarDate, CalendarError> {
        self.check_calendar(date.calendar())?;
        let mut result = match self.total_months()? {
            Some(months) if months != 0 => date.minus_months(months)?,
            Some(_) => date.clone(),
            None => date.minus_years(self.years)?.minus_months(self.months)?,
        };
        if self.days != 0 {
            result = result.minus_days(self.days)?;
        }
        Ok(result)
    }

    /// Years and months flattened into months, when the month count is fixed
    fn total_months(&self) -> Result<Option<i64>, CalendarError> {
        self.calendar
            .months_per_year()
            .map(|per_year| {
                self.years
                    .checked_mul(i64::from(per_year))
                    .and_then(|months| months.checked_add(self.months))
                    .ok_or(CalendarError::overflow("period months"))
            })
            .transpose()
    }

    fn check_calendar(&self, other: &Calendar) -> Result<(), CalendarError> {
        if &self.calendar == other {
            Ok(())
        } else {
            Err(CalendarError::CalendarMismatch {
                expected: self.calendar.id().to_owned(),
                found:    other.id().to_owned(),
            })
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "{} P0D", self.calendar);
        }
        write!(f, "{} P", self.calendar)?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}
