//! Calendars that are the ISO calendar with a shifted year count.
//!
//! ISO, the Republic-era (Minguo) and the Buddhist-era calendars share month
//! lengths and leap years with ISO. They differ only in how far their year
//! numbering is shifted and in the names of their two eras, so one
//! implementation serves all three.

use crate::consts::{BUDDHIST_YEAR_OFFSET, MINGUO_YEAR_ZERO};
use crate::system::{CalendarSystem, check_date, gregorian_range};
use crate::{CalendarError, ChronoField, Era, ValueRange, iso};

/// An ISO-based calendar whose proleptic year is `iso_year - iso_offset`.
///
/// Proleptic years `>= 1` belong to the current era (value 1) and count up;
/// years `<= 0` belong to the previous era (value 0) and count backwards from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCalendar {
    id:            &'static str,
    calendar_type: &'static str,
    iso_offset:    i64,
    eras:          [Era; 2],
}

impl OffsetCalendar {
    pub const BCE: Era = Era::new(0, "BCE");
    pub const CE: Era = Era::new(1, "CE");
    pub const BEFORE_ROC: Era = Era::new(0, "BEFORE_ROC");
    pub const ROC: Era = Era::new(1, "ROC");
    pub const BEFORE_BE: Era = Era::new(0, "BEFORE_BE");
    pub const BE: Era = Era::new(1, "BE");

    /// The proleptic ISO calendar
    pub const fn iso() -> Self {
        Self {
            id:            "ISO",
            calendar_type: "iso8601",
            iso_offset:    0,
            eras:          [Self::BCE, Self::CE],
        }
    }

    /// The Republic-era calendar, year 1 = ISO 1912
    pub const fn minguo() -> Self {
        Self {
            id:            "Minguo",
            calendar_type: "roc",
            iso_offset:    MINGUO_YEAR_ZERO,
            eras:          [Self::BEFORE_ROC, Self::ROC],
        }
    }

    /// The Buddhist-era calendar, year 1 = ISO -542
    pub const fn thai_buddhist() -> Self {
        Self {
            id:            "ThaiBuddhist",
            calendar_type: "buddhist",
            iso_offset:    -BUDDHIST_YEAR_OFFSET,
            eras:          [Self::BEFORE_BE, Self::BE],
        }
    }

    const fn iso_year(&self, year: i64) -> i64 {
        year + self.iso_offset
    }

    fn years(&self) -> ValueRange {
        let (min, max) = iso::year_bounds();
        ValueRange::of(min - self.iso_offset, max - self.iso_offset)
    }

    fn first_epoch_day(&self) -> i64 {
        let (min, _) = iso::year_bounds();
        iso::epoch_day(min, 1, 1).unwrap_or(i64::MIN)
    }

    fn check_year(&self, year: i64) -> Result<i64, CalendarError> {
        self.years().check_valid_value(year, ChronoField::Year)
    }
}

impl CalendarSystem for OffsetCalendar {
    fn id(&self) -> &str {
        self.id
    }

    fn calendar_type(&self) -> Option<&str> {
        Some(self.calendar_type)
    }

    fn eras(&self) -> &[Era] {
        &self.eras
    }

    fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError> {
        let [before, current] = self.eras;
        if era == current {
            Ok(year_of_era)
        } else if era == before {
            1_i64
                .checked_sub(year_of_era)
                .ok_or(CalendarError::overflow("proleptic year"))
        } else {
            Err(CalendarError::FieldOutOfRange {
                field: ChronoField::Era,
                value: i64::from(era.value()),
                range: ValueRange::of(i64::from(before.value()), i64::from(current.value())),
            })
        }
    }

    fn era_and_year_of_era(&self, year: i64, _month: u32, _day: u32) -> Result<(Era, i64), CalendarError> {
        let year = self.check_year(year)?;
        let [before, current] = self.eras;
        if year >= 1 {
            Ok((current, year))
        } else {
            Ok((before, 1 - year))
        }
    }

    fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
        Ok(iso::is_leap_year(self.iso_year(self.check_year(year)?)))
    }

    fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
        let year = self.check_year(year)?;
        let month = gregorian_range(ChronoField::MonthOfYear, self.years(), 0)
            .check_valid_u32(i64::from(month), ChronoField::MonthOfYear)?;
        Ok(iso::days_in_month(self.iso_year(year), month))
    }

    fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
        Ok(iso::days_in_year(self.iso_year(self.check_year(year)?)))
    }

    fn epoch_day(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError> {
        check_date(self, year, month, day)?;
        iso::epoch_day(self.iso_year(year), month, day).ok_or_else(|| CalendarError::FieldOutOfRange {
            field: ChronoField::Year,
            value: year,
            range: self.years(),
        })
    }

    fn ymd_from_epoch_day(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError> {
        let range = self.range(ChronoField::EpochDay)?;
        range.check_valid_value(epoch_day, ChronoField::EpochDay)?;
        let (iso_year, month, day) = iso::from_epoch_day(epoch_day).ok_or(CalendarError::FieldOutOfRange {
            field: ChronoField::EpochDay,
            value: epoch_day,
            range,
        })?;
        Ok((iso_year - self.iso_offset, month, day))
    }

    fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError> {
        let years = self.years();
        Ok(match field {
            ChronoField::YearOfEra => {
                let current_max = years.max();
                let before_max = 1 - years.min();
                ValueRange::of_variable(1, current_max.min(before_max), current_max.max(before_max))
            },
            ChronoField::Era => ValueRange::of(i64::from(self.eras[0].value()), i64::from(self.eras[1].value())),
            _ => gregorian_range(field, years, self.first_epoch_day()),
        })
    }
}
