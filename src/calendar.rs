use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::system::CalendarSystem;
use crate::{
    CalendarDate, CalendarError, ChronoField, Era, FieldResolver, FieldValues, JapaneseCalendar, LunarCalendar,
    OffsetCalendar, Period, ResolverStyle, ValueRange, VariableCalendarConfig,
};

/// A shared handle to one calendar system.
///
/// Cloning is cheap. Two handles are equal when their calendars share an id.
#[derive(Clone)]
pub struct Calendar(Arc<dyn CalendarSystem>);

impl Calendar {
    pub fn new<C: CalendarSystem + 'static>(system: C) -> Self {
        Self(Arc::new(system))
    }

    pub fn from_arc(system: Arc<dyn CalendarSystem>) -> Self {
        Self(system)
    }

    /// A lunar calendar driven by tabulated month lengths
    pub fn lunar(config: VariableCalendarConfig) -> Self {
        Self::new(LunarCalendar::new(config))
    }

    /// The proleptic ISO calendar
    pub fn iso() -> Self {
        static ISO: OnceLock<Calendar> = OnceLock::new();
        ISO.get_or_init(|| Self::new(OffsetCalendar::iso())).clone()
    }

    /// The Japanese imperial calendar
    pub fn japanese() -> Self {
        static JAPANESE: OnceLock<Calendar> = OnceLock::new();
        JAPANESE.get_or_init(|| Self::new(JapaneseCalendar::new())).clone()
    }

    /// The Republic-era calendar
    pub fn minguo() -> Self {
        static MINGUO: OnceLock<Calendar> = OnceLock::new();
        MINGUO.get_or_init(|| Self::new(OffsetCalendar::minguo())).clone()
    }

    /// The Buddhist-era calendar
    pub fn thai_buddhist() -> Self {
        static THAI_BUDDHIST: OnceLock<Calendar> = OnceLock::new();
        THAI_BUDDHIST
            .get_or_init(|| Self::new(OffsetCalendar::thai_buddhist()))
            .clone()
    }

    pub fn system(&self) -> &dyn CalendarSystem {
        self.0.as_ref()
    }

    pub fn id(&self) -> &str {
        self.0.id()
    }

    pub fn calendar_type(&self) -> Option<&str> {
        self.0.calendar_type()
    }

    pub fn eras(&self) -> &[Era] {
        self.0.eras()
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if no era carries `value`.
    pub fn era_of(&self, value: i64) -> Result<Era, CalendarError> {
        self.0.era_of(value)
    }

    /// # Errors
    /// Fails if `era` is foreign or the year-of-era lies outside it.
    pub fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError> {
        self.0.proleptic_year(era, year_of_era)
    }

    pub fn months_per_year(&self) -> Option<u32> {
        self.0.months_per_year()
    }

    /// # Errors
    /// Fails if the year is outside the supported range.
    pub fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
        self.0.is_leap_year(year)
    }

    /// # Errors
    /// Fails if the year or month is outside the supported range.
    pub fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
        self.0.month_length(year, month)
    }

    /// # Errors
    /// Fails if the year is outside the supported range.
    pub fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
        self.0.year_length(year)
    }

    /// # Errors
    /// Fails only when the calendar's data cannot be loaded.
    pub fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError> {
        self.0.range(field)
    }

    /// Builds a date from a proleptic year, month and day.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` for the first invalid component.
    pub fn date(&self, year: i64, month: u32, day: u32) -> Result<CalendarDate, CalendarError> {
        let epoch_day = self.0.epoch_day(year, month, day)?;
        CalendarDate::new(self.clone(), year, month, day, epoch_day)
    }

    /// Builds a date from an era, year-of-era, month and day.
    ///
    /// # Errors
    /// Fails if the era is foreign to this calendar, any component is invalid,
    /// or the date does not fall inside `era`.
    pub fn date_era(&self, era: Era, year_of_era: i64, month: u32, day: u32) -> Result<CalendarDate, CalendarError> {
        let date = self.date(self.0.proleptic_year(era, year_of_era)?, month, day)?;
        self.check_era(&date, era, year_of_era)?;
        Ok(date)
    }

    /// Builds a date from a proleptic year and day-of-year.
    ///
    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the day-of-year exceeds the year's length.
    pub fn date_year_day(&self, year: i64, day_of_year: u32) -> Result<CalendarDate, CalendarError> {
        let length = self.0.year_length(year)?;
        ValueRange::of(1, i64::from(length)).check_valid_value(i64::from(day_of_year), ChronoField::DayOfYear)?;
        let first = self.0.epoch_day(year, 1, 1)?;
        self.date_epoch_day(first + i64::from(day_of_year) - 1)
    }

    /// # Errors
    /// Fails if the era is foreign to this calendar, the day-of-year is
    /// invalid, or the date does not fall inside `era`.
    pub fn date_era_year_day(&self, era: Era, year_of_era: i64, day_of_year: u32) -> Result<CalendarDate, CalendarError> {
        let date = self.date_year_day(self.0.proleptic_year(era, year_of_era)?, day_of_year)?;
        self.check_era(&date, era, year_of_era)?;
        Ok(date)
    }

    /// Rejects a date built from `era` and `year_of_era` that landed in another era.
    pub(crate) fn check_era(&self, date: &CalendarDate, era: Era, year_of_era: i64) -> Result<(), CalendarError> {
        if date.era() == era {
            return Ok(());
        }
        Err(CalendarError::FieldOutOfRange {
            field: ChronoField::YearOfEra,
            value: year_of_era,
            range: self.0.range(ChronoField::YearOfEra)?,
        })
    }

    /// # Errors
    /// Returns `CalendarError::FieldOutOfRange` if the epoch day is not supported.
    pub fn date_epoch_day(&self, epoch_day: i64) -> Result<CalendarDate, CalendarError> {
        let (year, month, day) = self.0.ymd_from_epoch_day(epoch_day)?;
        CalendarDate::new(self.clone(), year, month, day, epoch_day)
    }

    /// The same day as `other`, expressed in this calendar.
    ///
    /// # Errors
    /// Fails if this calendar does not cover `other`'s epoch day.
    pub fn date_from(&self, other: &CalendarDate) -> Result<CalendarDate, CalendarError> {
        if other.calendar() == self {
            return Ok(other.clone());
        }
        self.date_epoch_day(other.epoch_day())
    }

    /// Resolves a bag of fields into a date, consuming the fields it uses.
    ///
    /// Returns `Ok(None)` when the remaining fields do not form a complete
    /// date; the bag then still holds them.
    ///
    /// # Errors
    /// Returns `ConflictingFields`, `FieldOutOfRange` or, under
    /// [`ResolverStyle::Strict`], `AmbiguousComposition`.
    pub fn resolve_date(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<Option<CalendarDate>, CalendarError> {
        FieldResolver::new(self, style).resolve(fields)
    }

    pub fn period(&self, years: i64, months: i64, days: i64) -> Period {
        Period::new(self.clone(), years, months, days)
    }
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Calendar").field(&self.id()).finish()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.id() == other.id()
    }
}

impl Eq for Calendar {}

impl Hash for Calendar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
