//! A lunar calendar whose month lengths come from tabulated data.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::consts::{DAYS_PER_WEEK, MONTHS_PER_YEAR};
use crate::system::{CalendarSystem, era_range};
use crate::{CalendarError, ChronoField, Era, MonthTable, ValueRange, VariableCalendarConfig};

/// A calendar backed by a [`VariableCalendarConfig`].
///
/// Construction only stores the record. The month table is parsed and built
/// the first time any date, length or range is requested; racing callers all
/// observe the same table. A malformed record makes every later call fail
/// with the same `CalendarError::Configuration`.
#[derive(Debug)]
pub struct LunarCalendar {
    config: VariableCalendarConfig,
    table:  OnceLock<Result<MonthTable, CalendarError>>,
}

impl LunarCalendar {
    /// The single era, Anno Hegirae
    pub const AH: Era = Era::new(1, "AH");

    const ERAS: [Era; 1] = [Self::AH];

    pub const fn new(config: VariableCalendarConfig) -> Self {
        Self {
            config,
            table: OnceLock::new(),
        }
    }

    /// Version string of the tabulated data
    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub const fn config(&self) -> &VariableCalendarConfig {
        &self.config
    }

    /// The month table, building it on first use.
    ///
    /// # Errors
    /// Returns `CalendarError::Configuration` if the record is malformed.
    pub fn table(&self) -> Result<&MonthTable, CalendarError> {
        self.table
            .get_or_init(|| {
                let built = MonthTable::from_config(&self.config);
                match &built {
                    Ok(table) => debug!(
                        calendar = %self.config.id,
                        version = %self.config.version,
                        min_year = table.min_year(),
                        max_year = table.max_year(),
                        months = table.month_starts().len() - 1,
                        "built month table"
                    ),
                    Err(err) => warn!(calendar = %self.config.id, error = %err, "failed to build month table"),
                }
                built
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl CalendarSystem for LunarCalendar {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn calendar_type(&self) -> Option<&str> {
        Some(&self.config.calendar_type)
    }

    fn eras(&self) -> &[Era] {
        &Self::ERAS
    }

    fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError> {
        if era != Self::AH {
            return Err(CalendarError::FieldOutOfRange {
                field: ChronoField::Era,
                value: i64::from(era.value()),
                range: era_range(&Self::ERAS),
            });
        }
        Ok(year_of_era)
    }

    fn era_and_year_of_era(&self, year: i64, _month: u32, _day: u32) -> Result<(Era, i64), CalendarError> {
        let year = self
            .table()?
            .year_range()
            .check_valid_value(year, ChronoField::Year)?;
        Ok((Self::AH, year))
    }

    fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
        self.table()?.is_leap_year(year)
    }

    fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
        self.table()?.month_length(year, month)
    }

    fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
        self.table()?.year_length(year)
    }

    fn epoch_day(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError> {
        self.table()?.epoch_day_of(year, month, day)
    }

    fn ymd_from_epoch_day(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError> {
        self.table()?.date_of(epoch_day)
    }

    fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError> {
        let table = self.table()?;
        let weeks = |days: u32| (i64::from(days) + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK;
        let months = i64::from(MONTHS_PER_YEAR);
        Ok(match field {
            ChronoField::DayOfWeek | ChronoField::AlignedDayOfWeekInMonth | ChronoField::AlignedDayOfWeekInYear => {
                ValueRange::of(1, DAYS_PER_WEEK)
            },
            ChronoField::DayOfMonth => ValueRange::of_variable(
                1,
                i64::from(table.min_month_length()),
                i64::from(table.max_month_length()),
            ),
            ChronoField::DayOfYear => ValueRange::of_variable(
                1,
                i64::from(table.min_year_length()),
                i64::from(table.max_year_length()),
            ),
            ChronoField::AlignedWeekOfMonth => ValueRange::of_variable(
                1,
                weeks(table.min_month_length()),
                weeks(table.max_month_length()),
            ),
            ChronoField::AlignedWeekOfYear => ValueRange::of(1, weeks(table.max_year_length())),
            ChronoField::MonthOfYear => ValueRange::of(1, months),
            ChronoField::ProlepticMonth => {
                let overflow = || CalendarError::overflow("proleptic month range");
                let first = table.min_year().checked_mul(months).ok_or_else(overflow)?;
                let last = table
                    .max_year()
                    .checked_mul(months)
                    .and_then(|start| start.checked_add(months - 1))
                    .ok_or_else(overflow)?;
                ValueRange::of(first, last)
            },
            ChronoField::EpochDay => table.epoch_day_range(),
            ChronoField::YearOfEra | ChronoField::Year => table.year_range(),
            ChronoField::Era => era_range(&Self::ERAS),
        })
    }
}
