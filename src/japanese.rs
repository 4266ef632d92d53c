//! The Japanese imperial calendar: ISO months and years, named eras.

use crate::system::{CalendarSystem, check_date, gregorian_range};
use crate::{CalendarError, ChronoField, Era, ValueRange, iso};

/// First supported date, Meiji 6-01-01, when Japan adopted the Gregorian calendar.
const FIRST_SUPPORTED_DATE: (i64, u32, u32) = (1873, 1, 1);

/// Shortest completed era, in years (Taisho 1912..=1926)
const SHORTEST_ERA_YEARS: i64 = 15;

/// The Japanese calendar.
///
/// The proleptic year equals the ISO year. Each era starts on its accession
/// date and its year-of-era counts from 1 in the ISO year of that date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JapaneseCalendar;

impl JapaneseCalendar {
    pub const MEIJI: Era = Era::new(-1, "Meiji");
    pub const TAISHO: Era = Era::new(0, "Taisho");
    pub const SHOWA: Era = Era::new(1, "Showa");
    pub const HEISEI: Era = Era::new(2, "Heisei");
    pub const REIWA: Era = Era::new(3, "Reiwa");

    const ERAS: [Era; 5] = [Self::MEIJI, Self::TAISHO, Self::SHOWA, Self::HEISEI, Self::REIWA];

    /// ISO start date of each era in [`Self::ERAS`]
    const SINCE: [(i64, u32, u32); 5] = [(1868, 1, 1), (1912, 7, 30), (1926, 12, 25), (1989, 1, 8), (2019, 5, 1)];

    pub const fn new() -> Self {
        Self
    }

    /// ISO date on which `era` began
    pub fn era_start(era: Era) -> Option<(i64, u32, u32)> {
        Self::era_index(era).map(|index| Self::SINCE[index])
    }

    fn era_index(era: Era) -> Option<usize> {
        Self::ERAS.iter().position(|&candidate| candidate == era)
    }

    fn years() -> ValueRange {
        let (_, max) = iso::year_bounds();
        ValueRange::of(FIRST_SUPPORTED_DATE.0, max)
    }

    fn check_year(year: i64) -> Result<i64, CalendarError> {
        Self::years().check_valid_value(year, ChronoField::Year)
    }

    fn year_of_era_range() -> ValueRange {
        let (_, max) = iso::year_bounds();
        let last_start = Self::SINCE[Self::SINCE.len() - 1].0;
        ValueRange::of_variable(1, SHORTEST_ERA_YEARS, max - last_start + 1)
    }
}

impl CalendarSystem for JapaneseCalendar {
    fn id(&self) -> &str {
        "Japanese"
    }

    fn calendar_type(&self) -> Option<&str> {
        Some("japanese")
    }

    fn eras(&self) -> &[Era] {
        &Self::ERAS
    }

    fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError> {
        let index = Self::era_index(era).ok_or(CalendarError::FieldOutOfRange {
            field: ChronoField::Era,
            value: i64::from(era.value()),
            range: crate::system::era_range(&Self::ERAS),
        })?;
        let start = Self::SINCE[index].0;
        // an era's last year is the ISO year its successor began in
        let max_year_of_era = Self::SINCE
            .get(index + 1)
            .map_or(Self::year_of_era_range().max(), |next| next.0 - start + 1);
        ValueRange::of(1, max_year_of_era).check_valid_value(year_of_era, ChronoField::YearOfEra)?;
        Ok(start + year_of_era - 1)
    }

    fn era_and_year_of_era(&self, year: i64, month: u32, day: u32) -> Result<(Era, i64), CalendarError> {
        let date = (year, month, day);
        if date < FIRST_SUPPORTED_DATE {
            return Err(CalendarError::FieldOutOfRange {
                field: ChronoField::Year,
                value: year,
                range: Self::years(),
            });
        }
        Self::SINCE
            .iter()
            .zip(Self::ERAS)
            .rev()
            .find(|(since, _)| **since <= date)
            .map(|(since, era)| (era, year - since.0 + 1))
            .ok_or(CalendarError::FieldOutOfRange {
                field: ChronoField::Year,
                value: year,
                range: Self::years(),
            })
    }

    fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
        Ok(iso::is_leap_year(Self::check_year(year)?))
    }

    fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
        let year = Self::check_year(year)?;
        let month = ValueRange::of(1, 12).check_valid_u32(i64::from(month), ChronoField::MonthOfYear)?;
        Ok(iso::days_in_month(year, month))
    }

    fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
        Ok(iso::days_in_year(Self::check_year(year)?))
    }

    fn epoch_day(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError> {
        check_date(self, year, month, day)?;
        iso::epoch_day(year, month, day).ok_or(CalendarError::FieldOutOfRange {
            field: ChronoField::Year,
            value: year,
            range: Self::years(),
        })
    }

    fn ymd_from_epoch_day(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError> {
        let range = self.range(ChronoField::EpochDay)?;
        range.check_valid_value(epoch_day, ChronoField::EpochDay)?;
        iso::from_epoch_day(epoch_day).ok_or(CalendarError::FieldOutOfRange {
            field: ChronoField::EpochDay,
            value: epoch_day,
            range,
        })
    }

    fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError> {
        Ok(match field {
            ChronoField::YearOfEra => Self::year_of_era_range(),
            ChronoField::Era => crate::system::era_range(&Self::ERAS),
            _ => {
                let (year, month, day) = FIRST_SUPPORTED_DATE;
                let first_epoch_day = iso::epoch_day(year, month, day).unwrap_or(i64::MIN);
                gregorian_range(field, Self::years(), first_epoch_day)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_and_year_of_era_cases() {
        struct TestCase {
            date:        (i64, u32, u32),
            era:         Era,
            year_of_era: i64,
        }

        let cases = [
            TestCase {
                date:        (1873, 1, 1),
                era:         JapaneseCalendar::MEIJI,
                year_of_era: 6,
            },
            TestCase {
                date:        (1912, 7, 29),
                era:         JapaneseCalendar::MEIJI,
                year_of_era: 45,
            },
            TestCase {
                date:        (1912, 7, 30),
                era:         JapaneseCalendar::TAISHO,
                year_of_era: 1,
            },
            TestCase {
                date:        (1970, 1, 1),
                era:         JapaneseCalendar::SHOWA,
                year_of_era: 45,
            },
            TestCase {
                date:        (1989, 1, 7),
                era:         JapaneseCalendar::SHOWA,
                year_of_era: 64,
            },
            TestCase {
                date:        (1989, 1, 8),
                era:         JapaneseCalendar::HEISEI,
                year_of_era: 1,
            },
            TestCase {
                date:        (2019, 4, 30),
                era:         JapaneseCalendar::HEISEI,
                year_of_era: 31,
            },
            TestCase {
                date:        (2019, 5, 1),
                era:         JapaneseCalendar::REIWA,
                year_of_era: 1,
            },
        ];

        let calendar = JapaneseCalendar::new();
        for case in &cases {
            let (year, month, day) = case.date;
            assert_eq!(
                calendar.era_and_year_of_era(year, month, day),
                Ok((case.era, case.year_of_era)),
                "date {year}-{month:02}-{day:02}"
            );
        }
    }

    #[test]
    fn test_proleptic_year() {
        let calendar = JapaneseCalendar::new();
        assert_eq!(calendar.proleptic_year(JapaneseCalendar::HEISEI, 1), Ok(1989));
        assert_eq!(calendar.proleptic_year(JapaneseCalendar::HEISEI, 31), Ok(2019));
        assert_eq!(calendar.proleptic_year(JapaneseCalendar::SHOWA, 64), Ok(1989));
        assert_eq!(calendar.proleptic_year(JapaneseCalendar::REIWA, 6), Ok(2024));
    }

    #[test]
    fn test_proleptic_year_rejects_year_past_era_end() {
        let calendar = JapaneseCalendar::new();
        let err = calendar
            .proleptic_year(JapaneseCalendar::HEISEI, 32)
            .expect_err("Heisei ended in its 31st year");
        assert_eq!(
            err,
            CalendarError::FieldOutOfRange {
                field: ChronoField::YearOfEra,
                value: 32,
                range: ValueRange::of(1, 31),
            }
        );
        assert!(calendar.proleptic_year(JapaneseCalendar::TAISHO, 0).is_err());
    }

    #[test]
    fn test_dates_before_meiji_6_rejected() {
        let calendar = JapaneseCalendar::new();
        assert!(calendar.epoch_day(1872, 12, 31).is_err());
        assert!(calendar.era_and_year_of_era(1872, 12, 31).is_err());
        assert!(calendar.epoch_day(1873, 1, 1).is_ok());

        let first = iso::epoch_day(1873, 1, 1).expect("1873-01-01 is a valid ISO date");
        assert!(calendar.ymd_from_epoch_day(first - 1).is_err());
        assert_eq!(calendar.ymd_from_epoch_day(first), Ok((1873, 1, 1)));
    }

    #[test]
    fn test_ranges() {
        let calendar = JapaneseCalendar::new();
        assert_eq!(calendar.range(ChronoField::Era), Ok(ValueRange::of(-1, 3)));
        let year_of_era = calendar
            .range(ChronoField::YearOfEra)
            .expect("year-of-era range is always available");
        assert_eq!(year_of_era.min(), 1);
        assert_eq!(year_of_era.smallest_max(), 15);
        assert_eq!(
            calendar.range(ChronoField::Year).map(|range| range.min()),
            Ok(1873)
        );
    }

    #[test]
    fn test_era_start() {
        assert_eq!(JapaneseCalendar::era_start(JapaneseCalendar::REIWA), Some((2019, 5, 1)));
        assert_eq!(JapaneseCalendar::era_start(Era::new(1, "CE")), None);
    }
}
