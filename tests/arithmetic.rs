use civil_calendar::{
    Calendar, CalendarDate, CalendarError, CalendarSystem, ChronoField, ChronoUnit, Era, OffsetCalendar, ValueRange,
};

fn iso(year: i64, month: u32, day: u32) -> CalendarDate {
    Calendar::iso().date(year, month, day).expect("valid ISO date")
}

#[test]
fn test_until_across_calendars_matches_converted() {
    let units = [ChronoUnit::Days, ChronoUnit::Weeks, ChronoUnit::Months, ChronoUnit::Years, ChronoUnit::Decades];
    let start = Calendar::japanese().date(1990, 3, 31).expect("Heisei 2 is valid");
    let ends = [iso(2024, 2, 29), iso(1990, 4, 1), iso(1975, 12, 31)];

    for end in &ends {
        let converted = Calendar::japanese().date_from(end).expect("Japanese covers the end date");
        for unit in units {
            assert_eq!(
                start.until(end, unit),
                start.until(&converted, unit),
                "{start} until {end} in {unit}"
            );
        }
    }
}

#[test]
fn test_plus_then_minus_restores() {
    let calendars = [Calendar::iso(), Calendar::japanese(), Calendar::minguo(), Calendar::thai_buddhist()];
    for calendar in &calendars {
        let date = calendar.date_from(&iso(2001, 7, 4)).expect("calendar covers 2001");
        for weeks in [-520, -1, 0, 1, 52] {
            let moved = date.plus_weeks(weeks).expect("inside range");
            assert_eq!(moved.minus_weeks(weeks), Ok(date.clone()), "{calendar} {weeks}");
        }
    }
}

#[test]
fn test_plus_months_never_fails_on_day_overflow() {
    let date = iso(2024, 1, 31);
    for months in -24..=24 {
        let moved = date.plus_months(months).expect("day overflow is clamped");
        let length = moved.length_of_month().expect("ISO month length");
        assert_eq!(moved.day(), 31.min(length), "{months} months");
    }
}

#[test]
fn test_until_with_unsupported_calendar() {
    /// ISO days, but without a fixed number of months per year.
    #[derive(Debug)]
    struct Irregular(OffsetCalendar);

    impl CalendarSystem for Irregular {
        fn id(&self) -> &str {
            "Irregular"
        }

        fn calendar_type(&self) -> Option<&str> {
            None
        }

        fn eras(&self) -> &[Era] {
            self.0.eras()
        }

        fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, CalendarError> {
            self.0.proleptic_year(era, year_of_era)
        }

        fn era_and_year_of_era(&self, year: i64, month: u32, day: u32) -> Result<(Era, i64), CalendarError> {
            self.0.era_and_year_of_era(year, month, day)
        }

        fn months_per_year(&self) -> Option<u32> {
            None
        }

        fn is_leap_year(&self, year: i64) -> Result<bool, CalendarError> {
            self.0.is_leap_year(year)
        }

        fn month_length(&self, year: i64, month: u32) -> Result<u32, CalendarError> {
            self.0.month_length(year, month)
        }

        fn year_length(&self, year: i64) -> Result<u32, CalendarError> {
            self.0.year_length(year)
        }

        fn epoch_day(&self, year: i64, month: u32, day: u32) -> Result<i64, CalendarError> {
            self.0.epoch_day(year, month, day)
        }

        fn ymd_from_epoch_day(&self, epoch_day: i64) -> Result<(i64, u32, u32), CalendarError> {
            self.0.ymd_from_epoch_day(epoch_day)
        }

        fn range(&self, field: ChronoField) -> Result<ValueRange, CalendarError> {
            self.0.range(field)
        }
    }

    let calendar = Calendar::new(Irregular(OffsetCalendar::iso()));
    let start = calendar.date(2024, 1, 1).expect("valid date");
    let end = calendar.date(2024, 6, 1).expect("valid date");

    assert_eq!(start.until(&end, ChronoUnit::Days), Ok(152));
    assert_eq!(
        start.until(&end, ChronoUnit::Months),
        Err(CalendarError::UnsupportedUnit {
            unit:     ChronoUnit::Months,
            calendar: String::from("Irregular"),
        })
    );
    assert!(start.plus_months(1).is_err());
    assert!(start.until_period(&end).is_err());

    let period = calendar.period(1, 14, 0);
    assert_eq!(period.normalized(), Ok(period.clone()));
    assert!(period.add_to(&start).is_err());

    let moved = calendar
        .period(1, 0, 10)
        .add_to(&start)
        .expect("years and days need no month count");
    assert_eq!((moved.year(), moved.month(), moved.day()), (2025, 1, 11));
}
