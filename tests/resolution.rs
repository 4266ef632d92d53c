use civil_calendar::{
    Calendar, CalendarError, CalendarRegistry, ChronoField, FieldValues, JapaneseCalendar, ResolverStyle,
};

const STYLES: [ResolverStyle; 3] = [ResolverStyle::Strict, ResolverStyle::Smart, ResolverStyle::Lenient];

#[test]
fn test_resolve_through_registry() {
    let japanese = CalendarRegistry::global()
        .of("japanese")
        .expect("built-in calendar");
    let mut fields = FieldValues::new()
        .with(ChronoField::Era, i64::from(JapaneseCalendar::REIWA.value()))
        .with(ChronoField::YearOfEra, 1)
        .with(ChronoField::DayOfYear, 121);
    let date = japanese
        .resolve_date(&mut fields, ResolverStyle::Strict)
        .expect("Reiwa 1 day 121 is valid")
        .expect("fields are complete");
    assert_eq!((date.year(), date.month(), date.day()), (2019, 5, 1));
    assert_eq!(date.era(), JapaneseCalendar::REIWA);
    assert!(fields.is_empty());
}

#[test]
fn test_duplicate_year_conflicts_under_every_style() {
    for style in STYLES {
        let mut fields = FieldValues::new()
            .with(ChronoField::Year, 2000)
            .with(ChronoField::DayOfYear, 1);
        let err = fields
            .add(ChronoField::Year, 2001)
            .expect_err("second year value differs");
        assert_eq!(
            err,
            CalendarError::ConflictingFields {
                field:  ChronoField::Year,
                first:  2000,
                second: 2001,
            }
        );

        fields.insert(ChronoField::YearOfEra, 2001);
        fields.insert(ChronoField::Era, 1);
        let err = Calendar::iso()
            .resolve_date(&mut fields, style)
            .expect_err("era year differs from year");
        assert!(matches!(err, CalendarError::ConflictingFields { field: ChronoField::Year, .. }), "{style}");
    }
}

#[test]
fn test_try_from_pairs_detects_conflict() {
    let result = FieldValues::try_from_pairs([
        (ChronoField::Year, 2000),
        (ChronoField::MonthOfYear, 1),
        (ChronoField::Year, 2000),
        (ChronoField::Year, 1999),
    ]);
    assert!(matches!(result, Err(CalendarError::ConflictingFields { .. })));
}

#[test]
fn test_consistent_redundant_fields_agree_across_styles() {
    let calendar = Calendar::thai_buddhist();
    for style in STYLES {
        let mut fields = FieldValues::new()
            .with(ChronoField::Era, 1)
            .with(ChronoField::YearOfEra, 2567)
            .with(ChronoField::ProlepticMonth, 2567 * 12 + 6)
            .with(ChronoField::DayOfMonth, 15)
            .with(ChronoField::DayOfWeek, 1);
        let date = calendar
            .resolve_date(&mut fields, style)
            .expect("fields agree")
            .expect("fields are complete");
        assert_eq!((date.year(), date.month(), date.day()), (2567, 7, 15), "{style}");

        // the leftover day-of-week agrees: ISO 2024-07-15 is a Monday
        assert_eq!(fields.fields(), vec![ChronoField::DayOfWeek]);
        date.cross_check(&mut fields).expect("leftover fields agree");
        assert!(fields.is_empty());
    }
}

#[test]
fn test_strict_year_of_era_is_retried_with_era() {
    let calendar = Calendar::minguo();
    let mut fields = FieldValues::new()
        .with(ChronoField::YearOfEra, 113)
        .with(ChronoField::MonthOfYear, 7)
        .with(ChronoField::DayOfMonth, 15);
    assert_eq!(calendar.resolve_date(&mut fields, ResolverStyle::Strict), Ok(None));

    fields.insert(ChronoField::Era, 1);
    let date = calendar
        .resolve_date(&mut fields, ResolverStyle::Strict)
        .expect("era supplied")
        .expect("fields are complete");
    assert_eq!(date.to_string(), "Minguo ROC 113-07-15");
}

#[test]
fn test_out_of_range_field_reports_range() {
    let mut fields = FieldValues::new()
        .with(ChronoField::Year, 2024)
        .with(ChronoField::MonthOfYear, 13)
        .with(ChronoField::DayOfMonth, 1);
    let err = Calendar::iso()
        .resolve_date(&mut fields, ResolverStyle::Smart)
        .expect_err("month 13 does not exist");
    assert_eq!(err.to_string(), "Invalid value for MonthOfYear (valid values 1 - 12): 13");
}
