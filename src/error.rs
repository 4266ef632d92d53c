use crate::{ChronoField, ChronoUnit, ValueRange};

/// Error type for calendar construction, arithmetic and field resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A field value lies outside the calendar's declared bounds.
    #[error("Invalid value for {field} (valid values {range}): {value}")]
    FieldOutOfRange {
        field: ChronoField,
        value: i64,
        range: ValueRange,
    },

    /// Two different values were derived for the same field.
    #[error("Conflict found: {field} {first} differs from {field} {second}")]
    ConflictingFields {
        field:  ChronoField,
        first:  i64,
        second: i64,
    },

    /// A strict aligned-week composition landed outside the requested month or year.
    #[error("Strict mode rejected resolved date as it is in a different {field}: requested {requested}, resolved {resolved}")]
    AmbiguousComposition {
        field:     ChronoField,
        requested: i64,
        resolved:  i64,
    },

    /// Tabulated calendar data is malformed.
    #[error("Invalid configuration for calendar {calendar}: {reason}")]
    Configuration { calendar: String, reason: String },

    /// A date or period of one calendar was applied to another.
    #[error("Calendar mismatch: expected {expected}, found {found}")]
    CalendarMismatch { expected: String, found: String },

    /// The unit cannot be used with this calendar.
    #[error("Unsupported unit {unit} for calendar {calendar}")]
    UnsupportedUnit { unit: ChronoUnit, calendar: String },

    /// Checked integer arithmetic overflowed.
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },
}

impl CalendarError {
    pub(crate) fn configuration(calendar: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            calendar: calendar.to_owned(),
            reason:   reason.into(),
        }
    }

    pub(crate) const fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_out_of_range_message() {
        let err = CalendarError::FieldOutOfRange {
            field: ChronoField::DayOfMonth,
            value: 32,
            range: ValueRange::of_variable(1, 28, 31),
        };
        assert_eq!(err.to_string(), "Invalid value for DayOfMonth (valid values 1 - 28/31): 32");
    }

    #[test]
    fn test_conflict_message() {
        let err = CalendarError::ConflictingFields {
            field:  ChronoField::Year,
            first:  2000,
            second: 2001,
        };
        assert_eq!(err.to_string(), "Conflict found: Year 2000 differs from Year 2001");
    }

    #[test]
    fn test_ambiguous_composition_message() {
        let err = CalendarError::AmbiguousComposition {
            field:     ChronoField::MonthOfYear,
            requested: 2,
            resolved:  3,
        };
        assert!(err.to_string().contains("different MonthOfYear"));
    }

    #[test]
    fn test_configuration_helper() {
        let err = CalendarError::configuration("Hijrah-test", "missing year 1301");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for calendar Hijrah-test: missing year 1301"
        );
    }

    #[test]
    fn test_error_is_send_sync_clone() {
        fn assert_impl<T: std::error::Error + Send + Sync + Clone>() {}
        assert_impl::<CalendarError>();
    }
}
