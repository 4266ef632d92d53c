use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// An era of one calendar: an ordered integer tag plus a stable identifier.
///
/// The value `1` is the era containing 1970-01-01 in every built-in calendar.
/// Eras are plain values; two eras are the same era when both tag and name match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{name}")]
#[serde(into = "i32")]
pub struct Era {
    value: i32,
    name:  &'static str,
}

impl Era {
    pub(crate) const fn new(value: i32, name: &'static str) -> Self {
        Self { value, name }
    }

    /// Returns the numeric era tag
    #[inline]
    pub const fn value(self) -> i32 {
        self.value
    }

    /// Returns the era identifier, e.g. `Heisei` or `CE`
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl From<Era> for i32 {
    fn from(era: Era) -> Self {
        era.value
    }
}

/// How redundant or out-of-range field values are reconciled during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverStyle {
    /// Every field is range-checked and aligned compositions must stay in the requested month/year.
    #[display(fmt = "STRICT")]
    Strict,
    /// Fields are range-checked, an overlong day-of-month is clamped to the last day of the month.
    #[default]
    #[display(fmt = "SMART")]
    Smart,
    /// Fields are applied as offsets from the start of the year and may overflow freely.
    #[display(fmt = "LENIENT")]
    Lenient,
}

/// Date-based units for arithmetic and differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ChronoUnit {
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
}

impl ChronoUnit {
    /// Number of months in one unit, for the month-based units
    pub(crate) const fn months(self, months_per_year: i64) -> Option<i64> {
        match self {
            Self::Months => Some(1),
            Self::Years => Some(months_per_year),
            Self::Decades => Some(months_per_year * 10),
            Self::Centuries => Some(months_per_year * 100),
            Self::Millennia => Some(months_per_year * 1000),
            Self::Days | Self::Weeks | Self::Eras => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_accessors() {
        let era = Era::new(2, "Heisei");
        assert_eq!(era.value(), 2);
        assert_eq!(era.name(), "Heisei");
        assert_eq!(era.to_string(), "Heisei");
    }

    #[test]
    fn test_era_ordering() {
        let taisho = Era::new(0, "Taisho");
        let showa = Era::new(1, "Showa");
        assert!(taisho < showa);
        assert_eq!(showa, Era::new(1, "Showa"));
    }

    #[test]
    fn test_era_into_i32() {
        let value: i32 = Era::new(-1, "Meiji").into();
        assert_eq!(value, -1);
    }

    #[test]
    fn test_era_serde() {
        let json = serde_json::to_string(&Era::new(1, "CE")).expect("failed to serialize era");
        assert_eq!(json, "1");
    }

    #[test]
    fn test_resolver_style_display() {
        assert_eq!(ResolverStyle::Strict.to_string(), "STRICT");
        assert_eq!(ResolverStyle::Smart.to_string(), "SMART");
        assert_eq!(ResolverStyle::Lenient.to_string(), "LENIENT");
        assert_eq!(ResolverStyle::default(), ResolverStyle::Smart);
    }

    #[test]
    fn test_resolver_style_serde() {
        let json = serde_json::to_string(&ResolverStyle::Lenient).expect("failed to serialize style");
        assert_eq!(json, r#""lenient""#);

        let parsed: ResolverStyle = serde_json::from_str(r#""strict""#).expect("failed to deserialize style");
        assert_eq!(parsed, ResolverStyle::Strict);
    }

    #[test]
    fn test_unit_months() {
        struct TestCase {
            unit:     ChronoUnit,
            expected: Option<i64>,
        }

        let cases = [
            TestCase { unit: ChronoUnit::Days, expected: None },
            TestCase { unit: ChronoUnit::Weeks, expected: None },
            TestCase { unit: ChronoUnit::Months, expected: Some(1) },
            TestCase { unit: ChronoUnit::Years, expected: Some(12) },
            TestCase { unit: ChronoUnit::Decades, expected: Some(120) },
            TestCase { unit: ChronoUnit::Centuries, expected: Some(1200) },
            TestCase { unit: ChronoUnit::Millennia, expected: Some(12000) },
            TestCase { unit: ChronoUnit::Eras, expected: None },
        ];

        for case in &cases {
            assert_eq!(case.unit.months(12), case.expected, "unit {}", case.unit);
        }
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(ChronoUnit::Months.to_string(), "Months");
    }
}
