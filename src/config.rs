use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LUNAR_MONTH_LENGTH, MIN_LUNAR_MONTH_LENGTH, MONTHS_PER_YEAR};
use crate::{CalendarError, iso};

/// Month lengths of one tabulated year
pub type MonthLengths = [u32; MONTHS_PER_YEAR as usize];

/// The record describing a variable (tabulated) calendar.
///
/// Besides the four named keys, every other key is a decimal year mapped to
/// twelve whitespace-separated month lengths:
///
/// ```json
/// {
///   "id": "Hijrah-umalqura",
///   "type": "islamic-umalqura",
///   "version": "1.8",
///   "iso-start": "1882-11-12",
///   "1300": "30 29 30 30 29 30 29 30 29 30 29 29"
/// }
/// ```
///
/// The record is parsed lazily: nothing is validated until the calendar built
/// from it is first used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCalendarConfig {
    pub id:            String,
    #[serde(rename = "type")]
    pub calendar_type: String,
    pub version:       String,
    /// ISO date of the first day of the first tabulated year
    #[serde(rename = "iso-start")]
    pub iso_start:     String,
    #[serde(flatten)]
    pub years:         BTreeMap<String, String>,
}

impl VariableCalendarConfig {
    /// Builds a record from already-split month lengths.
    pub fn from_month_lengths<I>(
        id: impl Into<String>,
        calendar_type: impl Into<String>,
        iso_start: impl Into<String>,
        years: I,
    ) -> Self
    where
        I: IntoIterator<Item = (i64, MonthLengths)>,
    {
        let years = years
            .into_iter()
            .map(|(year, lengths)| {
                let text = lengths.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
                (year.to_string(), text)
            })
            .collect();
        Self {
            id: id.into(),
            calendar_type: calendar_type.into(),
            version: String::from("1"),
            iso_start: iso_start.into(),
            years,
        }
    }

    /// Epoch day of the `iso-start` anchor.
    ///
    /// # Errors
    /// Returns `CalendarError::Configuration` if the anchor is not a valid `YYYY-MM-DD` date.
    pub fn anchor_epoch_day(&self) -> Result<i64, CalendarError> {
        iso::parse_epoch_day(&self.iso_start).ok_or_else(|| {
            CalendarError::configuration(&self.id, format!("invalid iso-start date: {}", self.iso_start))
        })
    }

    /// Parses every year entry.
    ///
    /// # Errors
    /// Returns `CalendarError::Configuration` for a non-numeric year key, a
    /// wrong number of months, a non-numeric month length, or a month length
    /// outside 29..=32.
    pub fn month_lengths(&self) -> Result<BTreeMap<i64, MonthLengths>, CalendarError> {
        if self.id.trim().is_empty() {
            return Err(CalendarError::configuration("<unnamed>", "missing calendar id"));
        }
        if self.years.is_empty() {
            return Err(CalendarError::configuration(&self.id, "no year entries"));
        }
        self.years
            .iter()
            .map(|(key, value)| {
                let year = key
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| CalendarError::configuration(&self.id, format!("unknown key: {key}")))?;
                Ok((year, self.parse_year(year, value)?))
            })
            .collect()
    }

    fn parse_year(&self, year: i64, value: &str) -> Result<MonthLengths, CalendarError> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        if parts.len() != MONTHS_PER_YEAR as usize {
            return Err(CalendarError::configuration(
                &self.id,
                format!(
                    "year {year}: expected {MONTHS_PER_YEAR} month lengths, found {}",
                    parts.len()
                ),
            ));
        }

        let mut lengths = MonthLengths::default();
        for (slot, part) in lengths.iter_mut().zip(&parts) {
            let length = part.parse::<u32>().map_err(|_| {
                CalendarError::configuration(&self.id, format!("year {year}: invalid month length: {part}"))
            })?;
            if !(MIN_LUNAR_MONTH_LENGTH..=MAX_LUNAR_MONTH_LENGTH).contains(&length) {
                return Err(CalendarError::configuration(
                    &self.id,
                    format!(
                        "year {year}: month length {length} outside {MIN_LUNAR_MONTH_LENGTH}..={MAX_LUNAR_MONTH_LENGTH}"
                    ),
                ));
            }
            *slot = length;
        }
        Ok(lengths)
    }
}
