use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

use crate::{CalendarError, prelude::*};

/// A date-based field a calendar can resolve or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum ChronoField {
    /// ISO day-of-week, Monday = 1 to Sunday = 7
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    /// Days since 1970-01-01
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    /// `year * months_per_year + (month - 1)`
    ProlepticMonth,
    YearOfEra,
    /// The proleptic year
    Year,
    Era,
}

/// A bag of field values awaiting resolution.
///
/// The resolver removes each entry it interprets, so whatever is left after
/// resolution is exactly what it did not use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<ChronoField, i64>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert that overwrites any previous value.
    #[must_use]
    pub fn with(mut self, field: ChronoField, value: i64) -> Self {
        self.values.insert(field, value);
        self
    }

    /// Builds a bag, failing on the first field supplied twice with different values.
    ///
    /// # Errors
    /// Returns `CalendarError::ConflictingFields` on a conflicting duplicate.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = (ChronoField, i64)>,
    {
        let mut bag = Self::new();
        for (field, value) in pairs {
            bag.add(field, value)?;
        }
        Ok(bag)
    }

    /// Inserts or overwrites a value, returning the previous one.
    pub fn insert(&mut self, field: ChronoField, value: i64) -> Option<i64> {
        self.values.insert(field, value)
    }

    /// Merges a derived value into the bag.
    ///
    /// # Errors
    /// Returns `CalendarError::ConflictingFields` if the field already holds a different value.
    pub fn add(&mut self, field: ChronoField, value: i64) -> Result<(), CalendarError> {
        match self.values.get(&field) {
            Some(&first) if first != value => Err(CalendarError::ConflictingFields {
                field,
                first,
                second: value,
            }),
            _ => {
                self.values.insert(field, value);
                Ok(())
            },
        }
    }

    pub fn get(&self, field: ChronoField) -> Option<i64> {
        self.values.get(&field).copied()
    }

    pub fn contains(&self, field: ChronoField) -> bool {
        self.values.contains_key(&field)
    }

    /// Consumes a field, returning its value if it was present.
    pub fn remove(&mut self, field: ChronoField) -> Option<i64> {
        self.values.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChronoField, i64)> + '_ {
        self.values.iter().map(|(&field, &value)| (field, value))
    }

    /// Fields still present, in declaration order
    pub fn fields(&self) -> Vec<ChronoField> {
        let mut fields: Vec<_> = self.values.keys().copied().collect();
        fields.sort_unstable();
        fields
    }
}

impl FromIterator<(ChronoField, i64)> for FieldValues {
    /// Later duplicates overwrite earlier ones; use [`FieldValues::try_from_pairs`] to detect them.
    fn from_iter<I: IntoIterator<Item = (ChronoField, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldValues {
    type IntoIter = hash_map::IntoIter<ChronoField, i64>;
    type Item = (ChronoField, i64);

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
