use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::Calendar;

/// Calendars by id. The first registration of an id wins.
#[derive(Debug, Default)]
pub struct CalendarRegistry {
    calendars: RwLock<HashMap<String, Calendar>>,
}

impl CalendarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the ISO, Japanese, Minguo and Buddhist-era calendars.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for calendar in [
            Calendar::iso(),
            Calendar::japanese(),
            Calendar::minguo(),
            Calendar::thai_buddhist(),
        ] {
            registry.register(calendar);
        }
        registry
    }

    /// The process-wide registry, seeded with the built-in calendars on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CalendarRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Registers a calendar, returning `false` if its id was already taken.
    pub fn register(&self, calendar: Calendar) -> bool {
        let mut calendars = self.calendars.write().unwrap_or_else(PoisonError::into_inner);
        let id = calendar.id().to_owned();
        if calendars.contains_key(&id) {
            warn!(calendar = %id, "ignoring duplicate calendar registration");
            return false;
        }
        debug!(calendar = %id, "registered calendar");
        calendars.insert(id, calendar);
        true
    }

    pub fn get(&self, id: &str) -> Option<Calendar> {
        self.calendars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Looks a calendar up by id, then by calendar type.
    pub fn of(&self, id_or_type: &str) -> Option<Calendar> {
        let calendars = self.calendars.read().unwrap_or_else(PoisonError::into_inner);
        calendars.get(id_or_type).cloned().or_else(|| {
            calendars
                .values()
                .find(|calendar| calendar.calendar_type() == Some(id_or_type))
                .cloned()
        })
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .calendars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.calendars.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
