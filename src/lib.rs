//! Civil calendar systems behind one date abstraction.
//!
//! A [`Calendar`] wraps one [`CalendarSystem`]: the proleptic ISO calendar,
//! the Japanese imperial calendar, the Republic-era (Minguo) and Buddhist-era
//! calendars, or a [`LunarCalendar`] whose month lengths are tabulated per
//! year. Dates ([`CalendarDate`]) and amounts ([`Period`]) are bound to their
//! calendar, and a bag of calendar fields ([`FieldValues`]) can be resolved
//! into a date under one of three [`ResolverStyle`]s.
//!
//! ```
//! use civil_calendar::{Calendar, ChronoField, FieldValues, ResolverStyle};
//!
//! let mut fields = FieldValues::new()
//!     .with(ChronoField::Year, 2023)
//!     .with(ChronoField::MonthOfYear, 2)
//!     .with(ChronoField::DayOfMonth, 30);
//! let date = Calendar::iso()
//!     .resolve_date(&mut fields, ResolverStyle::Smart)?
//!     .expect("year, month and day form a complete date");
//! assert_eq!(date.day(), 28);
//! # Ok::<(), civil_calendar::CalendarError>(())
//! ```

mod calendar;
mod config;
mod consts;
mod date;
mod error;
mod field;
mod iso;
mod japanese;
mod lunar;
mod offset;
mod period;
mod prelude;
mod range;
mod registry;
mod resolve;
mod system;
mod table;
mod types;

pub use calendar::Calendar;
pub use config::{MonthLengths, VariableCalendarConfig};
pub use consts::*;
pub use date::CalendarDate;
pub use error::CalendarError;
pub use field::{ChronoField, FieldValues};
pub use japanese::JapaneseCalendar;
pub use lunar::LunarCalendar;
pub use offset::OffsetCalendar;
pub use period::Period;
pub use range::ValueRange;
pub use registry::CalendarRegistry;
pub use resolve::FieldResolver;
pub use system::CalendarSystem;
pub use table::MonthTable;
pub use types::{ChronoUnit, Era, ResolverStyle};
