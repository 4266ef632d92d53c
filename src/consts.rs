/// Months in every year of the built-in calendars
pub const MONTHS_PER_YEAR: u32 = 12;

/// Days in an aligned week
pub const DAYS_PER_WEEK: i64 = 7;

/// Lower bound of every day-of-month
pub const MIN_DAY: u32 = 1;

/// First month of every year
pub const JANUARY: u32 = 1;
/// The ISO month whose length depends on the leap rule
pub const FEBRUARY: u32 = 2;

/// Length of February in an ISO leap year
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// ISO month lengths in a common year, indexed by month number (index 0 unused)
pub const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// ISO leap years are divisible by 4
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// except centuries
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// unless divisible by 400
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
pub(crate) const DAYS_CE_TO_UNIX_EPOCH: i64 = 719_163;

/// Shortest month accepted in tabulated lunar data
pub const MIN_LUNAR_MONTH_LENGTH: u32 = 29;
/// Longest month accepted in tabulated lunar data
pub const MAX_LUNAR_MONTH_LENGTH: u32 = 32;
/// A tabulated year longer than this is a leap year
pub const LUNAR_COMMON_YEAR_LENGTH: u32 = 354;

/// Stride used to pack `(proleptic month, day)` for month-based differences
pub(crate) const PACKED_DAY_STRIDE: i64 = 32;

/// ISO year 1 of the Republic-era calendar
pub(crate) const MINGUO_YEAR_ZERO: i64 = 1911;
/// Years the Buddhist era runs ahead of ISO
pub(crate) const BUDDHIST_YEAR_OFFSET: i64 = 543;

/// Date format of the `iso-start` anchor in variable-calendar records
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
