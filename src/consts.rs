/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Length of the longest month
pub const MAX_DAY: u8 = 31;

/// Maximum valid hour of the day
pub const MAX_HOUR: u8 = 23;
/// Maximum valid minute of the hour
pub const MAX_MINUTE: u8 = 59;
/// Maximum valid second of the minute. Leap seconds are not representable.
pub const MAX_SECOND: u8 = 59;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in one 400-year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: u64 = 146_097;
/// Days from 0000-03-01 to the Unix epoch, 1970-01-01
pub(crate) const UNIX_EPOCH_FROM_MARCH_0000: u64 = 719_468;
pub(crate) const SECONDS_PER_MINUTE: u64 = 60;
pub(crate) const SECONDS_PER_HOUR: u64 = 3_600;
pub(crate) const SECONDS_PER_DAY: u64 = 86_400;

/// Date component separator (ISO 8601 extended format)
pub const DATE_SEPARATOR: u8 = b'-';
/// Designator between the date and the time of day
pub const TIME_DESIGNATOR: u8 = b'T';
/// Time component separator (ISO 8601 extended format)
pub const TIME_SEPARATOR: u8 = b':';

/// Digits in the year field
pub const YEAR_WIDTH: usize = 4;
/// Digits in every other field
pub const FIELD_WIDTH: usize = 2;

/// Length of the longest accepted form, `YYYY-MM-DDTHH:MM:SS`.
/// Anything longer is rejected before scanning.
pub const MAX_INPUT_LEN: usize = 19;
