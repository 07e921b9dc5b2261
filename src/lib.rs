mod consts;
pub mod fixtures;
mod prelude;
pub mod report;
mod types;
pub mod verifier;

pub use consts::*;
pub use fixtures::{Case, Fixture, Section, Suite, qualifier_suite};
pub use report::{MIN_REPORT_WIDTH, ReportOptions, write_text};
pub use types::{Day, Hour, Minute, Month, Second, Year, days_in_month, is_leap_year};
pub use verifier::{Actual, CaseReport, FixtureFailure, SectionReport, SuiteReport, Verifier, verify};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A calendar date and time of day with no time zone attached.
///
/// Every value is calendar-valid: the day always exists in its month and year
/// and the time components are within range. Fields absent from the parsed
/// input are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{}T{}:{}:{}", year, month, day, hour, minute, second)]
pub struct CivilDateTime {
    year:   Year,
    month:  Month,
    day:    Day,
    hour:   Hour,
    minute: Minute,
    second: Second,
}

/// Raw numeric view of a [`CivilDateTime`], in field order.
///
/// Used for fixture expectations and for field-for-field comparison. A
/// `DateTimeFields` value is not validated; convert with `TryFrom` to get a
/// [`CivilDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(
    fmt = "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
    year,
    month,
    day,
    hour,
    minute,
    second
)]
pub struct DateTimeFields {
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    pub hour:   u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeFields {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of the given date
    pub const fn date(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }
}

/// Detailed reason a string or set of fields is not a valid [`CivilDateTime`].
///
/// Only the typed constructors and [`CivilDateTime::parse_with_cause`] return
/// this. The parsing contract itself reports every failure as [`Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date/time format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid day: {} (must be 1-{})", "_0", MAX_DAY)]
    DayOutOfRange(u8),
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Invalid second: {} (must be 0-{})", "_0", MAX_SECOND)]
    InvalidSecond(u8),
    #[display(fmt = "Empty date/time string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// The single failure outcome of the parsing contract.
///
/// Carries no cause: a malformed string and a calendar-impossible one are
/// indistinguishable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("invalid ISO 8601 date/time string")]
pub struct Rejected;

impl From<ParseError> for Rejected {
    fn from(_: ParseError) -> Self {
        Self
    }
}

/// Result of running a parser over one input string.
pub type ParseOutcome = Result<CivilDateTime, Rejected>;

impl CivilDateTime {
    /// Creates a date-time from raw components, validating each against the
    /// calendar.
    ///
    /// # Errors
    /// Returns the `ParseError` variant of the first out-of-range component.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self {
            year,
            month,
            day,
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
            second: Second::new(second)?,
        })
    }

    /// Creates a date-time at midnight of the given date.
    ///
    /// # Errors
    /// Returns `ParseError` if the date does not exist.
    pub fn from_date(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Converts seconds since the Unix epoch into the UTC date-time.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` once the instant lies past `MAX_YEAR`.
    pub fn from_unix_seconds(seconds: u64) -> Result<Self, ParseError> {
        let days = seconds / SECONDS_PER_DAY;
        let time = seconds % SECONDS_PER_DAY;

        // Years counted from March so the leap day closes each year
        let shifted = days + UNIX_EPOCH_FROM_MARCH_0000;
        let era = shifted / DAYS_PER_GREGORIAN_CYCLE;
        let day_of_era = shifted % DAYS_PER_GREGORIAN_CYCLE;
        let year_of_era = (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let march_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * march_month + 2) / 5 + 1;
        let month = if march_month < 10 { march_month + 3 } else { march_month - 9 };
        let year = era * u64::from(GREGORIAN_CYCLE) + year_of_era + u64::from(month <= u64::from(FEBRUARY));

        // Overflowing values fall back to MAX and fail validation in `new`
        let narrow = |value: u64| u8::try_from(value).unwrap_or(u8::MAX);
        Self::new(
            u16::try_from(year).unwrap_or(u16::MAX),
            narrow(month),
            narrow(day),
            narrow(time / SECONDS_PER_HOUR),
            narrow(time % SECONDS_PER_HOUR / SECONDS_PER_MINUTE),
            narrow(time % SECONDS_PER_MINUTE),
        )
    }

    /// The current UTC date-time from the system clock.
    ///
    /// Returns `None` if the clock reads before 1970 or after `MAX_YEAR`.
    pub fn now_utc() -> Option<Self> {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        Self::from_unix_seconds(since_epoch.as_secs()).ok()
    }

    /// Parses `input`, keeping the reason for a failure.
    ///
    /// Accepts exactly `YYYY-MM-DD`, optionally followed by `THH`, `THH:MM` or
    /// `THH:MM:SS`. No surrounding whitespace, zone designator or fraction.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` for lexical problems and the
    /// matching range variant for values that do not exist on the calendar.
    pub fn parse_with_cause(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if input.len() > MAX_INPUT_LEN {
            return Err(ParseError::InvalidFormat(format!(
                "{input:?} is longer than {MAX_INPUT_LEN} characters"
            )));
        }

        let mut scanner = Scanner::new(input);
        let year = scanner.digits(YEAR_WIDTH)?;
        scanner.expect(DATE_SEPARATOR)?;
        let month = scanner.two_digits()?;
        scanner.expect(DATE_SEPARATOR)?;
        let day = scanner.two_digits()?;

        let (mut hour, mut minute, mut second) = (0, 0, 0);
        if scanner.eat(TIME_DESIGNATOR) {
            hour = scanner.two_digits()?;
            if scanner.eat(TIME_SEPARATOR) {
                minute = scanner.two_digits()?;
                if scanner.eat(TIME_SEPARATOR) {
                    second = scanner.two_digits()?;
                }
            }
        }
        scanner.finish()?;

        Self::new(year, month, day, hour, minute, second)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub const fn second(&self) -> u8 {
        self.second.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Converts to plain numeric fields: (year, month, day, hour, minute, second)
    pub const fn fields(&self) -> DateTimeFields {
        DateTimeFields::new(
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second(),
        )
    }
}

impl TryFrom<DateTimeFields> for CivilDateTime {
    type Error = ParseError;

    fn try_from(fields: DateTimeFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
        )
    }
}

impl From<CivilDateTime> for DateTimeFields {
    fn from(value: CivilDateTime) -> Self {
        value.fields()
    }
}

impl FromStr for CivilDateTime {
    type Err = Rejected;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso8601(s)
    }
}

impl Serialize for CivilDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_with_cause(&s).map_err(serde::de::Error::custom)
    }
}

/// Parses a strict ISO 8601 date or date-time string.
///
/// This is the reference implementation of the parsing contract. Every failure
/// becomes [`Rejected`]; the underlying cause is only logged at debug level.
pub fn parse_iso8601(input: &str) -> ParseOutcome {
    CivilDateTime::parse_with_cause(input).map_err(|cause| {
        tracing::debug!(input, %cause, "rejected date/time string");
        Rejected
    })
}

/// A component that implements the parsing contract.
///
/// The verifier is generic over this trait, so any parser can be graded.
/// Closures of type `Fn(&str) -> ParseOutcome` implement it directly.
pub trait Iso8601Parser {
    /// Human readable name used in reports
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn parse(&self, input: &str) -> ParseOutcome;
}

impl<F> Iso8601Parser for F
where
    F: Fn(&str) -> ParseOutcome,
{
    fn parse(&self, input: &str) -> ParseOutcome {
        self(input)
    }
}

/// The reference parser, backed by [`parse_iso8601`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictParser;

impl Iso8601Parser for StrictParser {
    fn name(&self) -> &str {
        "strict"
    }

    fn parse(&self, input: &str) -> ParseOutcome {
        parse_iso8601(input)
    }
}

/// Cursor over the bytes of a fixed-width date/time string.
struct Scanner<'i> {
    input: &'i str,
    pos:   usize,
}

impl<'i> Scanner<'i> {
    const fn new(input: &'i str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn error(&self, expected: &str) -> ParseError {
        let found = self
            .input
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or_else(|| "end of input".to_owned(), |c| format!("{c:?}"));
        ParseError::InvalidFormat(format!(
            "{:?}: expected {expected} at offset {}, found {found}",
            self.input, self.pos
        ))
    }

    /// Reads exactly `width` ASCII digits as a number.
    fn digits(&mut self, width: usize) -> Result<u16, ParseError> {
        let mut value: u16 = 0;
        for _ in 0..width {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + u16::from(b - b'0');
                    self.pos += 1;
                },
                _ => return Err(self.error(&format!("{width} digits"))),
            }
        }
        Ok(value)
    }

    fn two_digits(&mut self) -> Result<u8, ParseError> {
        let value = self.digits(FIELD_WIDTH)?;
        u8::try_from(value).map_err(|_| self.error("two digits"))
    }

    /// Consumes `byte` if it is next.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(&format!("{:?}", char::from(byte))))
        }
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error("end of input"))
        }
    }
}
