use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_DAY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day value guaranteed to be valid for the year and month it was built with.
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month: month.get(),
            day: value,
            year: year.get(),
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;

        if value > days_in_month(year.get(), month.get()) {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without year/month context only the longest month can be checked
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MAX_DAY => Ok(Self(non_zero)),
            _ => Err(ParseError::DayOutOfRange(value)),
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// An hour of the day in `0..=MAX_HOUR`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{:02}", "_0")]
pub struct Hour(u8);

impl Hour {
    /// # Errors
    /// Returns `ParseError::InvalidHour` if the value is > `MAX_HOUR`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_HOUR {
            return Err(ParseError::InvalidHour(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A minute of the hour in `0..=MAX_MINUTE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{:02}", "_0")]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `ParseError::InvalidMinute` if the value is > `MAX_MINUTE`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MINUTE {
            return Err(ParseError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Minute {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A second of the minute in `0..=MAX_SECOND`. There is no leap second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{:02}", "_0")]
pub struct Second(u8);

impl Second {
    /// # Errors
    /// Returns `ParseError::InvalidSecond` if the value is > `MAX_SECOND`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_SECOND {
            return Err(ParseError::InvalidSecond(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Second {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, or 0 for a month outside `1..=12`.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    if month == 0 || month > MAX_MONTH {
        return 0;
    }

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(value: u16) -> Year {
        Year::new(value).expect("valid year")
    }

    fn month(value: u8) -> Month {
        Month::new(value).expect("valid month")
    }

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid_zero() {
        let result = Year::new(0);
        assert!(matches!(result, Err(ParseError::InvalidYear(0))));
    }

    #[test]
    fn test_year_new_invalid_too_large() {
        let result = Year::new(10000);
        assert!(matches!(result, Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        assert_eq!(year(2024).to_string(), "2024");
        assert_eq!(year(90).to_string(), "0090");
        assert_eq!(year(1).to_string(), "0001");
    }

    #[test]
    fn test_year_try_from_u16() {
        let y: Year = 2024.try_into().expect("2024 should convert");
        assert_eq!(y.get(), 2024);

        let result: Result<Year, _> = 0.try_into();
        assert!(result.is_err());

        let result: Result<Year, _> = 10000.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_year_serde() {
        let y = year(2024);
        let json = serde_json::to_string(&y).expect("serialize year");
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).expect("deserialize year");
        assert_eq!(y, parsed);

        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(ParseError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_display_is_zero_padded() {
        assert_eq!(month(8).to_string(), "08");
        assert_eq!(month(12).to_string(), "12");
    }

    #[test]
    fn test_month_serde() {
        let m = month(8);
        let json = serde_json::to_string(&m).expect("serialize month");
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).expect("deserialize month");
        assert_eq!(m, parsed);

        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_day_new_valid() {
        // January - 31 days
        assert!(Day::new(1, year(2024), month(1)).is_ok());
        assert!(Day::new(31, year(2024), month(1)).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, year(2023), month(2)).is_ok());
        assert!(Day::new(29, year(2023), month(2)).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, year(2024), month(2)).is_ok());
        assert!(Day::new(30, year(2024), month(2)).is_err());

        // April - 30 days
        assert!(Day::new(30, year(2024), month(4)).is_ok());
        assert!(Day::new(31, year(2024), month(4)).is_err());
    }

    #[test]
    fn test_day_new_invalid_zero() {
        let result = Day::new(0, year(2024), month(1));
        assert!(matches!(result, Err(ParseError::InvalidDay { .. })));
    }

    #[test]
    fn test_day_new_invalid_too_large() {
        let result = Day::new(32, year(2024), month(1));
        assert!(matches!(
            result,
            Err(ParseError::InvalidDay {
                month: 1,
                day: 32,
                year: 2024
            })
        ));
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().expect("15 should convert");
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());

        let result: Result<Day, _> = 32.try_into();
        assert_eq!(result, Err(ParseError::DayOutOfRange(32)));
    }

    #[test]
    fn test_day_try_from_error_names_no_month() {
        let err = Day::try_from(32).expect_err("32 is past every month");
        assert_eq!(err.to_string(), "Invalid day: 32 (must be 1-31)");

        let err = Day::try_from(0).expect_err("0 is not a day");
        assert_eq!(err, ParseError::DayOutOfRange(0));
    }

    #[test]
    fn test_time_components_bounds() {
        struct TestCase {
            value:       u8,
            hour_ok:     bool,
            minute_ok:   bool,
            second_ok:   bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                value:       0,
                hour_ok:     true,
                minute_ok:   true,
                second_ok:   true,
                description: "zero is valid everywhere",
            },
            TestCase {
                value:       23,
                hour_ok:     true,
                minute_ok:   true,
                second_ok:   true,
                description: "last hour of the day",
            },
            TestCase {
                value:       24,
                hour_ok:     false,
                minute_ok:   true,
                second_ok:   true,
                description: "hour 24 is not accepted",
            },
            TestCase {
                value:       59,
                hour_ok:     false,
                minute_ok:   true,
                second_ok:   true,
                description: "last minute and second",
            },
            TestCase {
                value:       60,
                hour_ok:     false,
                minute_ok:   false,
                second_ok:   false,
                description: "leap second is not representable",
            },
        ];

        for case in &cases {
            assert_eq!(Hour::new(case.value).is_ok(), case.hour_ok, "hour: {}", case.description);
            assert_eq!(Minute::new(case.value).is_ok(), case.minute_ok, "minute: {}", case.description);
            assert_eq!(Second::new(case.value).is_ok(), case.second_ok, "second: {}", case.description);
        }
    }

    #[test]
    fn test_time_component_errors() {
        assert!(matches!(Hour::new(24), Err(ParseError::InvalidHour(24))));
        assert!(matches!(Minute::new(60), Err(ParseError::InvalidMinute(60))));
        assert!(matches!(Second::new(60), Err(ParseError::InvalidSecond(60))));
    }

    #[test]
    fn test_time_component_display_and_into() {
        let hour = Hour::new(8).expect("valid hour");
        assert_eq!(hour.to_string(), "08");
        let raw: u8 = hour.into();
        assert_eq!(raw, 8);

        assert_eq!(Minute::default().to_string(), "00");
        assert_eq!(Second::new(59).expect("valid second").to_string(), "59");
    }

    #[test]
    fn test_time_component_serde() {
        let second = Second::new(48).expect("valid second");
        let json = serde_json::to_string(&second).expect("serialize second");
        assert_eq!(json, "48");
        let parsed: Second = serde_json::from_str(&json).expect("deserialize second");
        assert_eq!(second, parsed);

        assert!(serde_json::from_str::<Second>("60").is_err());
        assert!(serde_json::from_str::<Hour>("24").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2028,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2001,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        1600,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        9996,
                is_leap:     true,
                description: "last leap year in range",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({}): expected {}",
                case.year,
                case.description,
                if case.is_leap { "leap year" } else { "not leap year" }
            );
        }
    }

    #[test]
    fn test_year_is_leap() {
        assert!(year(2000).is_leap());
        assert!(!year(1900).is_leap());
    }

    #[test]
    fn test_days_in_month_31_day_months() {
        for m in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(2024, m), 31, "Month {m} should have 31 days");
        }
    }

    #[test]
    fn test_days_in_month_30_day_months() {
        for m in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2024, m), 30, "Month {m} should have 30 days");
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_days_in_month_out_of_range_month() {
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }
}
