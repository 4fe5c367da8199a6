//! Calendar dates, wall-clock times and the small helpers around them.
//!
//! Both [`CalendarDate`] and [`ClockTime`] are timezone-naive local values.
//! They serialize as zero-padded `YYYY-MM-DD` and `HH:MM` strings, so their
//! lexical and chronological orders agree.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Minutes in one calendar day; the exclusive upper bound of a day's window.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A local `YYYY-MM-DD` date with no time-of-day or timezone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a strict `YYYY-MM-DD` string that names a real Gregorian date.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidInput` for any other shape, or for
    /// shape-valid strings such as `2025-02-30` that are not real dates.
    pub fn parse(s: &str) -> Result<Self> {
        if !is_iso_date(s) {
            return Err(AvailabilityError::InvalidInput(format!(
                "date must be YYYY-MM-DD, got '{}'",
                s
            )));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|_| AvailabilityError::InvalidInput(format!("'{}' is not a calendar date", s)))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.0.month(),
            day: self.0.day(),
        }
    }

    /// ISO weekday number, Monday=1 through Sunday=7.
    pub fn weekday_number(&self) -> u8 {
        self.0.weekday().number_from_monday() as u8
    }

    /// Local midnight at the start of this date.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// Local date-time of `time` on this date.
    pub fn at(&self, time: ClockTime) -> NaiveDateTime {
        self.start_of_day() + chrono::Duration::minutes(i64::from(time.minutes()))
    }

    /// Whole days from `self` to `other` (negative when `other` is earlier).
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = AvailabilityError;

    fn try_from(s: String) -> Result<Self> {
        CalendarDate::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A wall-clock `HH:MM` time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Parse `HH:MM` or `HH:MM:SS`. Seconds are validated and then dropped.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidInput` when the string is not
    /// zero-padded or a component is out of range.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || AvailabilityError::InvalidInput(format!("time must be HH:MM, got '{}'", s));
        let bytes = s.as_bytes();
        if !(bytes.len() == 5 || bytes.len() == 8) || bytes[2] != b':' {
            return Err(invalid());
        }
        if bytes.len() == 8 && bytes[5] != b':' {
            return Err(invalid());
        }

        let hours = two_digits(&bytes[0..2]).ok_or_else(invalid)?;
        let minutes = two_digits(&bytes[3..5]).ok_or_else(invalid)?;
        if bytes.len() == 8 {
            let seconds = two_digits(&bytes[6..8]).ok_or_else(invalid)?;
            if seconds > 59 {
                return Err(invalid());
            }
        }
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(ClockTime((hours * 60 + minutes) as u16))
    }

    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(ClockTime((hours * 60 + minutes) as u16))
    }

    /// Build from minutes since midnight; `None` at or past 24:00.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(ClockTime(minutes as u16))
    }

    pub fn minutes(&self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(&self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes() % 60
    }
}

impl TryFrom<String> for ClockTime {
    type Error = AvailabilityError;

    fn try_from(s: String) -> Result<Self> {
        ClockTime::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A month/day pair with no year, used by annually recurring holidays.
///
/// Ordering is `(month, day)`, equivalent to comparing `month * 100 + day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // Feb 29 is a valid annual key even though most years lack it.
        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return None,
        };
        (1..=max_day).contains(&day).then_some(MonthDay { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// True when `s` has the exact `\d{4}-\d{2}-\d{2}` shape.
pub fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strip everything but ASCII digits.
pub fn only_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a North American phone number to its 10 digits.
///
/// Eleven digits with a leading country code `1` are accepted and the `1` is
/// dropped. Any other digit count yields `None`.
pub fn normalize_nanp_phone(raw: &str) -> Option<String> {
    let digits = only_digits(raw);
    match digits.len() {
        10 => Some(digits),
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => None,
    }
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}
