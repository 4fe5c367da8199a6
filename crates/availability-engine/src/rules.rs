//! Read-only rule and booking records the resolver consumes.
//!
//! These mirror the rows the admin data store owns. The engine never
//! mutates them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::interval::{DateRange, MinuteSpan, MonthDayRange};
use crate::time::{CalendarDate, ClockTime, MonthDay};

/// A one-off override covering an explicit `[start_date, end_date]` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDayRule {
    pub id: u64,
    pub start_date: CalendarDate,
    /// Defaults to `start_date` when absent.
    #[serde(default)]
    pub end_date: Option<CalendarDate>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub is_open: bool,
    /// Full local date-times; used only when both ends are present.
    #[serde(default)]
    pub start_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_at: Option<NaiveDateTime>,
}

impl SpecialDayRule {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date.unwrap_or(self.start_date),
        }
    }

    pub fn explicit_window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start_at?, self.end_at?))
    }
}

/// An annually recurring override keyed by month/day, ignoring the year.
///
/// Deserialization rejects month/day pairs that name no calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HolidayRow")]
pub struct HolidayRule {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub is_open: bool,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    #[serde(default)]
    pub end_time: Option<ClockTime>,
}

impl HolidayRule {
    pub fn range(&self) -> MonthDayRange {
        MonthDayRange {
            start: MonthDay {
                month: self.start_month,
                day: self.start_day,
            },
            end: MonthDay {
                month: self.end_month,
                day: self.end_day,
            },
        }
    }

    pub fn explicit_times(&self) -> Option<(ClockTime, ClockTime)> {
        Some((self.start_time?, self.end_time?))
    }
}

/// Unvalidated wire shape of [`HolidayRule`].
#[derive(Deserialize)]
struct HolidayRow {
    id: u64,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    is_open: bool,
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
    #[serde(default)]
    start_time: Option<ClockTime>,
    #[serde(default)]
    end_time: Option<ClockTime>,
}

impl TryFrom<HolidayRow> for HolidayRule {
    type Error = String;

    fn try_from(row: HolidayRow) -> Result<Self, Self::Error> {
        for (month, day) in [(row.start_month, row.start_day), (row.end_month, row.end_day)] {
            if MonthDay::new(month, day).is_none() {
                return Err(format!("holiday {} has invalid month/day {}/{}", row.id, month, day));
            }
        }
        Ok(HolidayRule {
            id: row.id,
            label: row.label,
            comment: row.comment,
            is_open: row.is_open,
            start_month: row.start_month,
            start_day: row.start_day,
            end_month: row.end_month,
            end_day: row.end_day,
            start_time: row.start_time,
            end_time: row.end_time,
        })
    }
}

/// The regular opening hours for one weekday (Monday=1 .. Sunday=7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub week_day: u8,
    pub is_open: bool,
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    #[serde(default)]
    pub end_time: Option<ClockTime>,
}

/// An already-booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: Option<u64>,
    pub date: CalendarDate,
    pub time: ClockTime,
    pub duration_minutes: u32,
}

impl Appointment {
    pub fn span(&self) -> MinuteSpan {
        MinuteSpan::starting_at(self.time, self.duration_minutes)
    }
}
