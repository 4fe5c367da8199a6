//! The read interface the engine pulls rules and bookings through, and an
//! in-memory snapshot that implements it.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::rules::{Appointment, HolidayRule, SpecialDayRule, WeeklyHours};
use crate::time::CalendarDate;

/// Read-only access to the rule and booking store.
///
/// Implementations return every candidate that could apply to the date; the
/// resolver performs the exact matching and tie-breaking itself. Callers
/// must give one resolution a consistent view (snapshot isolation or
/// equivalent) so a half-applied write is never observed.
pub trait RuleSource {
    fn special_days(&self, date: CalendarDate) -> Vec<SpecialDayRule>;
    fn holidays(&self, date: CalendarDate) -> Vec<HolidayRule>;
    fn weekly_hours(&self, weekday: u8) -> Option<WeeklyHours>;
    fn appointments(&self, date: CalendarDate) -> Vec<Appointment>;
}

/// A complete, immutable copy of the store, typically loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub config: EngineConfig,
    pub special_days: Vec<SpecialDayRule>,
    pub holidays: Vec<HolidayRule>,
    pub business_hours: Vec<WeeklyHours>,
    pub appointments: Vec<Appointment>,
}

impl Schedule {
    /// # Errors
    /// Returns `AvailabilityError::Schedule` if the JSON does not describe a
    /// schedule (including malformed dates or clock times inside it).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RuleSource for Schedule {
    fn special_days(&self, date: CalendarDate) -> Vec<SpecialDayRule> {
        self.special_days
            .iter()
            .filter(|rule| rule.range().contains(date))
            .cloned()
            .collect()
    }

    fn holidays(&self, date: CalendarDate) -> Vec<HolidayRule> {
        let md = date.month_day();
        self.holidays
            .iter()
            .filter(|rule| rule.range().contains(md))
            .cloned()
            .collect()
    }

    fn weekly_hours(&self, weekday: u8) -> Option<WeeklyHours> {
        self.business_hours
            .iter()
            .find(|row| row.week_day == weekday)
            .cloned()
    }

    fn appointments(&self, date: CalendarDate) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|appt| appt.date == date)
            .cloned()
            .collect()
    }
}

/// Everything one date's resolution reads, fetched up front.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySnapshot {
    pub date: CalendarDate,
    pub special_days: Vec<SpecialDayRule>,
    pub holidays: Vec<HolidayRule>,
    pub weekly_hours: Option<WeeklyHours>,
    pub appointments: Vec<Appointment>,
}

impl DaySnapshot {
    pub fn fetch<S: RuleSource + ?Sized>(source: &S, date: CalendarDate) -> Self {
        DaySnapshot {
            date,
            special_days: source.special_days(date),
            holidays: source.holidays(date),
            weekly_hours: source.weekly_hours(date.weekday_number()),
            appointments: source.appointments(date),
        }
    }
}
