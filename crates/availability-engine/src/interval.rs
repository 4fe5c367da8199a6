//! Half-open time-of-day intervals, inclusive date ranges and annual
//! month/day ranges.
//!
//! Time-of-day values are minutes since local midnight. Adjacent intervals
//! (where one ends exactly when the other starts) do NOT overlap, so
//! back-to-back appointments are legal.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::{CalendarDate, ClockTime, MonthDay, MINUTES_PER_DAY};

/// Half-open overlap test: `a_start < b_end && a_end > b_start`.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && a_end > b_start
}

/// A half-open `[start, end)` span in minutes since midnight.
///
/// Unlike [`TimeWindow`] this may run past 24:00, which happens for an
/// appointment booked late in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteSpan {
    pub start: u32,
    pub end: u32,
}

impl MinuteSpan {
    pub fn starting_at(start: ClockTime, duration_minutes: u32) -> Self {
        let start = start.minutes();
        MinuteSpan {
            start,
            end: start.saturating_add(duration_minutes),
        }
    }

    pub fn overlaps(&self, other: &MinuteSpan) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// A non-empty operating window `[start, end)` within one calendar day.
///
/// Invariant: `start < end <= 1440`. The end may be 24:00 when a window was
/// clipped to the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: ClockTime,
    end: u32,
}

impl TimeWindow {
    /// `None` when the window would be empty, inverted or extend past 24:00.
    pub fn new(start_minutes: u32, end_minutes: u32) -> Option<Self> {
        if start_minutes >= end_minutes || end_minutes > MINUTES_PER_DAY {
            return None;
        }
        Some(TimeWindow {
            start: ClockTime::from_minutes(start_minutes)?,
            end: end_minutes,
        })
    }

    pub fn between(start: ClockTime, end: ClockTime) -> Option<Self> {
        TimeWindow::new(start.minutes(), end.minutes())
    }

    /// The whole day, 00:00 to 24:00.
    pub fn full_day() -> Self {
        TimeWindow {
            start: ClockTime::MIDNIGHT,
            end: MINUTES_PER_DAY,
        }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.minutes()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}:{:02}", self.start, self.end / 60, self.end % 60)
    }
}

/// Intersect a timestamp window with `date`'s `[00:00, 24:00)` bounds.
///
/// Returns `None` when the intersection is empty or inverted, which the
/// resolver treats as a closed day rather than an error. Seconds are
/// truncated when the clipped bounds are converted to clock minutes.
pub fn clip_to_day(
    start: NaiveDateTime,
    end: NaiveDateTime,
    date: CalendarDate,
) -> Option<TimeWindow> {
    let day_start = date.start_of_day();
    let day_end = day_start + chrono::Duration::days(1);

    let clipped_start = start.max(day_start);
    let clipped_end = end.min(day_end);
    if clipped_start >= clipped_end {
        return None;
    }

    let start_minutes = (clipped_start - day_start).num_minutes();
    let end_minutes = (clipped_end - day_start).num_minutes();
    TimeWindow::new(
        u32::try_from(start_minutes).ok()?,
        u32::try_from(end_minutes).ok()?,
    )
}

/// An inclusive `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Days between the endpoints; 0 for a single-day range.
    pub fn span_days(&self) -> i64 {
        self.start.days_until(self.end)
    }
}

/// An annually recurring `[start, end]` month/day range.
///
/// When `start > end` the range wraps the year boundary, e.g. Dec 20 to
/// Jan 5 covers both late December and early January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDayRange {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl MonthDayRange {
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, md: MonthDay) -> bool {
        if self.wraps() {
            md >= self.start || md <= self.end
        } else {
            self.start <= md && md <= self.end
        }
    }
}
