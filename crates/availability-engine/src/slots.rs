//! Candidate slot generation for an open window.
//!
//! A slot must fit entirely inside the window: no partial trailing slot is
//! emitted. On the caller's current date, slots that do not start strictly
//! after "now" are dropped. "Now" is always supplied by the caller so that
//! generation stays deterministic.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, DEFAULT_SLOT_MINUTES, MIN_SLOT_MINUTES};
use crate::error::{AvailabilityError, Result};
use crate::interval::TimeWindow;
use crate::time::{CalendarDate, ClockTime};

/// Slot granularity in minutes, never below the configured floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct SlotMinutes(u32);

impl SlotMinutes {
    /// Clamp `minutes` up to the default floor of 5.
    pub fn new(minutes: u32) -> Self {
        SlotMinutes::with_floor(minutes, MIN_SLOT_MINUTES)
    }

    pub fn with_floor(minutes: u32, floor: u32) -> Self {
        SlotMinutes(minutes.max(floor.max(1)))
    }

    /// Interpret a raw query value.
    ///
    /// A missing or blank value falls back to `config.default_slot_minutes`.
    /// Integers below `config.min_slot_minutes` (including zero and negative
    /// values) are clamped up to it.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidInput` when the value is present but
    /// not an integer.
    pub fn parse(raw: Option<&str>, config: &EngineConfig) -> Result<Self> {
        let floor = config.min_slot_minutes;
        let raw = match raw.map(str::trim) {
            None | Some("") => {
                return Ok(SlotMinutes::with_floor(config.default_slot_minutes, floor))
            }
            Some(raw) => raw,
        };

        let value: i64 = raw.parse().map_err(|_| {
            AvailabilityError::InvalidInput(format!("slotMinutes must be an integer, got '{}'", raw))
        })?;
        let minutes = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        Ok(SlotMinutes::with_floor(minutes, floor))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for SlotMinutes {
    fn from(minutes: u32) -> Self {
        SlotMinutes::new(minutes)
    }
}

impl From<SlotMinutes> for u32 {
    fn from(slot: SlotMinutes) -> Self {
        slot.0
    }
}

impl Default for SlotMinutes {
    fn default() -> Self {
        SlotMinutes(DEFAULT_SLOT_MINUTES)
    }
}

/// Every start time `t` in the window with `t + slot <= window.end`, in
/// increasing order.
pub fn candidate_starts(window: TimeWindow, slot: SlotMinutes) -> Vec<ClockTime> {
    let step = slot.get().max(1);
    let end = window.end_minutes();
    let mut starts = Vec::new();

    let mut t = window.start_minutes();
    while t.saturating_add(step) <= end {
        if let Some(time) = ClockTime::from_minutes(t) {
            starts.push(time);
        }
        t += step;
    }

    starts
}

/// Drop candidates that are not strictly after `now` when `date` is now's
/// date. Other dates, past or future, pass through unchanged.
pub fn drop_elapsed(date: CalendarDate, candidates: Vec<ClockTime>, now: NaiveDateTime) -> Vec<ClockTime> {
    if date.naive() != now.date() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|t| date.at(*t) > now)
        .collect()
}

/// Candidate starts for `date`'s window with same-day truncation applied.
pub fn generate_slots(
    window: TimeWindow,
    slot: SlotMinutes,
    date: CalendarDate,
    now: NaiveDateTime,
) -> Vec<ClockTime> {
    drop_elapsed(date, candidate_starts(window, slot), now)
}
