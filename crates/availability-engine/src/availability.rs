//! Availability resolution: the bookable start times for one date.
//!
//! Composes the pipeline `resolve day plan -> generate slots -> drop
//! elapsed -> filter conflicts`. Resolution is pure over a [`DaySnapshot`],
//! so identical inputs always yield identical output and calls for many
//! dates may run concurrently without coordination.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::filter_conflicts;
use crate::error::Result;
use crate::resolver::{resolve_day_plan, DayPlan, SourceKind};
use crate::slots::{generate_slots, SlotMinutes};
use crate::source::{DaySnapshot, RuleSource};
use crate::time::{CalendarDate, ClockTime};

/// Bookable times for a date plus the metadata of whatever decided them.
///
/// `times` is empty both for a closed day and for an open, fully booked
/// day; `source_kind` and the label fields tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: CalendarDate,
    pub slot_minutes: SlotMinutes,
    /// Strictly increasing `HH:MM` start times.
    pub times: Vec<ClockTime>,
    pub source_kind: SourceKind,
    pub holiday_label: Option<String>,
    pub holiday_comment: Option<String>,
    /// True when a special day or holiday governed the date, open or closed.
    pub is_open_override: bool,
}

impl Availability {
    fn from_plan(date: CalendarDate, slot: SlotMinutes, plan: &DayPlan, times: Vec<ClockTime>) -> Self {
        let source = plan.source();
        Availability {
            date,
            slot_minutes: slot,
            times,
            source_kind: source.kind(),
            holiday_label: source.label().map(str::to_string),
            holiday_comment: source.comment().map(str::to_string),
            is_open_override: source.is_override(),
        }
    }
}

/// Compute availability from rules and appointments already fetched for
/// `snapshot.date`.
pub fn compute_availability(snapshot: &DaySnapshot, slot: SlotMinutes, now: NaiveDateTime) -> Availability {
    let date = snapshot.date;
    let plan = resolve_day_plan(snapshot);

    let window = match &plan {
        DayPlan::Open { window, .. } => *window,
        DayPlan::Closed { .. } => return Availability::from_plan(date, slot, &plan, Vec::new()),
    };

    let upcoming = generate_slots(window, slot, date, now);
    let upcoming_count = upcoming.len();
    let free = filter_conflicts(upcoming, slot, &snapshot.appointments);
    debug!(
        %date,
        %window,
        slot_minutes = slot.get(),
        upcoming = upcoming_count,
        free = free.len(),
        "computed availability"
    );

    Availability::from_plan(date, slot, &plan, free)
}

/// Validate `date`, fetch its rules from `source` and compute availability.
///
/// `now` is the caller's local wall-clock time; it only affects the result
/// when `date` is `now`'s date.
///
/// # Errors
/// Returns `AvailabilityError::InvalidInput` if `date` is not a
/// `YYYY-MM-DD` calendar date. Closed days and fully booked days are not
/// errors.
pub fn resolve_availability<S: RuleSource + ?Sized>(
    date: &str,
    slot: SlotMinutes,
    now: NaiveDateTime,
    source: &S,
) -> Result<Availability> {
    let date = CalendarDate::parse(date)?;
    let snapshot = DaySnapshot::fetch(source, date);
    Ok(compute_availability(&snapshot, slot, now))
}
