//! Detect overlaps between candidate slots and existing appointments.
//!
//! Every comparison is half-open: a slot starting exactly when an
//! appointment ends (or ending exactly when one starts) is NOT a conflict.

use crate::interval::MinuteSpan;
use crate::rules::Appointment;
use crate::slots::SlotMinutes;
use crate::time::ClockTime;

/// An existing appointment that overlaps a requested span.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub appointment: Appointment,
    pub overlap_minutes: u32,
}

/// Find every appointment overlapping `span`, in input order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(span: MinuteSpan, appointments: &[Appointment]) -> Vec<Conflict> {
    appointments
        .iter()
        .filter_map(|appt| {
            let booked = appt.span();
            if !span.overlaps(&booked) {
                return None;
            }
            let overlap_start = span.start.max(booked.start);
            let overlap_end = span.end.min(booked.end);
            Some(Conflict {
                appointment: appt.clone(),
                overlap_minutes: overlap_end - overlap_start,
            })
        })
        .collect()
}

/// Keep only candidates whose `[t, t + slot)` overlaps no appointment.
///
/// Order is preserved. This is O(candidates x appointments), which is fine
/// for a single day's worth of both.
pub fn filter_conflicts(
    candidates: Vec<ClockTime>,
    slot: SlotMinutes,
    appointments: &[Appointment],
) -> Vec<ClockTime> {
    let booked: Vec<MinuteSpan> = appointments.iter().map(Appointment::span).collect();

    candidates
        .into_iter()
        .filter(|t| {
            let candidate = MinuteSpan::starting_at(*t, slot.get());
            !booked.iter().any(|b| candidate.overlaps(b))
        })
        .collect()
}
