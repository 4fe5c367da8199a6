//! Admission check for a new booking request.
//!
//! Validates the request and checks it against the date's existing
//! appointments. Nothing is persisted here; storing an admitted booking is
//! the caller's job, and the store must serialize concurrent admissions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::conflict::find_conflicts;
use crate::error::{AvailabilityError, Result};
use crate::interval::MinuteSpan;
use crate::source::RuleSource;
use crate::time::{normalize_nanp_phone, CalendarDate, ClockTime};

/// A booking request as submitted by a client. Every field is optional on
/// the wire so that missing fields are reported as input errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub comments: Option<String>,
}

/// A request that passed every check, with normalized fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmittedBooking {
    pub name: String,
    /// Ten NANP digits, when a phone number was supplied.
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub date: CalendarDate,
    pub time: ClockTime,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub service_type: String,
    pub comments: Option<String>,
}

/// Check `request` against the caller's clock and the date's bookings.
///
/// # Errors
/// - `InvalidInput` for missing fields, a duration outside
///   `config.booking_durations`, an unusable phone number, or a malformed
///   date or time.
/// - `PastAppointment` when the requested start is before `now`.
/// - `Conflict` when `[time, time + duration)` overlaps an existing
///   appointment. Back-to-back bookings are allowed.
pub fn check_booking<S: RuleSource + ?Sized>(
    request: &BookingRequest,
    now: NaiveDateTime,
    source: &S,
    config: &EngineConfig,
) -> Result<AdmittedBooking> {
    let (name, date, time, duration, service_type) = match (
        present(&request.name),
        present(&request.date),
        present(&request.time),
        request.duration.filter(|d| *d > 0),
        present(&request.service_type),
    ) {
        (Some(name), Some(date), Some(time), Some(duration), Some(kind)) => {
            (name, date, time, duration, kind)
        }
        _ => return Err(AvailabilityError::InvalidInput("Missing required fields".to_string())),
    };

    if !config.booking_durations.contains(&duration) {
        return Err(AvailabilityError::InvalidInput(format!(
            "Duration must be one of {:?} minutes",
            config.booking_durations
        )));
    }

    let phone_number = match present(&request.phone_number) {
        Some(raw) => Some(
            normalize_nanp_phone(raw)
                .ok_or_else(|| AvailabilityError::InvalidInput("Invalid phone number".to_string()))?,
        ),
        None => None,
    };

    let date = CalendarDate::parse(date)?;
    let time = ClockTime::parse(time)?;

    if date.at(time) < now {
        return Err(AvailabilityError::PastAppointment {
            date: date.to_string(),
            time: time.to_string(),
        });
    }

    let requested = MinuteSpan::starting_at(time, duration);
    let conflicts = find_conflicts(requested, &source.appointments(date));
    if let Some(first) = conflicts.first() {
        debug!(%date, %time, existing = %first.appointment.time, "booking rejected by conflict");
        return Err(AvailabilityError::Conflict {
            date: date.to_string(),
            time: time.to_string(),
        });
    }

    Ok(AdmittedBooking {
        name: name.to_string(),
        phone_number,
        email: request.email.clone(),
        date,
        time,
        duration_minutes: duration,
        service_type: service_type.to_string(),
        comments: request.comments.clone(),
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
