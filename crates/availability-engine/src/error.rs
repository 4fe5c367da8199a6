//! Error types for availability-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// Malformed date, time, slot size or booking field. Nothing was computed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A booking request whose start lies before the caller's clock.
    #[error("Appointment cannot be in the past: {date} {time}")]
    PastAppointment { date: String, time: String },

    /// A booking request overlapping an existing appointment.
    #[error("Time conflict with another appointment: {date} {time}")]
    Conflict { date: String, time: String },

    /// The schedule snapshot was not valid JSON for the rule types.
    #[error("Schedule parse error: {0}")]
    Schedule(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
