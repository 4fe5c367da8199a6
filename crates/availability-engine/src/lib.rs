//! # availability-engine
//!
//! Deterministic appointment availability for booking backends.
//!
//! Given a calendar date and a slot size, the engine answers "which start
//! times are bookable?" by reconciling four sources of truth: one-off
//! special days, annually recurring holidays, weekly business hours and
//! already-booked appointments. Exactly one override tier governs a date
//! (special day, then holiday, then business hours); its window is cut into
//! slots, elapsed same-day slots are dropped and slots colliding with
//! bookings are removed.
//!
//! The engine performs no I/O. Rules and bookings come from a
//! [`RuleSource`] and "now" is supplied by the caller.
//!
//! ## Modules
//!
//! - [`time`] — `CalendarDate`, `ClockTime`, weekday numbering, digit normalization
//! - [`interval`] — Half-open windows, day clipping, date and month/day ranges
//! - [`rules`] — Special day, holiday, weekly hours and appointment records
//! - [`source`] — `RuleSource` read interface and the in-memory `Schedule`
//! - [`resolver`] — Three-tier override resolution into a `DayPlan`
//! - [`slots`] — Slot generation and same-day truncation
//! - [`conflict`] — Overlap detection against existing appointments
//! - [`availability`] — The end-to-end availability query
//! - [`booking`] — Admission check for new booking requests
//! - [`config`] — Engine tunables
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod resolver;
pub mod rules;
pub mod slots;
pub mod source;
pub mod time;

pub use availability::{compute_availability, resolve_availability, Availability};
pub use booking::{check_booking, AdmittedBooking, BookingRequest};
pub use config::EngineConfig;
pub use conflict::{filter_conflicts, find_conflicts, Conflict};
pub use error::AvailabilityError;
pub use resolver::{holiday_info, resolve_day_plan, DayPlan, HolidayInfo, PlanSource, SourceKind};
pub use rules::{Appointment, HolidayRule, SpecialDayRule, WeeklyHours};
pub use slots::{generate_slots, SlotMinutes};
pub use source::{DaySnapshot, RuleSource, Schedule};
pub use time::{CalendarDate, ClockTime};
