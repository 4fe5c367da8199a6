//! Engine tunables. Every field has a default so a snapshot may omit the
//! `config` object entirely or override only part of it.

use serde::{Deserialize, Serialize};

/// Slot size used when the caller does not supply one.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Floor that caller-supplied slot sizes are clamped to.
pub const MIN_SLOT_MINUTES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_slot_minutes: u32,
    pub min_slot_minutes: u32,
    /// Appointment lengths a booking request may ask for.
    pub booking_durations: Vec<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_slot_minutes: DEFAULT_SLOT_MINUTES,
            min_slot_minutes: MIN_SLOT_MINUTES,
            booking_durations: vec![30, 60],
        }
    }
}
