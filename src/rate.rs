//! Activity rate and engine state
//!
//! The activity rate is the larger of import and export power, as a fraction
//! of the configured high usage. It selects the engine state for the tick and,
//! while animating, the angular velocity of the sweep.

use core::f64::consts::TAU;

use crate::store::TelemetryReading;

/// Upper bound on the activity rate, a thousand sweeps per second.
///
/// Far above anything a strip can show, it keeps the phase step small enough
/// for later ticks to still move the angle.
pub const MAX_ACTIVITY: f32 = 1000.0;

/// Engine state for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineState {
    /// No power flowing: nothing is rendered and the phase is frozen.
    Idle,
    /// Power flowing: the sweep advances at `omega` radians per second.
    Animating { activity: f32, omega: f64 },
}

impl EngineState {
    /// Derive the state from a telemetry snapshot.
    ///
    /// `high_usage_watts` must be positive; [`LarsonConfig::validate`]
    /// guarantees that for the renderer.
    ///
    /// [`LarsonConfig::validate`]: crate::config::LarsonConfig::validate
    #[allow(clippy::float_cmp)]
    pub fn from_reading(reading: &TelemetryReading, high_usage_watts: f32) -> Self {
        let activity = activity(reading, high_usage_watts);
        if activity == 0.0 {
            return Self::Idle;
        }
        Self::Animating {
            activity,
            omega: angular_velocity(activity),
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Ratio of the dominant power flow to the high usage threshold.
///
/// Negative readings count as no flow, so the sweep never runs backwards.
/// The ratio saturates at [`MAX_ACTIVITY`].
pub fn activity(reading: &TelemetryReading, high_usage_watts: f32) -> f32 {
    let power = reading.import_power.max(reading.export_power).max(0.0);
    (power / high_usage_watts).min(MAX_ACTIVITY)
}

/// One full cycle per second at activity `1.0`.
pub fn angular_velocity(activity: f32) -> f64 {
    TAU * f64::from(activity)
}
