//! Phase accumulation
//!
//! Integrates angular velocity over elapsed frame time. The angle is never
//! wrapped: consumers only take its sine, which handles periodicity.

use embassy_time::Instant;

/// Continuously growing sweep phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseClock {
    /// Accumulated angle in radians
    angle: f64,
    /// Time of the previous tick, `None` before the first one
    last_tick: Option<Instant>,
}

impl PhaseClock {
    pub const fn new() -> Self {
        Self {
            angle: 0.0,
            last_tick: None,
        }
    }

    /// Current phase angle in radians.
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Time of the previous tick.
    pub const fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    /// Seconds elapsed since the previous tick, zero on the first tick or if
    /// `now` is not after it.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        let Some(last) = self.last_tick else {
            return 0.0;
        };
        #[allow(clippy::cast_precision_loss)]
        let micros = now.saturating_duration_since(last).as_micros() as f64;
        micros / 1_000_000.0
    }

    /// Advance the angle by `omega * dt` and return the new angle.
    ///
    /// A step that is not finite, or would move the angle backwards, is
    /// dropped so the angle always stays a usable finite value.
    pub fn advance(&mut self, omega: f64, now: Instant) -> f64 {
        let dt = self.elapsed_secs(now);
        let next = self.angle + omega * dt;
        if next.is_finite() && next >= self.angle {
            self.angle = next;
        }
        self.last_tick = Some(now);
        self.angle
    }

    /// Record a tick without moving the angle.
    ///
    /// Used while idle so that resuming does not integrate the idle period.
    pub fn refresh(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }
}
