//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller supplies the current time and is responsible for sleeping between
//! ticks, either by hand or through [`FrameScheduler::run`].

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::{ConfigError, SinkError};
use crate::renderer::{Renderer, TickOutcome};
use crate::sink::{LedSink, SinkGuard};

/// Pause after a rendered frame, bounding CPU use without visible stutter.
pub const FRAME_YIELD: Duration = Duration::from_millis(1);

/// Pause while idle, before looking at the telemetry again.
pub const IDLE_SLEEP: Duration = Duration::from_secs(1);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// What the engine did on this tick.
    pub outcome: TickOutcome,
    /// Sink failure that was logged and skipped, if any.
    pub write_error: Option<SinkError>,
    /// When the next tick is due.
    pub next_deadline: Instant,
    /// How long to wait until the next tick.
    pub sleep_duration: Duration,
}

/// Drives a [`Renderer`] and pushes its frames to an LED sink.
///
/// The sink is held in a [`SinkGuard`], so dropping the scheduler (on a fatal
/// sink error, a panic or a normal shutdown) clears the strip.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, sink)?;
///
/// loop {
///     let result = scheduler.tick(Instant::now())?;
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<'a, S: LedSink, const N: usize> {
    renderer: Renderer<'a, N>,
    sink: SinkGuard<S>,
}

impl<'a, S: LedSink, const N: usize> FrameScheduler<'a, S, N> {
    /// Take ownership of the sink and apply the configured brightness.
    pub fn new(renderer: Renderer<'a, N>, mut sink: S) -> Result<Self, ConfigError> {
        if sink.pixel_count() < N {
            return Err(ConfigError::SinkLength {
                expected: N,
                actual: sink.pixel_count(),
            });
        }
        sink.set_brightness(renderer.brightness());
        Ok(Self {
            renderer,
            sink: SinkGuard::new(sink),
        })
    }

    /// Process one tick and return timing information.
    ///
    /// Idle ticks push nothing to the sink. A failed write is logged and
    /// reported in the result; only [`SinkError::Unavailable`] is returned as
    /// an error, after which the scheduler should be dropped.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, SinkError> {
        let outcome = self.renderer.tick(now);
        let mut write_error = None;

        let sleep_duration = match outcome {
            TickOutcome::Idle => IDLE_SLEEP,
            TickOutcome::Rendered(_) => {
                if let Err(err) = self.push_frame() {
                    if err.is_fatal() {
                        return Err(err);
                    }
                    #[cfg(feature = "esp32-log")]
                    println!("[FrameScheduler.tick] {}, skipping frame", err);
                    write_error = Some(err);
                }
                FRAME_YIELD
            }
        };

        Ok(FrameResult {
            outcome,
            write_error,
            next_deadline: now + sleep_duration,
            sleep_duration,
        })
    }

    /// Tick until the sink becomes unavailable.
    ///
    /// `now` reads the monotonic clock and `sleep` blocks for the given
    /// duration. The strip is cleared once this returns and the scheduler is
    /// dropped.
    pub fn run(
        &mut self,
        mut now: impl FnMut() -> Instant,
        mut sleep: impl FnMut(Duration),
    ) -> SinkError {
        loop {
            match self.tick(now()) {
                Ok(result) => sleep(result.sleep_duration),
                Err(err) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[FrameScheduler.run] {}, stopping", err);
                    return err;
                }
            }
        }
    }

    fn push_frame(&mut self) -> Result<(), SinkError> {
        for (index, pixel) in self.renderer.frame().iter().enumerate() {
            self.sink.set_pixel(index, *pixel);
        }
        self.sink.show()
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, N> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, N> {
        &mut self.renderer
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
