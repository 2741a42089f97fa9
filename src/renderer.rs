use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{ColorMode, PriceScale, Rgb, UnitRgb};
use crate::config::LarsonConfig;
use crate::error::ConfigError;
use crate::kernel::LarsonKernel;
use crate::phase::PhaseClock;
use crate::position::pixel_index;
use crate::rate::EngineState;
use crate::store::{TelemetryReader, TelemetryReading};

/// What was computed for a rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub reading: TelemetryReading,
    pub activity: f32,
    pub phase: f64,
    pub pixel_index: usize,
    pub mode: ColorMode,
    pub color: UnitRgb,
}

/// Result of one engine tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing flowing, no frame produced
    Idle,
    /// A new frame is in the renderer's buffer
    Rendered(FrameInfo),
}

impl TickOutcome {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Larson scanner engine for a strip of `N` pixels
///
/// Reads a telemetry snapshot each tick, advances the sweep phase and draws
/// the comet into an internal frame buffer. Pushing the frame to a sink is
/// left to [`FrameScheduler`](crate::FrameScheduler).
pub struct Renderer<'a, const N: usize> {
    // External dependencies and configuration
    telemetry: TelemetryReader<'a>,
    kernel: LarsonKernel<'a>,
    prices: PriceScale,
    high_usage_watts: f32,
    brightness: f32,

    // Internal state
    clock: PhaseClock,
    state: EngineState,
    frame_buffer: [Rgb; N],
}

impl<'a, const N: usize> Renderer<'a, N> {
    /// Create a renderer reading from `telemetry`.
    ///
    /// Fails if the configuration is invalid or the kernel does not match `N`.
    pub fn new(telemetry: TelemetryReader<'a>, config: &LarsonConfig<'a>) -> Result<Self, ConfigError> {
        config.validate()?;
        let kernel = LarsonKernel::new(config.kernel, N)?;
        Ok(Self {
            telemetry,
            kernel,
            prices: PriceScale::new(config.low_price, config.high_price),
            high_usage_watts: config.high_usage_watts,
            brightness: config.brightness,
            clock: PhaseClock::new(),
            state: EngineState::Idle,
            frame_buffer: [Rgb::default(); N],
        })
    }

    /// Process one tick
    ///
    /// While idle the phase stays frozen and the previous frame is kept.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let reading = self.telemetry.snapshot();
        self.tick_with(reading, now)
    }

    /// Process one tick from an explicit snapshot instead of the store.
    pub fn tick_with(&mut self, reading: TelemetryReading, now: Instant) -> TickOutcome {
        let state = EngineState::from_reading(&reading, self.high_usage_watts);
        self.log_transition(state);
        self.state = state;

        let EngineState::Animating { activity, omega } = state else {
            self.clock.refresh(now);
            return TickOutcome::Idle;
        };

        let phase = self.clock.advance(omega, now);
        let pixel_index = pixel_index(phase, N);
        let mode = ColorMode::of(&reading);
        let color = self.prices.color_for(&reading);
        self.draw(pixel_index, color);

        TickOutcome::Rendered(FrameInfo {
            reading,
            activity,
            phase,
            pixel_index,
            mode,
            color,
        })
    }

    /// Fill the frame buffer with the comet at `pixel_index`.
    pub fn draw(&mut self, pixel_index: usize, color: UnitRgb) -> &[Rgb; N] {
        let max = self.kernel.max();
        let window = self.kernel.window(pixel_index);
        for (pixel, &intensity) in self.frame_buffer.iter_mut().zip(window) {
            *pixel = color.scaled(intensity, max);
        }
        &self.frame_buffer
    }

    /// Last drawn frame
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }

    /// State selected on the last tick
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Current sweep phase
    pub const fn phase(&self) -> f64 {
        self.clock.angle()
    }

    /// Initial sink brightness from the configuration
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    #[cfg(feature = "esp32-log")]
    fn log_transition(&self, next: EngineState) {
        if self.state.is_idle() == next.is_idle() {
            return;
        }
        if next.is_idle() {
            println!("[Renderer] no power flowing, going idle");
        } else {
            println!("[Renderer] power flowing, animating");
        }
    }

    #[cfg(not(feature = "esp32-log"))]
    #[allow(clippy::unused_self)]
    fn log_transition(&self, _next: EngineState) {}
}
