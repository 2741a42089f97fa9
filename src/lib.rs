#![no_std]

pub mod color;
pub mod config;
pub mod error;
pub mod frame_scheduler;
pub mod ingest;
pub mod kernel;
pub mod math8;
pub mod phase;
pub mod position;
pub mod rate;
pub mod renderer;
pub mod sink;
pub mod store;

pub use config::LarsonConfig;
pub use error::{ConfigError, IngestError, SinkError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use ingest::{Ingestor, TelemetryChannels};
pub use kernel::{LarsonKernel, REFERENCE_KERNEL, larson_kernel};
pub use phase::PhaseClock;
pub use rate::EngineState;
pub use renderer::{FrameInfo, Renderer, TickOutcome};
pub use sink::{BufferedSink, LedSink, SinkGuard};
pub use store::{Signal, TelemetryReader, TelemetryReading, TelemetryStore, TelemetryWriter};

pub use color::{ColorMode, Rgb, UnitRgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms. It receives
/// whole frames, already scaled for brightness, through [`BufferedSink`].
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), SinkError>;
}
