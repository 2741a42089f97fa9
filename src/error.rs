//! Error types shared by the engine, the ingestion boundary and LED sinks.

use core::fmt;

/// Configuration rejected before the render loop is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The strip must have at least one pixel.
    NoPixels,
    /// `high_usage_watts` must be finite and strictly positive.
    HighUsage(f32),
    /// `high_price` must be strictly greater than `low_price`.
    PriceRange { low: f32, high: f32 },
    /// Brightness ratio outside `0.0..=1.0`.
    Brightness(f32),
    /// Kernel table length does not match `2 * pixel_count`.
    KernelLength { expected: usize, actual: usize },
    /// Kernel table has no non-zero entry.
    EmptyKernel,
    /// The sink has fewer pixels than the renderer draws.
    SinkLength { expected: usize, actual: usize },
    /// A telemetry channel identifier is empty or too long.
    ChannelId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPixels => write!(f, "pixel count must be at least 1"),
            Self::HighUsage(watts) => {
                write!(f, "high usage must be a positive number of watts, got {watts}")
            }
            Self::PriceRange { low, high } => {
                write!(f, "high price ({high}) must be greater than low price ({low})")
            }
            Self::Brightness(ratio) => {
                write!(f, "brightness must be within 0.0..=1.0, got {ratio}")
            }
            Self::KernelLength { expected, actual } => {
                write!(f, "kernel must have {expected} entries, got {actual}")
            }
            Self::EmptyKernel => write!(f, "kernel has no lit entries"),
            Self::SinkLength { expected, actual } => {
                write!(f, "sink must have at least {expected} pixels, got {actual}")
            }
            Self::ChannelId => write!(f, "channel identifier is empty or too long"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Telemetry update discarded at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestError {
    /// The channel identifier is not one of the configured channels.
    UnknownChannel,
    /// The payload is not valid UTF-8.
    Encoding,
    /// The payload is not a finite decimal number.
    Malformed,
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChannel => write!(f, "update for an unknown channel"),
            Self::Encoding => write!(f, "payload is not valid UTF-8"),
            Self::Malformed => write!(f, "payload is not a finite number"),
        }
    }
}

impl core::error::Error for IngestError {}

/// Failure reported by an LED sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// A single frame could not be written; the next frame may succeed.
    Write,
    /// The sink is gone for good and the render loop must stop.
    Unavailable,
}

impl SinkError {
    /// Whether the render loop has to terminate.
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => write!(f, "failed to write frame to LED sink"),
            Self::Unavailable => write!(f, "LED sink is permanently unavailable"),
        }
    }
}

impl core::error::Error for SinkError {}
