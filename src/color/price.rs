//! Telemetry to color mapping
//!
//! Exporting is shown in sunshine yellow. Importing is colored by price, from
//! blue at the low end of the configured range through magenta to red at the
//! high end.

use super::hsv::{UnitHsv, UnitRgb, hsv_to_rgb};
use crate::store::TelemetryReading;

/// Hue used while exporting (60 degrees, yellow).
pub const EXPORT_HUE: f32 = 60.0 / 360.0;

/// Hue at the low end of the price range (240 degrees, blue).
pub const IMPORT_HUE_LOW: f32 = 240.0 / 360.0;

/// Hue at the high end of the price range (360 degrees wrapped to 0, red).
pub const IMPORT_HUE_HIGH: f32 = 0.0;

/// Degrees of hue covered by the price gradient.
const PRICE_HUE_SPAN_DEG: f32 = 120.0;

/// Which flow drives the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Import,
    Export,
}

impl ColorMode {
    /// Exporting whenever any export power is reported.
    pub fn of(reading: &TelemetryReading) -> Self {
        if reading.export_power > 0.0 {
            Self::Export
        } else {
            Self::Import
        }
    }
}

/// Price bounds of the import color gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    low: f32,
    high: f32,
}

impl PriceScale {
    /// `high` must be greater than `low`; see
    /// [`LarsonConfig::validate`](crate::config::LarsonConfig::validate).
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Position of `price` on the gradient, `0.0..=1.0`.
    ///
    /// The range is rebased by the magnitude of the low bound so that
    /// negative prices map to the blue end.
    pub fn ratio(&self, price: f32) -> f32 {
        let offset = libm::fabsf(self.low);
        let rebased = (price + offset).max(0.0);
        (rebased / (self.high + offset)).min(1.0)
    }

    /// Hue for an import at `price`.
    pub fn hue(&self, price: f32) -> f32 {
        price_hue(self.ratio(price))
    }

    /// Hue for a telemetry snapshot.
    pub fn hue_for(&self, reading: &TelemetryReading) -> f32 {
        match ColorMode::of(reading) {
            ColorMode::Export => EXPORT_HUE,
            ColorMode::Import => self.hue(reading.price),
        }
    }

    /// Full brightness color for a telemetry snapshot.
    pub fn color_for(&self, reading: &TelemetryReading) -> UnitRgb {
        hsv_to_rgb(UnitHsv::from_hue(self.hue_for(reading)))
    }
}

/// Hue for a price ratio in `0.0..=1.0`, wrapped into `0.0..1.0`.
pub fn price_hue(ratio: f32) -> f32 {
    let hue = (240.0 + PRICE_HUE_SPAN_DEG * ratio) / 360.0;
    hue - libm::floorf(hue)
}
