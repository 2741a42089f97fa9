//! Phase to pixel mapping
//!
//! The sweep position is the sine of the phase rescaled to `0.0..=1.0`. Since
//! the sine flattens near its extrema the sweep dwells at both ends of the
//! strip, giving an ease-in/ease-out motion.

/// Fractional sweep position in `0.0..=1.0`.
pub fn sweep_fraction(phase: f64) -> f64 {
    ((libm::sin(phase) + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Pixel under the sweep for a strip of `pixel_count` pixels.
///
/// Always within `0..pixel_count`. A non-finite phase maps to pixel 0.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn pixel_index(phase: f64, pixel_count: usize) -> usize {
    let last = pixel_count.saturating_sub(1);
    let fraction = sweep_fraction(phase);
    if fraction.is_nan() {
        return 0;
    }
    let index = libm::round(fraction * last as f64) as usize;
    index.min(last)
}
