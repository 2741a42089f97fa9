/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math so per-frame brightness scaling stays cheap on
/// microcontrollers without an FPU.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Convert a `0.0..=1.0` ratio to an 8-bit factor, clamping out of range input.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn ratio8(ratio: f32) -> u8 {
    if ratio.is_nan() {
        return 0;
    }
    libm::roundf(ratio.clamp(0.0, 1.0) * 255.0) as u8
}
