//! Larson scan kernel
//!
//! The kernel is a symmetric intensity taper twice as long as the strip. The
//! strip shows a window of `pixel_count` entries starting at the current pixel
//! index, so sliding the window moves the lit "comet" across the strip.

use crate::error::ConfigError;

/// Taper around the peak, in order from the leading tail to the trailing tail.
const TAPER: [u8; 5] = [16, 64, 255, 64, 16];

/// Offset of the peak inside [`TAPER`].
const TAPER_PEAK: usize = 2;

/// Kernel for the 8 pixel boards the scanner was designed for.
pub const REFERENCE_KERNEL: [u8; 16] = larson_kernel::<16>();

/// Build a kernel table of length `L` with the peak at `L / 2 - 1`.
///
/// Entries of the taper that would fall outside the table are dropped.
pub const fn larson_kernel<const L: usize>() -> [u8; L] {
    let mut table = [0u8; L];
    if L < 2 {
        return table;
    }
    let peak = L / 2 - 1;
    let mut i = 0;
    while i < TAPER.len() {
        // peak + i - TAPER_PEAK, skipping entries left of index 0
        if peak + i >= TAPER_PEAK {
            let index = peak + i - TAPER_PEAK;
            if index < L {
                table[index] = TAPER[i];
            }
        }
        i += 1;
    }
    table
}

/// Kernel table checked against the strip it renders to.
#[derive(Debug, Clone, Copy)]
pub struct LarsonKernel<'a> {
    table: &'a [u8],
    max: u8,
}

impl<'a> LarsonKernel<'a> {
    /// Wrap a table for a strip of `pixel_count` pixels.
    ///
    /// The table must hold exactly `2 * pixel_count` entries, so that
    /// `pixel_index + x` stays in bounds for every pixel index in
    /// `0..pixel_count` and every `x` in `0..pixel_count`.
    pub fn new(table: &'a [u8], pixel_count: usize) -> Result<Self, ConfigError> {
        if pixel_count == 0 {
            return Err(ConfigError::NoPixels);
        }
        let expected = pixel_count * 2;
        if table.len() != expected {
            return Err(ConfigError::KernelLength {
                expected,
                actual: table.len(),
            });
        }
        let max = table.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Err(ConfigError::EmptyKernel);
        }
        Ok(Self { table, max })
    }

    /// Highest intensity in the table, used to normalise lookups.
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Number of pixels the kernel was validated for.
    pub const fn pixel_count(&self) -> usize {
        self.table.len() / 2
    }

    /// The window of intensities shown when the sweep is at `pixel_index`.
    ///
    /// Indices past the last pixel are clamped to it.
    pub fn window(&self, pixel_index: usize) -> &'a [u8] {
        let count = self.pixel_count();
        let start = pixel_index.min(count - 1);
        &self.table[start..start + count]
    }

    /// Intensity of physical pixel `x` with the sweep at `pixel_index`.
    pub fn intensity(&self, pixel_index: usize, x: usize) -> u8 {
        self.window(pixel_index).get(x).copied().unwrap_or(0)
    }
}
