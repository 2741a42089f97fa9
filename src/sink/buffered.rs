//! Frame buffered sink with global brightness
//!
//! Adapts a whole-frame [`OutputDriver`] to the per-pixel [`LedSink`]
//! contract. Brightness is applied when the frame is flushed, so staged pixel
//! values stay untouched.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::LedSink;
use crate::OutputDriver;
use crate::color::Rgb;
use crate::error::SinkError;
use crate::math8::{ratio8, scale8};

/// Sink for `N` pixels writing through an [`OutputDriver`].
pub struct BufferedSink<D: OutputDriver, const N: usize> {
    driver: D,
    /// Pixels staged by the renderer
    staged: [Rgb; N],
    /// Pixels after brightness, as last written to the driver
    output: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> BufferedSink<D, N> {
    /// Create a sink at full brightness with every pixel off.
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            staged: [Rgb { r: 0, g: 0, b: 0 }; N],
            output: [Rgb { r: 0, g: 0, b: 0 }; N],
            brightness: 255,
        }
    }

    /// Current brightness factor (0-255 = 0.0-1.0).
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Pixels as last written to the driver.
    pub const fn output(&self) -> &[Rgb; N] {
        &self.output
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn apply_brightness(&mut self) {
        let brightness = self.brightness;
        for (out, pixel) in self.output.iter_mut().zip(self.staged.iter()) {
            *out = if brightness == 255 {
                *pixel
            } else {
                Rgb {
                    r: scale8(pixel.r, brightness),
                    g: scale8(pixel.g, brightness),
                    b: scale8(pixel.b, brightness),
                }
            };
        }
    }
}

impl<D: OutputDriver, const N: usize> LedSink for BufferedSink<D, N> {
    fn pixel_count(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.staged.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> Result<(), SinkError> {
        self.apply_brightness();
        self.driver.write(&self.output)
    }

    fn set_brightness(&mut self, ratio: f32) {
        self.brightness = ratio8(ratio);
        #[cfg(feature = "esp32-log")]
        println!("[BufferedSink.set_brightness] {} ({})", ratio, self.brightness);
    }
}
