use crate::error::ConfigError;
use crate::kernel::REFERENCE_KERNEL;

/// Default power considered high usage, in watts.
pub const DEFAULT_HIGH_USAGE_WATTS: f32 = 2000.0;

/// Default bottom of the price gradient (blue).
pub const DEFAULT_LOW_PRICE: f32 = -5.0;

/// Default top of the price gradient (red).
pub const DEFAULT_HIGH_PRICE: f32 = 25.0;

/// Configuration of the scanner engine
///
/// Immutable for the lifetime of the render loop. The pixel count is not part
/// of this struct: it is the `N` const parameter of the renderer and is checked
/// against the kernel length when the renderer is built.
#[derive(Debug, Clone, Copy)]
pub struct LarsonConfig<'a> {
    /// Power at which the sweep completes one cycle per second
    pub high_usage_watts: f32,
    /// Price mapped to blue
    pub low_price: f32,
    /// Price mapped to red
    pub high_price: f32,
    /// Initial sink brightness (0.0-1.0)
    pub brightness: f32,
    /// Intensity table, `2 * N` entries long
    pub kernel: &'a [u8],
}

impl Default for LarsonConfig<'static> {
    fn default() -> Self {
        Self {
            high_usage_watts: DEFAULT_HIGH_USAGE_WATTS,
            low_price: DEFAULT_LOW_PRICE,
            high_price: DEFAULT_HIGH_PRICE,
            brightness: 1.0,
            kernel: &REFERENCE_KERNEL,
        }
    }
}

impl LarsonConfig<'_> {
    /// Check the numeric parameters.
    ///
    /// The kernel length is validated separately by
    /// [`LarsonKernel::new`](crate::kernel::LarsonKernel::new) since it
    /// depends on the strip length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.high_usage_watts.is_finite() || self.high_usage_watts <= 0.0 {
            return Err(ConfigError::HighUsage(self.high_usage_watts));
        }
        if !(self.low_price.is_finite() && self.high_price.is_finite())
            || self.high_price <= self.low_price
        {
            return Err(ConfigError::PriceRange {
                low: self.low_price,
                high: self.high_price,
            });
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::Brightness(self.brightness));
        }
        Ok(())
    }
}
