mod hsv;
mod price;

pub use hsv::{UnitHsv, UnitRgb, hsv_to_rgb};
pub use price::{ColorMode, EXPORT_HUE, IMPORT_HUE_HIGH, IMPORT_HUE_LOW, PriceScale, price_hue};
use smart_leds::RGB8;

pub type Rgb = RGB8;
