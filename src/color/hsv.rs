//! Floating point HSV to RGB conversion
//!
//! `smart_leds::hsv` works on a 0-255 hue circle, which is too coarse for the
//! price gradient, so hue, saturation and value here are all `0.0..=1.0`.

use crate::color::Rgb;

/// HSV color with every component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitHsv {
    /// Hue as a fraction of the color wheel
    pub hue: f32,
    pub sat: f32,
    pub val: f32,
}

impl UnitHsv {
    /// Fully saturated, full value color of the given hue.
    pub const fn from_hue(hue: f32) -> Self {
        Self {
            hue,
            sat: 1.0,
            val: 1.0,
        }
    }
}

/// RGB color with every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl UnitRgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Scale by `intensity / max` and quantize to 8 bit channels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scaled(self, intensity: u8, max: u8) -> Rgb {
        if max == 0 {
            return Rgb::default();
        }
        let factor = 255.0 * f32::from(intensity) / f32::from(max);
        let channel = |c: f32| libm::roundf((c * factor).clamp(0.0, 255.0)) as u8;
        Rgb {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

/// Convert HSV to RGB using the standard six sector transform.
///
/// Hue wraps around, so `1.0` and `0.0` are both red.
#[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
pub fn hsv_to_rgb(hsv: UnitHsv) -> UnitRgb {
    let UnitHsv { hue, sat, val } = hsv;
    if sat <= 0.0 {
        return UnitRgb::new(val, val, val);
    }

    let h = (hue - libm::floorf(hue)) * 6.0;
    let sector = libm::floorf(h);
    let f = h - sector;
    let p = val * (1.0 - sat);
    let q = val * (1.0 - sat * f);
    let t = val * (1.0 - sat * (1.0 - f));

    match (sector as i32).rem_euclid(6) {
        0 => UnitRgb::new(val, t, p),
        1 => UnitRgb::new(q, val, p),
        2 => UnitRgb::new(p, val, t),
        3 => UnitRgb::new(p, q, val),
        4 => UnitRgb::new(t, p, val),
        _ => UnitRgb::new(val, p, q),
    }
}
