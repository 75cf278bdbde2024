//! Colour ramp for depth shading

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// RGBA colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    pub const fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Convert hue/saturation/brightness (all `[0, 1]`) to RGB
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let v = brightness;
        let p = v * (1.0 - saturation);
        let q = v * (1.0 - saturation * f);
        let t = v * (1.0 - saturation * (1.0 - f));

        let (red, green, blue) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self { red, green, blue, alpha }
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { alpha, ..*self }
    }

    /// Perceived luminance, used to compare shading
    pub fn luminance(&self) -> f64 {
        0.2126 * self.red + 0.7152 * self.green + 0.0722 * self.blue
    }
}

/// Single-hue ramp: shallow is bright, deep is dark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRamp {
    pub hue: f64,
    pub saturation: f64,
    pub max_brightness: f64,
    pub min_brightness: f64,
}

impl Default for DepthRamp {
    fn default() -> Self {
        Self {
            hue: DEPTH_RAMP_HUE,
            saturation: 1.0,
            max_brightness: DEPTH_RAMP_MAX_BRIGHTNESS,
            min_brightness: DEPTH_RAMP_MIN_BRIGHTNESS,
        }
    }
}

impl DepthRamp {
    /// Brightness for a normalized depth
    pub fn brightness_for(&self, normalized: f64) -> f64 {
        let n = normalized.clamp(0.0, 1.0);
        self.max_brightness - n * (self.max_brightness - self.min_brightness)
    }

    /// Opaque colour for a normalized depth in `[0, 1]`
    pub fn color_for(&self, normalized: f64) -> Rgba {
        Rgba::from_hsb(self.hue, self.saturation, self.brightness_for(normalized), 1.0)
    }
}
