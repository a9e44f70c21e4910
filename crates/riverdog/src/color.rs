use std::ops::RangeInclusive;

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Hue, saturation and brightness, each normalized to `[0, 1]`.
///
/// Hue wraps: `0.0` and `1.0` are both red, but conversion from RGB only
/// ever produces values in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    pub const fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self { hue, saturation, brightness }
    }

    /// Standard RGB to HSB conversion.
    pub fn from_rgb(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let brightness = max as f32 / 255.0;
        let saturation = if max != 0 {
            (max - min) as f32 / max as f32
        } else {
            0.0
        };

        let hue = if saturation == 0.0 {
            0.0
        } else {
            let spread = (max - min) as f32;
            let red_c = (max - r) as f32 / spread;
            let green_c = (max - g) as f32 / spread;
            let blue_c = (max - b) as f32 / spread;

            let sector = if r == max {
                blue_c - green_c
            } else if g == max {
                2.0 + red_c - blue_c
            } else {
                4.0 + green_c - red_c
            };

            let hue = sector / 6.0;
            if hue < 0.0 { hue + 1.0 } else { hue }
        };

        Self { hue, saturation, brightness }
    }

    /// Inverse of [`Hsb::from_rgb`], rounding each channel to the nearest integer.
    pub fn to_rgb(self) -> Rgb<u8> {
        let scale = |v: f32| (v * 255.0 + 0.5) as u8;

        if self.saturation == 0.0 {
            let v = scale(self.brightness);
            return Rgb([v, v, v]);
        }

        let h = (self.hue - self.hue.floor()) * 6.0;
        let f = h - h.floor();
        let v = self.brightness;
        let p = v * (1.0 - self.saturation);
        let q = v * (1.0 - self.saturation * f);
        let t = v * (1.0 - self.saturation * (1.0 - f));

        let (r, g, b) = match h as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb([scale(r), scale(g), scale(b)])
    }

    /// True when every channel differs from `other` by at most `tolerance`.
    pub fn within(&self, other: &Hsb, tolerance: f32) -> bool {
        (self.hue - other.hue).abs() <= tolerance
            && (self.saturation - other.saturation).abs() <= tolerance
            && (self.brightness - other.brightness).abs() <= tolerance
    }
}

/// Closed intervals on each HSB channel.
///
/// Hue is not wrapped across `0/1`: a window around red has to be expressed
/// as two windows by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct HsbWindow {
    pub hue: RangeInclusive<f32>,
    pub saturation: RangeInclusive<f32>,
    pub brightness: RangeInclusive<f32>,
}

/// 160 degrees.
pub const HUE_LOW: f32 = 0.444444;
/// 265 degrees.
pub const HUE_HIGH: f32 = 0.736111;
/// 15 percent.
pub const SAT_LOW: f32 = 0.15;
/// Full saturation.
pub const SAT_HIGH: f32 = 1.0;
/// 10 percent.
pub const BRIGHT_LOW: f32 = 0.1;
/// 90 percent.
pub const BRIGHT_HIGH: f32 = 0.9;

impl HsbWindow {
    /// Colors that can be water: cyan through violet, not washed out, neither
    /// black nor blown out.
    pub const RIVER: HsbWindow = HsbWindow {
        hue: HUE_LOW..=HUE_HIGH,
        saturation: SAT_LOW..=SAT_HIGH,
        brightness: BRIGHT_LOW..=BRIGHT_HIGH,
    };

    pub fn contains(&self, hsb: &Hsb) -> bool {
        self.hue.contains(&hsb.hue)
            && self.saturation.contains(&hsb.saturation)
            && self.brightness.contains(&hsb.brightness)
    }
}
