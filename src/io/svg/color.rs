//! Color mapping utilities for SVG visualization.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self { r: (hex >> 16) as u8, g: (hex >> 8) as u8, b: hex as u8 }
    }

    /// Componentwise linear interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb { r: mix(self.r, other.r), g: mix(self.g, other.g), b: mix(self.b, other.b) }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

pub const BEST_COLOR: Rgb = Rgb::new(20, 215, 90);
pub const MEDIUM_COLOR: Rgb = Rgb::new(120, 115, 0);
pub const WORST_COLOR: Rgb = Rgb::new(100, 5, 0);
pub const DARK_COLOR: Rgb = Rgb::from_hex(0x404040);
pub const NEUTRAL_COLOR: Rgb = Rgb::new(150, 150, 150);

/// Map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
#[inline]
pub fn remap(from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64, value: f64) -> f64 {
    to_lo + (value - from_lo) * (to_hi - to_lo) / (from_hi - from_lo)
}

/// Two-stage heat ramp for a normalized score: best -> medium below 0.5,
/// medium -> worst from 0.5 up.
pub fn heat_color(score: f64) -> Rgb {
    // Handle NaN / infinities: fall back to neutral gray.
    if !score.is_finite() { return NEUTRAL_COLOR }

    if score >= 0.5 {
        MEDIUM_COLOR.lerp(WORST_COLOR, remap(0.5, 1.0, 0.0, 1.0, score))
    } else {
        BEST_COLOR.lerp(MEDIUM_COLOR, remap(0.0, 0.5, 0.0, 1.0, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_hits_its_anchors() {
        assert_eq!(heat_color(0.0), BEST_COLOR);
        assert_eq!(heat_color(0.5), MEDIUM_COLOR);
        assert_eq!(heat_color(1.0), WORST_COLOR);
        assert_eq!(heat_color(f64::NAN), NEUTRAL_COLOR);
    }

    #[test]
    fn ramp_interpolates_within_each_stage() {
        assert_eq!(heat_color(0.25), Rgb::new(70, 165, 45));
        assert_eq!(heat_color(0.75), Rgb::new(110, 60, 0));
        // out-of-range scores clamp to the ends
        assert_eq!(heat_color(-1.0), BEST_COLOR);
        assert_eq!(heat_color(2.0), WORST_COLOR);
    }

    #[test]
    fn css_formatting() {
        assert_eq!(DARK_COLOR.to_string(), "rgb(64,64,64)");
        assert_eq!(remap(0.0, 0.5, 0.0, 1.0, 0.2), 0.4);
    }
}
