#![forbid(unsafe_code)]

//! Floating-point RGBA colors.
//!
//! [`Rgba`] is the concrete color every theme lookup eventually produces.
//! Channels are `f64` values conventionally in `[0, 1]`; constructors do not
//! clamp so that decoded values round-trip bit-for-bit. Use
//! [`Rgba::clamped`] when a value must be normalized before display.
//!
//! # Equality
//!
//! Equality and hashing compare channel bit patterns, with `-0.0` folded into
//! `0.0`. This keeps `Rgba` usable as (part of) a hash key. For tolerance
//! checks after arithmetic use [`Rgba::approx_eq`].

use std::fmt;
use std::hash::{Hash, Hasher};

/// A color with red, green, blue and opacity channels.
#[derive(Clone, Copy)]
pub struct Rgba {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
    /// Opacity (alpha) channel.
    pub opacity: f64,
}

impl Rgba {
    /// Attention-grabbing pink used when a themed color cannot be found.
    pub const PINK: Self = Self::new(1.0, 45.0 / 255.0, 85.0 / 255.0, 1.0);
    /// Opaque magenta returned for missing platform color assets.
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from its four channels.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Create a color from 8-bit channels.
    #[must_use]
    pub fn from_u8(red: u8, green: u8, blue: u8, opacity: u8) -> Self {
        Self::new(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(opacity) / 255.0,
        )
    }

    /// Channels as an ordered `[red, green, blue, opacity]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.opacity]
    }

    /// Build a color from an ordered `[red, green, blue, opacity]` array.
    #[must_use]
    pub const fn from_array(channels: [f64; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }

    /// Same color with the opacity replaced.
    #[must_use]
    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    /// Clamp every channel into `[0, 1]`. NaN channels become `0.0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        let clamp = |c: f64| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self::new(
            clamp(self.red),
            clamp(self.green),
            clamp(self.blue),
            clamp(self.opacity),
        )
    }

    /// True when every channel is finite and within `[0, 1]`.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        self.to_array()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Linear interpolation toward `to`. `t` is clamped to `[0, 1]`.
    ///
    /// `t = 0` returns `self` exactly and `t = 1` returns `to` exactly.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.red, to.red),
            mix(self.green, to.green),
            mix(self.blue, to.blue),
            mix(self.opacity, to.opacity),
        )
    }

    /// Channel-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    fn key(self) -> [u64; 4] {
        // Fold -0.0 into 0.0 so equal-looking colors hash the same.
        let bits = |c: f64| if c == 0.0 { 0.0_f64.to_bits() } else { c.to_bits() };
        [
            bits(self.red),
            bits(self.green),
            bits(self.blue),
            bits(self.opacity),
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Rgba {}

impl Hash for Rgba {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.opacity
        )
    }
}

impl From<[f64; 4]> for Rgba {
    fn from(channels: [f64; 4]) -> Self {
        Self::from_array(channels)
    }
}

impl From<Rgba> for [f64; 4] {
    fn from(color: Rgba) -> Self {
        color.to_array()
    }
}

impl From<(f64, f64, f64, f64)> for Rgba {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_u8_scales_channels() {
        let c = Rgba::from_u8(255, 0, 51, 255);
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn negative_zero_equals_zero() {
        let a = Rgba::new(-0.0, 0.5, 0.5, 1.0);
        let b = Rgba::new(0.0, 0.5, 0.5, 1.0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let from = Rgba::new(0.1, 0.2, 0.3, 0.4);
        let to = Rgba::new(0.9, 0.8, 0.7, 0.6);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, -3.0), from);
        assert_eq!(from.lerp(to, 7.0), to);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert!(mid.approx_eq(Rgba::new(0.5, 0.5, 0.5, 1.0), 1e-12));
    }

    #[test]
    fn lerp_nan_progress_stays_at_start() {
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, f64::NAN), Rgba::BLACK);
    }

    #[test]
    fn clamped_normalizes_out_of_range() {
        let c = Rgba::new(-1.0, 2.0, f64::NAN, 0.5).clamped();
        assert_eq!(c, Rgba::new(0.0, 1.0, 0.0, 0.5));
        assert!(c.is_normalized());
        assert!(!Rgba::new(1.5, 0.0, 0.0, 1.0).is_normalized());
    }

    #[test]
    fn with_opacity_keeps_rgb() {
        let c = Rgba::PINK.with_opacity(0.25);
        assert_eq!(c.red, Rgba::PINK.red);
        assert_eq!(c.opacity, 0.25);
    }

    #[test]
    fn array_conversions() {
        let c = Rgba::from([0.1, 0.2, 0.3, 0.4]);
        let arr: [f64; 4] = c.into();
        assert_eq!(arr, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(Rgba::from((0.1, 0.2, 0.3, 0.4)), c);
    }

    #[test]
    fn debug_format() {
        let dbg = format!("{:?}", Rgba::BLACK);
        assert_eq!(dbg, "Rgba(0, 0, 0, 1)");
    }
}
