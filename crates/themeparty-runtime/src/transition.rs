#![forbid(unsafe_code)]

//! Animation descriptors carried with a theme change.
//!
//! The registry never interprets a [`Transition`]; it hands it to observers
//! alongside the new selection. [`ThemedColor`](crate::ThemedColor) uses it to
//! interpolate from the previous color to the new one.

use std::time::Duration;

/// Easing curve applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerating cubic.
    EaseIn,
    /// Decelerating cubic.
    EaseOut,
    /// Cubic S-curve.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Input outside the range is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// How a theme change should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Total animation length. Zero means an instant switch.
    pub duration: Duration,
    /// Progress curve.
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(350),
            easing: Easing::EaseInOut,
        }
    }
}

impl Transition {
    /// Create a transition.
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Linear transition over `duration`.
    #[must_use]
    pub const fn linear(duration: Duration) -> Self {
        Self::new(duration, Easing::Linear)
    }

    /// A transition that completes immediately.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }

    /// Set the easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Eased progress after `elapsed` time, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        let linear = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.apply(linear)
    }

    /// True once `elapsed` covers the whole duration.
    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
