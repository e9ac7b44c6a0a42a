#![forbid(unsafe_code)]

//! Theme-relative or fixed color references.

use std::fmt;

use crate::color::Rgba;

/// A color that is either looked up by name in the active theme or fixed.
///
/// `ColorRef` is the portable descriptor views hold instead of a concrete
/// color. It is resolved against a theme registry at render time.
///
/// # Example
///
/// ```
/// use themeparty_style::{ColorRef, Rgba};
///
/// let accent = ColorRef::named("accent");
/// let black = ColorRef::fixed(Rgba::BLACK);
///
/// assert_eq!(accent.name(), Some("accent"));
/// assert_eq!(black.fixed_color(), Some(Rgba::BLACK));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorRef {
    /// A color resolved by name in the active theme.
    Named(String),
    /// A color that never depends on the theme.
    Fixed(Rgba),
}

impl ColorRef {
    /// Reference a themed color by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Reference a fixed color.
    #[must_use]
    pub const fn fixed(color: Rgba) -> Self {
        Self::Fixed(color)
    }

    /// The theme color name, if this is a named reference.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Fixed(_) => None,
        }
    }

    /// The payload color, if this is a fixed reference.
    #[must_use]
    pub fn fixed_color(&self) -> Option<Rgba> {
        match self {
            Self::Named(_) => None,
            Self::Fixed(color) => Some(*color),
        }
    }

    /// True if resolution depends on the active theme.
    #[must_use]
    pub fn is_themed(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "themed({name})"),
            Self::Fixed(color) => write!(f, "fixed({})", color.to_hex()),
        }
    }
}

impl From<Rgba> for ColorRef {
    fn from(color: Rgba) -> Self {
        Self::Fixed(color)
    }
}

impl From<&str> for ColorRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ColorRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn variants_with_same_payload_shape_differ() {
        assert_ne!(ColorRef::named("a"), ColorRef::named("b"));
        assert_ne!(ColorRef::fixed(Rgba::BLACK), ColorRef::fixed(Rgba::WHITE));
        assert_eq!(ColorRef::named("a"), ColorRef::from("a"));
    }

    #[test]
    fn usable_as_hash_key() {
        let mut cache = HashMap::new();
        cache.insert(ColorRef::named("primary"), 1);
        cache.insert(ColorRef::fixed(Rgba::PINK), 2);
        assert_eq!(cache.get(&ColorRef::named("primary")), Some(&1));
        assert_eq!(cache.get(&ColorRef::from(Rgba::PINK)), Some(&2));
    }

    #[test]
    fn accessors() {
        let named = ColorRef::named("bg");
        assert!(named.is_themed());
        assert_eq!(named.fixed_color(), None);

        let fixed = ColorRef::fixed(Rgba::WHITE);
        assert!(!fixed.is_themed());
        assert_eq!(fixed.name(), None);
    }

    #[test]
    fn display() {
        assert_eq!(ColorRef::named("bg").to_string(), "themed(bg)");
        assert_eq!(
            ColorRef::fixed(Rgba::BLACK).to_string(),
            "fixed(#000000ff)"
        );
    }
}
