#![forbid(unsafe_code)]

//! Platform color lookup.
//!
//! Themes built from color names resolve each name through a [`ColorAssets`]
//! implementation. Real applications back this with whatever asset catalog
//! the host platform provides; [`StaticAssets`] is an in-memory catalog for
//! tests and configuration files.

use ahash::AHashMap;
use themeparty_style::Rgba;

/// Looks up a named color asset.
pub trait ColorAssets {
    /// Return the color stored under `key`, or `None` if no asset exists.
    fn lookup(&self, key: &str) -> Option<Rgba>;
}

impl<A: ColorAssets + ?Sized> ColorAssets for &A {
    fn lookup(&self, key: &str) -> Option<Rgba> {
        (**self).lookup(key)
    }
}

impl<A: ColorAssets + ?Sized> ColorAssets for Box<A> {
    fn lookup(&self, key: &str) -> Option<Rgba> {
        (**self).lookup(key)
    }
}

impl<A: ColorAssets + ?Sized> ColorAssets for std::rc::Rc<A> {
    fn lookup(&self, key: &str) -> Option<Rgba> {
        (**self).lookup(key)
    }
}

/// A catalog with no assets at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl ColorAssets for NoAssets {
    fn lookup(&self, _key: &str) -> Option<Rgba> {
        None
    }
}

/// In-memory asset catalog.
///
/// ```
/// use themeparty_runtime::{ColorAssets, StaticAssets};
/// use themeparty_style::Rgba;
///
/// let assets = StaticAssets::new()
///     .with_color("primary", Rgba::BLACK)
///     .with_color("dark_primary", Rgba::WHITE);
///
/// assert_eq!(assets.lookup("dark_primary"), Some(Rgba::WHITE));
/// assert_eq!(assets.lookup("accent"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    colors: AHashMap<String, Rgba>,
}

impl StaticAssets {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a color asset.
    #[must_use]
    pub fn with_color(mut self, key: impl Into<String>, color: Rgba) -> Self {
        self.colors.insert(key.into(), color);
        self
    }

    /// Add or replace a color asset in place.
    pub fn insert(&mut self, key: impl Into<String>, color: Rgba) {
        self.colors.insert(key.into(), color);
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the catalog holds no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl ColorAssets for StaticAssets {
    fn lookup(&self, key: &str) -> Option<Rgba> {
        self.colors.get(key).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, Rgba)> for StaticAssets {
    fn from_iter<I: IntoIterator<Item = (K, Rgba)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}
