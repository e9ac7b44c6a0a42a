#![forbid(unsafe_code)]

//! Immutable named color bundles.
//!
//! A [`Theme`] maps color names to concrete [`Rgba`] values. The map is
//! resolved once at construction, either from an explicit map or by looking
//! up each color name in a [`ColorAssets`] catalog, and never changes after.

use ahash::AHashMap;
use themeparty_style::{ColorRef, Rgba};
use tracing::warn;

use crate::assets::ColorAssets;

/// Color used for a name the asset catalog could not find.
pub const MISSING_ASSET_COLOR: Rgba = Rgba::MAGENTA;

/// An immutable bundle of named colors.
///
/// A theme with no name is the default (untitled) theme.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    name: Option<String>,
    colors: AHashMap<String, Rgba>,
}

impl Theme {
    /// Build a theme by resolving each color name through `assets`.
    ///
    /// Names the catalog does not know resolve to [`MISSING_ASSET_COLOR`].
    pub fn from_assets<I, S>(name: Option<&str>, color_names: I, assets: &dyn ColorAssets) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = color_names
            .into_iter()
            .map(|color_name| {
                let color_name = color_name.as_ref();
                let key = Self::asset_key(name, color_name);
                let color = assets.lookup(&key).unwrap_or_else(|| {
                    warn!(asset = %key, "color asset not found, using fallback");
                    MISSING_ASSET_COLOR
                });
                (color_name.to_string(), color)
            })
            .collect();
        Self {
            name: name.map(str::to_string),
            colors,
        }
    }

    /// Build a theme from an explicit name to color map.
    pub fn from_colors<I, K>(name: Option<&str>, colors: I) -> Self
    where
        I: IntoIterator<Item = (K, Rgba)>,
        K: Into<String>,
    {
        Self {
            name: name.map(str::to_string),
            colors: colors.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }

    /// Asset key for `color_name` in the theme called `theme_name`.
    ///
    /// ```
    /// use themeparty_runtime::Theme;
    ///
    /// assert_eq!(Theme::asset_key(Some("dark"), "primary"), "dark_primary");
    /// assert_eq!(Theme::asset_key(None, "primary"), "primary");
    /// ```
    #[must_use]
    pub fn asset_key(theme_name: Option<&str>, color_name: &str) -> String {
        match theme_name {
            Some(theme) => format!("{theme}_{color_name}"),
            None => color_name.to_string(),
        }
    }

    /// Look up a color reference in this theme alone.
    ///
    /// `Fixed` references return their payload. `Named` references return
    /// `None` when the theme has no such color; falling back is the caller's
    /// job (see [`ThemeRegistry::theme_color`](crate::ThemeRegistry::theme_color)).
    #[must_use]
    pub fn color(&self, color_ref: &ColorRef) -> Option<Rgba> {
        match color_ref {
            ColorRef::Fixed(color) => Some(*color),
            ColorRef::Named(name) => self.colors.get(name).copied(),
        }
    }

    /// Look up a color by name.
    #[must_use]
    pub fn named(&self, color_name: &str) -> Option<Rgba> {
        self.colors.get(color_name).copied()
    }

    /// The theme name, `None` for the default theme.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True if the theme defines `color_name`.
    #[must_use]
    pub fn contains(&self, color_name: &str) -> bool {
        self.colors.contains_key(color_name)
    }

    /// Number of colors defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if no colors are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Defined color names, sorted.
    #[must_use]
    pub fn color_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NoAssets, StaticAssets};

    fn red() -> Rgba {
        Rgba::rgb(1.0, 0.0, 0.0)
    }

    #[test]
    fn from_colors_keeps_every_entry() {
        let theme = Theme::from_colors(Some("dark"), [("primary", red()), ("bg", Rgba::BLACK)]);
        assert_eq!(theme.name(), Some("dark"));
        assert_eq!(theme.len(), 2);
        assert_eq!(theme.named("primary"), Some(red()));
        assert_eq!(theme.color_names(), vec!["bg", "primary"]);
    }

    #[test]
    fn from_assets_uses_theme_prefix() {
        let assets = StaticAssets::new()
            .with_color("primary", Rgba::WHITE)
            .with_color("dark_primary", Rgba::BLACK);

        let dark = Theme::from_assets(Some("dark"), ["primary"], &assets);
        assert_eq!(dark.named("primary"), Some(Rgba::BLACK));

        let default = Theme::from_assets(None, ["primary"], &assets);
        assert_eq!(default.named("primary"), Some(Rgba::WHITE));
        assert_eq!(default.name(), None);
    }

    #[test]
    fn from_assets_missing_asset_uses_sentinel() {
        let theme = Theme::from_assets(Some("dark"), ["accent"], &NoAssets);
        assert!(theme.contains("accent"));
        assert_eq!(theme.named("accent"), Some(MISSING_ASSET_COLOR));
    }

    #[test]
    fn color_lookup_is_partial() {
        let theme = Theme::from_colors(None, [("primary", red())]);
        assert_eq!(theme.color(&ColorRef::named("primary")), Some(red()));
        assert_eq!(theme.color(&ColorRef::named("secondary")), None);
    }

    #[test]
    fn fixed_ignores_theme_contents() {
        let theme = Theme::default();
        assert!(theme.is_empty());
        assert_eq!(theme.color(&ColorRef::fixed(Rgba::PINK)), Some(Rgba::PINK));
    }

    #[test]
    fn duplicate_names_last_wins() {
        let theme = Theme::from_colors(None, [("a", Rgba::BLACK), ("a", Rgba::WHITE)]);
        assert_eq!(theme.len(), 1);
        assert_eq!(theme.named("a"), Some(Rgba::WHITE));
    }
}
