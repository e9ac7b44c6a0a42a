#![forbid(unsafe_code)]

//! Theme registry and the observable current selection.
//!
//! # Design
//!
//! A [`ThemeRegistry`] owns three things:
//!
//! - a theme map keyed by `Option<String>`, where `None` is the default
//!   (untitled) theme that always exists,
//! - a `missing_color` used whenever a named color cannot be resolved,
//! - the live [`ThemeSelection`], held in an [`Observable`].
//!
//! Cloning a `ThemeRegistry` value clones the handle: both handles see the
//! same selection. A scope override instead calls
//! [`clone_with_selection`](ThemeRegistry::clone_with_selection), which shares
//! the theme map but starts an independent selection.
//!
//! # Resolution
//!
//! | Reference | Selected theme | Result |
//! |-----------|----------------|--------|
//! | `Fixed(c)` | any | `c` |
//! | `Named(n)` | registered, defines `n` | the theme's color |
//! | `Named(n)` | registered, lacks `n` | `missing_color` |
//! | `Named(n)` | not registered | `missing_color` |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use themeparty_style::{ColorRef, Rgba};
use tracing::{debug, debug_span, trace};

use crate::assets::{ColorAssets, NoAssets};
use crate::reactive::{Observable, Subscription};
use crate::theme::Theme;
use crate::transition::Transition;

/// Default fallback for colors that cannot be resolved.
pub const DEFAULT_MISSING_COLOR: Rgba = Rgba::PINK;

type ThemeMap = AHashMap<Option<String>, Rc<Theme>>;

/// The selected theme name plus the transition requested with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeSelection {
    /// Selected theme, `None` for the default theme.
    pub theme: Option<String>,
    /// Animation requested by the change that produced this selection.
    pub transition: Option<Transition>,
}

impl ThemeSelection {
    /// Select `theme` (`None` for the default theme) with an optional animation.
    #[must_use]
    pub fn new(theme: Option<&str>, transition: Option<Transition>) -> Self {
        Self {
            theme: theme.map(str::to_string),
            transition,
        }
    }

    /// The selected theme name.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }
}

/// Where a registered theme gets its colors from.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeSource {
    /// Explicit color values.
    Colors(AHashMap<String, Rgba>),
    /// Color names looked up in the registry's asset catalog.
    Assets(Vec<String>),
}

impl ThemeSource {
    /// Source from `(name, color)` pairs.
    pub fn colors<I, K>(colors: I) -> Self
    where
        I: IntoIterator<Item = (K, Rgba)>,
        K: Into<String>,
    {
        Self::Colors(colors.into_iter().map(|(k, c)| (k.into(), c)).collect())
    }

    /// Source from asset color names.
    pub fn assets<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Assets(names.into_iter().map(Into::into).collect())
    }

    fn build(self, name: Option<&str>, assets: &dyn ColorAssets) -> Theme {
        match self {
            Self::Colors(colors) => Theme::from_colors(name, colors),
            Self::Assets(names) => Theme::from_assets(name, names, assets),
        }
    }
}

/// Store of themes plus the observable current selection.
///
/// # Example
///
/// ```
/// use themeparty_runtime::ThemeRegistry;
/// use themeparty_style::{ColorRef, Rgba};
///
/// let registry = ThemeRegistry::builder()
///     .default_colors([("primary", Rgba::rgb(1.0, 0.0, 0.0))])
///     .build();
/// registry.register_colors(Some("dark"), [("primary", Rgba::BLACK)]);
///
/// let primary = ColorRef::named("primary");
/// assert_eq!(registry.theme_color(&primary), Rgba::rgb(1.0, 0.0, 0.0));
///
/// registry.change_theme(Some("dark"), None);
/// assert_eq!(registry.theme_color(&primary), Rgba::BLACK);
/// assert_eq!(registry.theme_color_named("secondary"), registry.missing_color());
/// ```
#[derive(Clone)]
pub struct ThemeRegistry {
    themes: Rc<RefCell<ThemeMap>>,
    assets: Rc<dyn ColorAssets>,
    missing_color: Rgba,
    selection: Observable<ThemeSelection>,
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("themes", &self.theme_names())
            .field("missing_color", &self.missing_color)
            .field("selection", &self.selection())
            .finish_non_exhaustive()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_COLOR)
    }
}

impl ThemeRegistry {
    /// Create a registry with an empty default theme and no asset catalog.
    #[must_use]
    pub fn new(missing_color: Rgba) -> Self {
        Self::builder().missing_color(missing_color).build()
    }

    /// Start configuring a registry.
    #[must_use]
    pub fn builder() -> ThemeRegistryBuilder {
        ThemeRegistryBuilder::default()
    }

    /// Insert or replace the theme stored under `name`.
    ///
    /// `None` replaces the default theme. A replaced theme is discarded
    /// whole; colors are never merged.
    pub fn register_theme(&self, name: Option<&str>, source: ThemeSource) {
        let theme = source.build(name, self.assets.as_ref());
        debug!(
            theme = name.unwrap_or("<default>"),
            colors = theme.len(),
            "theme registered"
        );
        self.themes
            .borrow_mut()
            .insert(name.map(str::to_string), Rc::new(theme));
    }

    /// Register a theme from explicit colors.
    pub fn register_colors<I, K>(&self, name: Option<&str>, colors: I)
    where
        I: IntoIterator<Item = (K, Rgba)>,
        K: Into<String>,
    {
        self.register_theme(name, ThemeSource::colors(colors));
    }

    /// Register a theme whose colors come from the asset catalog.
    pub fn register_asset_colors<I, S>(&self, name: Option<&str>, color_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_theme(name, ThemeSource::assets(color_names));
    }

    /// Select a theme and publish the change to every observer.
    ///
    /// The theme does not have to be registered. Every call publishes, even
    /// when the selection is unchanged.
    pub fn change_theme(&self, name: Option<&str>, transition: Option<Transition>) {
        let selection = ThemeSelection::new(name, transition);
        let _span = debug_span!(
            "themeparty.selection",
            theme = name.unwrap_or("<default>"),
            animated = transition.is_some(),
            subscribers = self.selection.subscriber_count() as u64
        )
        .entered();
        debug!(
            registered = self.contains_theme(name),
            "theme selection changed"
        );
        self.selection.replace(selection);
    }

    /// Resolve a color reference against the current selection.
    #[must_use]
    pub fn theme_color(&self, color_ref: &ColorRef) -> Rgba {
        match color_ref {
            ColorRef::Fixed(color) => *color,
            ColorRef::Named(name) => self.theme_color_named(name),
        }
    }

    /// Resolve a color name against the current selection.
    #[must_use]
    pub fn theme_color_named(&self, color_name: &str) -> Rgba {
        let themes = self.themes.borrow();
        let found = self
            .selection
            .with(|sel| themes.get(&sel.theme).map(|theme| theme.named(color_name)));
        match found {
            Some(Some(color)) => color,
            Some(None) => {
                trace!(color = color_name, "color missing from selected theme");
                self.missing_color
            }
            None => {
                trace!(color = color_name, "selected theme not registered");
                self.missing_color
            }
        }
    }

    /// A registry sharing this one's themes with an independent selection.
    ///
    /// The new selection starts at `(theme, None)` and never observes later
    /// changes made through `self`.
    #[must_use]
    pub fn clone_with_selection(&self, theme: Option<&str>) -> Self {
        debug!(theme = theme.unwrap_or("<default>"), "scoped registry created");
        Self {
            themes: Rc::clone(&self.themes),
            assets: Rc::clone(&self.assets),
            missing_color: self.missing_color,
            selection: Observable::new(ThemeSelection::new(theme, None)),
        }
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> ThemeSelection {
        self.selection.get()
    }

    /// Selected theme name.
    #[must_use]
    pub fn selected_theme(&self) -> Option<String> {
        self.selection.with(|sel| sel.theme.clone())
    }

    /// The selected theme, if registered.
    #[must_use]
    pub fn current_theme(&self) -> Option<Rc<Theme>> {
        let themes = self.themes.borrow();
        self.selection
            .with(|sel| themes.get(&sel.theme).map(Rc::clone))
    }

    /// The theme registered under `name`.
    #[must_use]
    pub fn theme(&self, name: Option<&str>) -> Option<Rc<Theme>> {
        self.themes
            .borrow()
            .get(&name.map(str::to_string))
            .map(Rc::clone)
    }

    /// True if a theme is registered under `name`.
    #[must_use]
    pub fn contains_theme(&self, name: Option<&str>) -> bool {
        self.themes
            .borrow()
            .contains_key(&name.map(str::to_string))
    }

    /// Registered theme names, default first, then alphabetical.
    #[must_use]
    pub fn theme_names(&self) -> Vec<Option<String>> {
        let mut names: Vec<Option<String>> = self.themes.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Color returned for names that cannot be resolved.
    #[must_use]
    pub fn missing_color(&self) -> Rgba {
        self.missing_color
    }

    /// Number of selections published so far.
    #[must_use]
    pub fn selection_version(&self) -> u64 {
        self.selection.version()
    }

    /// Observe selection changes.
    ///
    /// Only changes made after subscribing are delivered. Dropping the
    /// returned guard detaches the callback.
    pub fn subscribe(&self, callback: impl Fn(&ThemeSelection) + 'static) -> Subscription {
        self.selection.subscribe(callback)
    }

    /// Live observers of the selection, including ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.selection.subscriber_count()
    }

    /// True if both handles publish the same selection.
    #[must_use]
    pub fn shares_selection(&self, other: &Self) -> bool {
        self.selection.ptr_eq(&other.selection)
    }

    /// True if both registries read the same theme map.
    #[must_use]
    pub fn shares_themes(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.themes, &other.themes)
    }
}

/// Builder for [`ThemeRegistry`].
pub struct ThemeRegistryBuilder {
    missing_color: Rgba,
    assets: Rc<dyn ColorAssets>,
    default_theme: Option<ThemeSource>,
    themes: Vec<(String, ThemeSource)>,
    selected: Option<String>,
}

impl Default for ThemeRegistryBuilder {
    fn default() -> Self {
        Self {
            missing_color: DEFAULT_MISSING_COLOR,
            assets: Rc::new(NoAssets),
            default_theme: None,
            themes: Vec::new(),
            selected: None,
        }
    }
}

impl fmt::Debug for ThemeRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistryBuilder")
            .field("missing_color", &self.missing_color)
            .field("default_theme", &self.default_theme)
            .field("themes", &self.themes)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl ThemeRegistryBuilder {
    /// Fallback for unresolvable names. Defaults to [`DEFAULT_MISSING_COLOR`].
    #[must_use]
    pub fn missing_color(mut self, color: Rgba) -> Self {
        self.missing_color = color;
        self
    }

    /// Asset catalog used by asset-backed themes.
    #[must_use]
    pub fn assets(mut self, assets: impl ColorAssets + 'static) -> Self {
        self.assets = Rc::new(assets);
        self
    }

    /// Explicit colors for the default theme.
    #[must_use]
    pub fn default_colors<I, K>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (K, Rgba)>,
        K: Into<String>,
    {
        self.default_theme = Some(ThemeSource::colors(colors));
        self
    }

    /// Asset color names for the default theme.
    #[must_use]
    pub fn default_color_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_theme = Some(ThemeSource::assets(names));
        self
    }

    /// Register a named theme at build time.
    #[must_use]
    pub fn theme(mut self, name: impl Into<String>, source: ThemeSource) -> Self {
        self.themes.push((name.into(), source));
        self
    }

    /// Initial selection. Defaults to the default theme.
    #[must_use]
    pub fn selected(mut self, name: impl Into<String>) -> Self {
        self.selected = Some(name.into());
        self
    }

    /// Build the registry and register every configured theme.
    #[must_use]
    pub fn build(self) -> ThemeRegistry {
        let registry = ThemeRegistry {
            themes: Rc::new(RefCell::new(AHashMap::new())),
            assets: self.assets,
            missing_color: self.missing_color,
            selection: Observable::new(ThemeSelection::new(self.selected.as_deref(), None)),
        };
        let default_source = self
            .default_theme
            .unwrap_or_else(|| ThemeSource::Colors(AHashMap::new()));
        registry.register_theme(None, default_source);
        for (name, source) in self.themes {
            registry.register_theme(Some(&name), source);
        }
        registry
    }
}
