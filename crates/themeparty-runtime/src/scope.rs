#![forbid(unsafe_code)]

//! Ambient theme context and scoped overrides.
//!
//! A [`ThemeEnvironment`] is the value a view tree passes from parent to
//! child. It carries at most one [`ThemeRegistry`]. A [`StaticTheme`] pins a
//! sub-tree to one theme by giving it a registry whose selection is
//! independent of the parent's.

use std::cell::RefCell;

use themeparty_style::{ColorRef, Rgba};
use tracing::debug;

use crate::registry::ThemeRegistry;
use crate::resolve::{ThemedColor, resolve_color};

/// The theme context visible to a node of a view tree.
#[derive(Debug, Clone, Default)]
pub struct ThemeEnvironment {
    registry: Option<ThemeRegistry>,
}

impl ThemeEnvironment {
    /// An environment with no registry. Named colors resolve to
    /// [`UNTHEMED_COLOR`](crate::UNTHEMED_COLOR).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An environment backed by `registry`.
    #[must_use]
    pub fn themed(registry: ThemeRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// The registry in scope, if any.
    #[must_use]
    pub fn registry(&self) -> Option<&ThemeRegistry> {
        self.registry.as_ref()
    }

    /// Run `f` with the ambient registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(Option<&ThemeRegistry>) -> R) -> R {
        f(self.registry.as_ref())
    }

    /// Resolve a color reference in this environment.
    #[must_use]
    pub fn resolve(&self, color_ref: &ColorRef) -> Rgba {
        resolve_color(self.registry.as_ref(), color_ref)
    }

    /// Bind a color reference to this environment's live selection.
    #[must_use]
    pub fn bind(&self, color_ref: ColorRef) -> ThemedColor {
        ThemedColor::new(self.registry.as_ref(), color_ref)
    }

    /// True if a registry is in scope.
    #[must_use]
    pub fn is_themed(&self) -> bool {
        self.registry.is_some()
    }
}

/// A static theme attached to a sub-tree.
///
/// The first [`apply`](Self::apply) against a themed parent forks the
/// parent registry with [`ThemeRegistry::clone_with_selection`]. Every later
/// `apply` against the same parent returns the same fork, so theme changes
/// made on the parent never reach the sub-tree. Applying it under a
/// different parent registry replaces the fork.
///
/// ```
/// use themeparty_runtime::{StaticTheme, ThemeEnvironment, ThemeRegistry};
/// use themeparty_style::{ColorRef, Rgba};
///
/// let registry = ThemeRegistry::builder()
///     .default_colors([("bg", Rgba::WHITE)])
///     .build();
/// registry.register_colors(Some("dark"), [("bg", Rgba::BLACK)]);
/// let root = ThemeEnvironment::themed(registry.clone());
///
/// let sidebar = StaticTheme::new(Some("dark"));
/// let env = sidebar.apply(&root);
/// assert_eq!(env.resolve(&ColorRef::named("bg")), Rgba::BLACK);
///
/// registry.change_theme(None, None);
/// assert_eq!(sidebar.apply(&root).resolve(&ColorRef::named("bg")), Rgba::BLACK);
/// ```
#[derive(Debug, Default)]
pub struct StaticTheme {
    theme: Option<String>,
    /// Parent registry handle and the fork made from it.
    scoped: RefCell<Option<(ThemeRegistry, ThemeEnvironment)>>,
}

impl StaticTheme {
    /// Pin a sub-tree to `theme`. `None` pins it to the default theme.
    #[must_use]
    pub fn new(theme: Option<&str>) -> Self {
        Self {
            theme: theme.map(str::to_string),
            scoped: RefCell::new(None),
        }
    }

    /// The pinned theme name.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Environment for the sub-tree below this attachment.
    ///
    /// A parent without a registry is passed through unchanged and nothing
    /// is cached.
    pub fn apply(&self, parent: &ThemeEnvironment) -> ThemeEnvironment {
        let Some(registry) = parent.registry() else {
            return parent.clone();
        };
        let mut scoped = self.scoped.borrow_mut();
        if let Some((attached_to, env)) = scoped.as_ref() {
            if attached_to.shares_selection(registry) && attached_to.shares_themes(registry) {
                return env.clone();
            }
        }

        debug!(
            theme = self.theme.as_deref().unwrap_or("<default>"),
            reattached = scoped.is_some(),
            "static theme attached"
        );
        let env = ThemeEnvironment::themed(registry.clone_with_selection(self.theme.as_deref()));
        *scoped = Some((registry.clone(), env.clone()));
        env
    }

    /// True once a scoped registry has been created.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.scoped.borrow().is_some()
    }
}
