#![forbid(unsafe_code)]

//! Color resolution and live color bindings.
//!
//! [`resolve_color`] is the one-shot path: given the ambient registry (if
//! any) and a [`ColorRef`], produce a concrete color now.
//!
//! [`ThemedColor`] is the live path. It resolves once, then subscribes to the
//! registry's selection and re-resolves on every published change, recording
//! the previous color and the requested [`Transition`] so the caller can
//! animate between them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use themeparty_style::{ColorRef, Rgba};
use tracing::trace;
use web_time::Instant;

use crate::reactive::Subscription;
use crate::registry::ThemeRegistry;
use crate::transition::Transition;

/// Color returned for a named reference when no registry is in scope.
pub const UNTHEMED_COLOR: Rgba = Rgba::PINK;

/// Resolve `color_ref` against the ambient registry.
///
/// Fixed references always yield their payload. Named references resolve
/// through [`ThemeRegistry::theme_color`], or to [`UNTHEMED_COLOR`] when no
/// registry is available.
#[must_use]
pub fn resolve_color(registry: Option<&ThemeRegistry>, color_ref: &ColorRef) -> Rgba {
    match (registry, color_ref) {
        (_, ColorRef::Fixed(color)) => *color,
        (Some(registry), named) => registry.theme_color(named),
        (None, ColorRef::Named(name)) => {
            trace!(color = %name, "no theme registry in scope");
            UNTHEMED_COLOR
        }
    }
}

/// One re-resolution of a [`ThemedColor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChange {
    /// Color displayed when the change arrived.
    pub from: Rgba,
    /// Newly resolved color.
    pub to: Rgba,
    /// Animation requested with the selection change.
    pub transition: Option<Transition>,
    /// When the change was applied.
    pub at: Instant,
}

impl ColorChange {
    /// Interpolated color at `now`.
    #[must_use]
    pub fn color_at(&self, now: Instant) -> Rgba {
        match self.transition {
            None => self.to,
            Some(transition) => {
                let progress = transition.progress(now.saturating_duration_since(self.at));
                self.from.lerp(self.to, progress)
            }
        }
    }

    /// True while the transition has time left at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .is_some_and(|t| !t.is_complete(now.saturating_duration_since(self.at)))
    }
}

struct BindingState {
    color: Rgba,
    last_change: Option<ColorChange>,
    changes: u64,
}

impl BindingState {
    fn displayed(&self, now: Instant) -> Rgba {
        self.last_change
            .as_ref()
            .map_or(self.color, |change| change.color_at(now))
    }
}

type ChangeCallback = Box<dyn Fn(&ColorChange)>;

/// A color reference bound to a registry's live selection.
///
/// Dropping the binding detaches it from the registry.
///
/// ```
/// use std::time::Duration;
/// use themeparty_runtime::{ThemeRegistry, ThemedColor, Transition};
/// use themeparty_style::{ColorRef, Rgba};
///
/// let registry = ThemeRegistry::builder()
///     .default_colors([("bg", Rgba::WHITE)])
///     .build();
/// registry.register_colors(Some("dark"), [("bg", Rgba::BLACK)]);
///
/// let bg = ThemedColor::new(Some(&registry), ColorRef::named("bg"));
/// assert_eq!(bg.color(), Rgba::WHITE);
///
/// registry.change_theme(Some("dark"), Some(Transition::linear(Duration::from_millis(100))));
/// assert_eq!(bg.color(), Rgba::BLACK);
///
/// let change = bg.last_change().unwrap();
/// let halfway = bg.color_at(change.at + Duration::from_millis(50));
/// assert!(halfway.approx_eq(Rgba::rgb(0.5, 0.5, 0.5), 1e-9));
/// ```
pub struct ThemedColor {
    color_ref: ColorRef,
    registry: Option<ThemeRegistry>,
    state: Rc<RefCell<BindingState>>,
    subscription: Option<Subscription>,
}

impl fmt::Debug for ThemedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemedColor")
            .field("color_ref", &self.color_ref)
            .field("color", &state.color)
            .field("changes", &state.changes)
            .field("attached", &self.subscription.is_some())
            .finish()
    }
}

impl ThemedColor {
    /// Bind `color_ref` to the registry's selection.
    #[must_use]
    pub fn new(registry: Option<&ThemeRegistry>, color_ref: ColorRef) -> Self {
        Self::bind(registry, color_ref, None)
    }

    /// Bind `color_ref` and call `on_change` after every re-resolution.
    #[must_use]
    pub fn watch(
        registry: Option<&ThemeRegistry>,
        color_ref: ColorRef,
        on_change: impl Fn(&ColorChange) + 'static,
    ) -> Self {
        Self::bind(registry, color_ref, Some(Box::new(on_change)))
    }

    fn bind(
        registry: Option<&ThemeRegistry>,
        color_ref: ColorRef,
        on_change: Option<ChangeCallback>,
    ) -> Self {
        let state = Rc::new(RefCell::new(BindingState {
            color: resolve_color(registry, &color_ref),
            last_change: None,
            changes: 0,
        }));

        // Fixed references and unthemed scopes can never change.
        let subscription = match registry {
            Some(registry) if color_ref.is_themed() => {
                let state = Rc::clone(&state);
                let handle = registry.clone();
                let target = color_ref.clone();
                Some(registry.subscribe(move |selection| {
                    let now = Instant::now();
                    let to = handle.theme_color(&target);
                    let change = {
                        let mut st = state.borrow_mut();
                        let change = ColorChange {
                            from: st.displayed(now),
                            to,
                            transition: selection.transition,
                            at: now,
                        };
                        st.color = to;
                        st.last_change = Some(change);
                        st.changes += 1;
                        change
                    };
                    trace!(color = %target, to = ?to, "themed color re-resolved");
                    if let Some(callback) = &on_change {
                        callback(&change);
                    }
                }))
            }
            _ => None,
        };

        Self {
            color_ref,
            registry: registry.cloned(),
            state,
            subscription,
        }
    }

    /// The bound reference.
    #[must_use]
    pub fn color_ref(&self) -> &ColorRef {
        &self.color_ref
    }

    /// The settled color, ignoring any running transition.
    #[must_use]
    pub fn color(&self) -> Rgba {
        self.state.borrow().color
    }

    /// The color to display at `now`, interpolating a running transition.
    #[must_use]
    pub fn color_at(&self, now: Instant) -> Rgba {
        self.state.borrow().displayed(now)
    }

    /// True while a transition is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state
            .borrow()
            .last_change
            .is_some_and(|change| change.is_animating(now))
    }

    /// The most recent re-resolution.
    #[must_use]
    pub fn last_change(&self) -> Option<ColorChange> {
        self.state.borrow().last_change
    }

    /// Number of selection changes received.
    #[must_use]
    pub fn change_count(&self) -> u64 {
        self.state.borrow().changes
    }

    /// True if the binding follows a registry's selection.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Re-resolve without a transition.
    ///
    /// Registering or replacing themes does not publish a selection change;
    /// call this to pick up new colors for the current selection.
    pub fn refresh(&self) {
        let color = resolve_color(self.registry.as_ref(), &self.color_ref);
        let mut state = self.state.borrow_mut();
        state.color = color;
        state.last_change = None;
    }
}
