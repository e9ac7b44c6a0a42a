#![forbid(unsafe_code)]

//! ThemeParty Runtime
//!
//! Theme registration, the observable current selection, scoped overrides
//! and live color resolution.
//!
//! # Key Components
//!
//! - [`Theme`] - Immutable bundle of named colors
//! - [`ThemeRegistry`] - Theme store plus the observable [`ThemeSelection`]
//! - [`ThemeEnvironment`] - Ambient context handed down a view tree
//! - [`StaticTheme`] - Pins a sub-tree to one theme
//! - [`ThemedColor`] - Color binding that follows selection changes
//! - [`Transition`] - Animation descriptor carried with a theme change
//! - [`ColorAssets`] - Platform color catalog used by asset-backed themes
//!
//! # Role in ThemeParty
//! `themeparty-runtime` is where colors get decided. It consumes the value
//! types from `themeparty-style` and answers "what color is `primary` right
//! now, for this part of the tree".
//!
//! # Threading
//! Everything here is single-threaded (`Rc`/`RefCell`). Selection changes are
//! delivered synchronously to observers before `change_theme` returns.

pub mod assets;
#[cfg(feature = "config")]
pub mod config;
pub mod reactive;
pub mod registry;
pub mod resolve;
pub mod scope;
pub mod theme;
pub mod transition;

pub use assets::{ColorAssets, NoAssets, StaticAssets};
#[cfg(feature = "config")]
pub use config::{ColorValue, ConfigError, ThemeConfig, TransitionConfig};
pub use reactive::{Observable, Subscription};
pub use registry::{
    DEFAULT_MISSING_COLOR, ThemeRegistry, ThemeRegistryBuilder, ThemeSelection, ThemeSource,
};
pub use resolve::{ColorChange, ThemedColor, UNTHEMED_COLOR, resolve_color};
pub use scope::{StaticTheme, ThemeEnvironment};
pub use theme::{MISSING_ASSET_COLOR, Theme};
pub use transition::{Easing, Transition};
