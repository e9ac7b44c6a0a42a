#![forbid(unsafe_code)]

//! ThemeParty public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! color vocabulary from `themeparty-style` and the registry, selection and
//! scoping types from `themeparty-runtime`, and offers a prelude for
//! day-to-day usage.
//!
//! ```
//! use themeparty::prelude::*;
//!
//! let registry = ThemeRegistry::builder()
//!     .default_colors([("primary", Rgba::rgb(1.0, 0.0, 0.0))])
//!     .build();
//! registry.register_colors(Some("dark"), [("primary", Rgba::BLACK)]);
//!
//! let root = ThemeEnvironment::themed(registry.clone());
//! let primary = root.bind(ColorRef::named("primary"));
//!
//! registry.change_theme(Some("dark"), Some(Transition::default()));
//! assert_eq!(primary.color(), Rgba::BLACK);
//! ```

use std::fmt;

// --- Style re-exports ------------------------------------------------------

pub use themeparty_style::{ColorRef, HexParseError, Rgba};
#[cfg(feature = "serde")]
pub use themeparty_style::codec::{CodecError, from_json, to_json};

// --- Runtime re-exports ----------------------------------------------------

pub use themeparty_runtime::{
    ColorAssets, ColorChange, DEFAULT_MISSING_COLOR, Easing, MISSING_ASSET_COLOR, NoAssets,
    StaticAssets, StaticTheme, Subscription, Theme, ThemeEnvironment, ThemeRegistry,
    ThemeRegistryBuilder, ThemeSelection, ThemeSource, ThemedColor, Transition, UNTHEMED_COLOR,
    resolve_color,
};
#[cfg(feature = "config")]
pub use themeparty_runtime::{ConfigError, ThemeConfig};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ThemeParty.
#[derive(Debug)]
pub enum Error {
    /// A hex color string could not be parsed.
    Hex(HexParseError),
    /// A color or color reference could not be encoded or decoded.
    #[cfg(feature = "serde")]
    Codec(CodecError),
    /// A theme configuration could not be loaded.
    #[cfg(feature = "config")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(err) => write!(f, "{err}"),
            #[cfg(feature = "serde")]
            Self::Codec(err) => write!(f, "{err}"),
            #[cfg(feature = "config")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hex(err) => Some(err),
            #[cfg(feature = "serde")]
            Self::Codec(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<HexParseError> for Error {
    fn from(err: HexParseError) -> Self {
        Self::Hex(err)
    }
}

#[cfg(feature = "serde")]
impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

#[cfg(feature = "config")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for ThemeParty APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

/// Commonly used types for applications.
pub mod prelude {
    pub use crate::{
        ColorRef, Error, Result, Rgba, StaticTheme, ThemeEnvironment, ThemeRegistry,
        ThemeSelection, ThemedColor, Transition,
    };
    pub use crate::{runtime, style};
}

pub use themeparty_runtime as runtime;
pub use themeparty_style as style;
