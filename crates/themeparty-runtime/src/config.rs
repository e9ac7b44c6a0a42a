#![forbid(unsafe_code)]

//! Theme definitions as data.
//!
//! A [`ThemeConfig`] describes a whole registry (fallback color, default
//! theme, named themes, initial selection and the transition to use for
//! theme changes) and can be loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # themes.toml
//! missing_color = "#ff2d55"
//! selected = "dark"
//!
//! [transition]
//! duration_ms = 200
//! easing = "ease-out"
//!
//! [default]
//! primary = "#ff0000"
//! background = [1.0, 1.0, 1.0, 1.0]
//!
//! [themes.dark]
//! primary = "#000000"
//! background = "#1c1c1e"
//! ```
//!
//! ```rust,ignore
//! let config = ThemeConfig::from_toml_file("themes.toml")?;
//! let registry = config.build_registry()?;
//! registry.change_theme(Some("light"), Some(config.transition.to_transition()));
//! ```
//!
//! Colors are either hex strings (`#rgb`, `#rrggbb`, `#rrggbbaa`) or
//! `[red, green, blue, opacity]` arrays with channels in `[0, 1]`.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use themeparty_style::{HexParseError, Rgba};
use tracing::debug;

use crate::registry::{DEFAULT_MISSING_COLOR, ThemeRegistry, ThemeSource};
use crate::transition::{Easing, Transition};

/// A color written either as hex or as channel values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// `#rrggbb`-style notation.
    Hex(String),
    /// `[red, green, blue, opacity]`.
    Channels(Rgba),
}

impl ColorValue {
    /// The concrete color.
    pub fn to_rgba(&self) -> Result<Rgba, HexParseError> {
        match self {
            Self::Hex(hex) => Rgba::from_hex(hex),
            Self::Channels(color) => Ok(*color),
        }
    }
}

impl From<Rgba> for ColorValue {
    fn from(color: Rgba) -> Self {
        Self::Channels(color)
    }
}

/// Color name to color value for one theme.
pub type ThemeColors = BTreeMap<String, ColorValue>;

/// Transition applied when the application changes themes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Animation length in milliseconds. Zero switches instantly.
    pub duration_ms: u64,
    /// Easing curve.
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        let transition = Transition::default();
        Self {
            duration_ms: transition.duration.as_millis() as u64,
            easing: transition.easing,
        }
    }
}

impl TransitionConfig {
    /// The runtime transition this config describes.
    #[must_use]
    pub fn to_transition(&self) -> Transition {
        Transition::new(Duration::from_millis(self.duration_ms), self.easing)
    }
}

/// A full registry definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Fallback for unresolvable names. Pink when absent.
    pub missing_color: Option<ColorValue>,
    /// Colors of the default (untitled) theme.
    pub default: ThemeColors,
    /// Named themes.
    pub themes: BTreeMap<String, ThemeColors>,
    /// Theme selected when the registry is built. Default theme when absent.
    pub selected: Option<String>,
    /// Transition for theme changes.
    pub transition: TransitionConfig,
}

impl ThemeConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every color and name.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(missing) = &self.missing_color {
            check_color("missing_color", missing, &mut errors);
        }

        check_theme("default", &self.default, &mut errors);

        for (name, colors) in &self.themes {
            if name.trim().is_empty() {
                errors.push("themes: theme name must not be empty".into());
            }
            check_theme(&format!("themes.{name}"), colors, &mut errors);
        }

        if self.selected.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push("selected must not be empty; omit it to select the default theme".into());
        }

        errors
    }

    /// Validate and build a registry.
    pub fn build_registry(&self) -> Result<ThemeRegistry, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let missing_color = match &self.missing_color {
            Some(value) => resolve_checked(value)?,
            None => DEFAULT_MISSING_COLOR,
        };

        let mut builder = ThemeRegistry::builder()
            .missing_color(missing_color)
            .default_colors(resolve_theme(&self.default)?);
        for (name, colors) in &self.themes {
            builder = builder.theme(name.clone(), ThemeSource::colors(resolve_theme(colors)?));
        }
        if let Some(selected) = &self.selected {
            builder = builder.selected(selected.clone());
        }

        debug!(
            themes = self.themes.len(),
            selected = self.selected.as_deref().unwrap_or("<default>"),
            "theme registry built from config"
        );
        Ok(builder.build())
    }
}

fn check_color(path: &str, value: &ColorValue, errors: &mut Vec<String>) {
    match value.to_rgba() {
        Ok(color) if !color.is_normalized() => {
            errors.push(format!("{path}: channels must be in [0, 1], got {color:?}"));
        }
        Ok(_) => {}
        Err(e) => errors.push(format!("{path}: {e}")),
    }
}

fn check_theme(path: &str, colors: &ThemeColors, errors: &mut Vec<String>) {
    for (color_name, value) in colors {
        if color_name.trim().is_empty() {
            errors.push(format!("{path}: color name must not be empty"));
        }
        check_color(&format!("{path}.{color_name}"), value, errors);
    }
}

fn resolve_checked(value: &ColorValue) -> Result<Rgba, ConfigError> {
    value
        .to_rgba()
        .map_err(|e| ConfigError::Validation(vec![e.to_string()]))
}

fn resolve_theme(colors: &ThemeColors) -> Result<Vec<(String, Rgba)>, ConfigError> {
    colors
        .iter()
        .map(|(name, value)| Ok((name.clone(), resolve_checked(value)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a theme configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates_clean() {
        assert!(ThemeConfig::default().validate().is_empty());
    }

    #[test]
    fn default_config_builds_empty_registry() {
        let registry = ThemeConfig::default().build_registry().unwrap();
        assert_eq!(registry.missing_color(), DEFAULT_MISSING_COLOR);
        assert_eq!(registry.theme_names(), vec![None]);
    }

    #[test]
    fn default_transition_matches_runtime_default() {
        assert_eq!(
            TransitionConfig::default().to_transition(),
            Transition::default()
        );
    }

    #[test]
    fn color_value_forms() {
        assert_eq!(
            ColorValue::Hex("#000".into()).to_rgba().unwrap(),
            Rgba::BLACK
        );
        assert_eq!(ColorValue::from(Rgba::WHITE).to_rgba().unwrap(), Rgba::WHITE);
        assert!(ColorValue::Hex("nope".into()).to_rgba().is_err());
    }

    #[test]
    fn validate_catches_bad_hex() {
        let mut config = ThemeConfig::default();
        config
            .default
            .insert("primary".into(), ColorValue::Hex("#12".into()));
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("default.primary"), "{errors:?}");
    }

    #[test]
    fn validate_catches_out_of_range_channels() {
        let mut config = ThemeConfig::default();
        config.missing_color = Some(Rgba::new(2.0, 0.0, 0.0, 1.0).into());
        let errors = config.validate();
        assert!(errors[0].starts_with("missing_color"), "{errors:?}");
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = ThemeConfig::default();
        config.selected = Some(" ".into());
        let mut dark = ThemeColors::new();
        dark.insert(String::new(), Rgba::BLACK.into());
        dark.insert("bg".into(), Rgba::new(0.0, -1.0, 0.0, 1.0).into());
        config.themes.insert(String::new(), dark);

        let errors = config.validate();
        assert!(errors.len() >= 4, "should catch multiple errors: {errors:?}");
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = ThemeConfig::default();
        config.default.insert("bg".into(), ColorValue::Hex("zzz".into()));
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("validation errors:"));
    }

    #[test]
    fn toml_parse_error_has_source() {
        use std::error::Error;
        let err = ThemeConfig::from_toml_str("missing_color = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.source().is_some());
    }
}
