#![forbid(unsafe_code)]

//! Hex notation for [`Rgba`].
//!
//! Accepted forms (leading `#` optional, case-insensitive):
//!
//! | Form        | Example      | Opacity |
//! |-------------|--------------|---------|
//! | `RGB`       | `#f0a`       | opaque  |
//! | `RRGGBB`    | `#ff00aa`    | opaque  |
//! | `RRGGBBAA`  | `#ff00aa80`  | from AA |

use std::fmt;

use crate::color::Rgba;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexParseError {
    /// The digit count is not 3, 6 or 8.
    InvalidLength {
        /// The offending input.
        input: String,
        /// Number of hex digits found.
        digits: usize,
    },
    /// A character outside `[0-9a-fA-F]`.
    InvalidDigit {
        /// The offending input.
        input: String,
        /// The first bad character.
        found: char,
    },
}

impl fmt::Display for HexParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { input, digits } => write!(
                f,
                "invalid hex color '{input}': expected 3, 6 or 8 digits, found {digits}"
            ),
            Self::InvalidDigit { input, found } => {
                write!(f, "invalid hex color '{input}': bad digit '{found}'")
            }
        }
    }
}

impl std::error::Error for HexParseError {}

impl Rgba {
    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(input: &str) -> Result<Self, HexParseError> {
        let digits = input.trim().trim_start_matches('#');
        if let Some(found) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HexParseError::InvalidDigit {
                input: input.to_string(),
                found,
            });
        }

        // All digits are ASCII hex at this point, so byte slicing is safe.
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        let nibble = |i: usize| {
            let v = u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0);
            v * 17
        };

        match digits.len() {
            3 => Ok(Self::from_u8(nibble(0), nibble(1), nibble(2), 255)),
            6 => Ok(Self::from_u8(byte(0), byte(2), byte(4), 255)),
            8 => Ok(Self::from_u8(byte(0), byte(2), byte(4), byte(6))),
            n => Err(HexParseError::InvalidLength {
                input: input.to_string(),
                digits: n,
            }),
        }
    }

    /// Render as `#rrggbbaa`, clamping channels first.
    #[must_use]
    pub fn to_hex(self) -> String {
        let c = self.clamped();
        let q = |v: f64| (v * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            q(c.red),
            q(c.green),
            q(c.blue),
            q(c.opacity)
        )
    }
}

impl std::str::FromStr for Rgba {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digits() {
        let c = Rgba::from_hex("#ff0000").unwrap();
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn parses_eight_digits_with_alpha() {
        let c = Rgba::from_hex("000000ff").unwrap();
        assert_eq!(c, Rgba::BLACK);
        let c = Rgba::from_hex("#FFFFFF00").unwrap();
        assert_eq!(c, Rgba::WHITE.with_opacity(0.0));
    }

    #[test]
    fn parses_short_form() {
        let c = Rgba::from_hex("#f0f").unwrap();
        assert_eq!(c, Rgba::MAGENTA);
    }

    #[test]
    fn rejects_bad_length() {
        let err = Rgba::from_hex("#12345").unwrap_err();
        assert_eq!(
            err,
            HexParseError::InvalidLength {
                input: "#12345".into(),
                digits: 5
            }
        );
        assert!(err.to_string().contains("found 5"));
    }

    #[test]
    fn rejects_bad_digit() {
        let err = Rgba::from_hex("#12345g").unwrap_err();
        assert!(matches!(err, HexParseError::InvalidDigit { found: 'g', .. }));
    }

    #[test]
    fn rejects_non_ascii_without_panicking() {
        assert!(Rgba::from_hex("#ffé").is_err());
    }

    #[test]
    fn to_hex_round_trips_u8_colors() {
        let c = Rgba::from_u8(18, 52, 86, 120);
        assert_eq!(c.to_hex(), "#12345678");
        assert_eq!(Rgba::from_hex(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn from_str_uses_hex() {
        let c: Rgba = "#00ff00".parse().unwrap();
        assert_eq!(c, Rgba::rgb(0.0, 1.0, 0.0));
    }
}
