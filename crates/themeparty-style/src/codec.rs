#![forbid(unsafe_code)]

//! Serialization for [`Rgba`] and [`ColorRef`].
//!
//! # Wire format
//!
//! - `Rgba` encodes as an ordered sequence `[red, green, blue, opacity]`.
//!   Decoding requires exactly four numbers.
//! - `ColorRef` encodes as a single-key map: `{"themed": "name"}` or
//!   `{"fixed": [r, g, b, a]}`. Decoding fails when neither key is present,
//!   when both are present, or when the value has the wrong type. Unrecognized
//!   keys are skipped.
//!
//! ```
//! use themeparty_style::{ColorRef, Rgba};
//!
//! let json = themeparty_style::codec::to_json(&ColorRef::fixed(Rgba::BLACK)).unwrap();
//! assert_eq!(json, r#"{"fixed":[0.0,0.0,0.0,1.0]}"#);
//!
//! let back: ColorRef = themeparty_style::codec::from_json(&json).unwrap();
//! assert_eq!(back, ColorRef::fixed(Rgba::BLACK));
//! ```

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::color_ref::ColorRef;

const THEMED_KEY: &str = "themed";
const FIXED_KEY: &str = "fixed";

// ---------------------------------------------------------------------------
// Rgba
// ---------------------------------------------------------------------------

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.red)?;
        tuple.serialize_element(&self.green)?;
        tuple.serialize_element(&self.blue)?;
        tuple.serialize_element(&self.opacity)?;
        tuple.end()
    }
}

struct RgbaVisitor;

impl<'de> Visitor<'de> for RgbaVisitor {
    type Value = Rgba;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of 4 numbers [red, green, blue, opacity]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rgba, A::Error> {
        let mut channels = [0.0_f64; 4];
        for (i, slot) in channels.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        if seq.next_element::<IgnoredAny>()?.is_some() {
            let mut extra = 5;
            while seq.next_element::<IgnoredAny>()?.is_some() {
                extra += 1;
            }
            return Err(de::Error::invalid_length(extra, &self));
        }
        Ok(Rgba::from_array(channels))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `deserialize_seq` rather than `deserialize_tuple` so that a
        // too-long sequence reaches the visitor and is rejected there.
        deserializer.deserialize_seq(RgbaVisitor)
    }
}

// ---------------------------------------------------------------------------
// ColorRef
// ---------------------------------------------------------------------------

impl Serialize for ColorRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            ColorRef::Named(name) => map.serialize_entry(THEMED_KEY, name)?,
            ColorRef::Fixed(color) => map.serialize_entry(FIXED_KEY, color)?,
        }
        map.end()
    }
}

enum Key {
    Themed,
    Fixed,
    Other,
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color reference key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Ok(match v {
                    THEMED_KEY => Key::Themed,
                    FIXED_KEY => Key::Fixed,
                    _ => Key::Other,
                })
            }
        }

        deserializer.deserialize_identifier(KeyVisitor)
    }
}

struct ColorRefVisitor;

impl<'de> Visitor<'de> for ColorRefVisitor {
    type Value = ColorRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with exactly one of the keys `themed` or `fixed`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ColorRef, A::Error> {
        let mut found: Option<ColorRef> = None;
        while let Some(key) = map.next_key::<Key>()? {
            let value = match key {
                Key::Themed => ColorRef::Named(map.next_value::<String>()?),
                Key::Fixed => ColorRef::Fixed(map.next_value::<Rgba>()?),
                Key::Other => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            match (&found, &value) {
                (Some(ColorRef::Named(_)), ColorRef::Named(_)) => {
                    return Err(de::Error::duplicate_field(THEMED_KEY));
                }
                (Some(ColorRef::Fixed(_)), ColorRef::Fixed(_)) => {
                    return Err(de::Error::duplicate_field(FIXED_KEY));
                }
                (Some(_), _) => {
                    return Err(de::Error::custom(
                        "data corrupted: color reference has both `themed` and `fixed` keys",
                    ));
                }
                (None, _) => {}
            }
            found = Some(value);
        }
        found.ok_or_else(|| {
            de::Error::custom("data corrupted: color reference has neither `themed` nor `fixed` key")
        })
    }
}

impl<'de> Deserialize<'de> for ColorRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ColorRefVisitor)
    }
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

/// Error raised by the JSON helpers.
#[derive(Debug)]
pub enum CodecError {
    /// The input could not be decoded into the requested type.
    Decode(serde_json::Error),
    /// The value could not be encoded.
    Encode(serde_json::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "color decode error: {e}"),
            Self::Encode(e) => write!(f, "color encode error: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) | Self::Encode(e) => Some(e),
        }
    }
}

/// Encode a color or color reference as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// Decode a color or color reference from JSON.
pub fn from_json<'a, T: Deserialize<'a>>(input: &'a str) -> Result<T, CodecError> {
    serde_json::from_str(input).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rgba_encodes_as_ordered_array() {
        let v = serde_json::to_value(Rgba::new(0.25, 0.5, 0.75, 1.0)).unwrap();
        assert_eq!(v, json!([0.25, 0.5, 0.75, 1.0]));
    }

    #[test]
    fn rgba_accepts_integer_numbers() {
        let c: Rgba = serde_json::from_str("[1, 0, 0, 1]").unwrap();
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn rgba_rejects_short_sequence() {
        let err = serde_json::from_str::<Rgba>("[1, 0, 0]").unwrap_err();
        assert!(err.to_string().contains("invalid length 3"), "{err}");
    }

    #[test]
    fn rgba_rejects_long_sequence() {
        let err = serde_json::from_str::<Rgba>("[1, 0, 0, 1, 0.5]").unwrap_err();
        assert!(err.to_string().contains("invalid length 5"), "{err}");
    }

    #[test]
    fn rgba_rejects_non_numbers() {
        assert!(serde_json::from_str::<Rgba>(r#"["a", 0, 0, 1]"#).is_err());
        assert!(serde_json::from_str::<Rgba>(r#"{"red": 1}"#).is_err());
    }

    #[test]
    fn color_ref_named_shape() {
        let v = serde_json::to_value(ColorRef::named("primary")).unwrap();
        assert_eq!(v, json!({"themed": "primary"}));
    }

    #[test]
    fn color_ref_fixed_shape() {
        let v = serde_json::to_value(ColorRef::fixed(Rgba::WHITE)).unwrap();
        assert_eq!(v, json!({"fixed": [1.0, 1.0, 1.0, 1.0]}));
    }

    #[test]
    fn color_ref_decodes_both_variants() {
        let named: ColorRef = from_json(r#"{"themed":"accent"}"#).unwrap();
        assert_eq!(named, ColorRef::named("accent"));

        let fixed: ColorRef = from_json(r#"{"fixed":[0,0,0,1]}"#).unwrap();
        assert_eq!(fixed, ColorRef::fixed(Rgba::BLACK));
    }

    #[test]
    fn color_ref_rejects_empty_map() {
        let err = from_json::<ColorRef>("{}").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn color_ref_rejects_unknown_only_keys() {
        assert!(from_json::<ColorRef>(r#"{"dynamic":"x"}"#).is_err());
    }

    #[test]
    fn color_ref_skips_unknown_keys_next_to_known_one() {
        let c: ColorRef = from_json(r#"{"note":{"a":1},"themed":"bg"}"#).unwrap();
        assert_eq!(c, ColorRef::named("bg"));
    }

    #[test]
    fn color_ref_rejects_both_keys() {
        let err = from_json::<ColorRef>(r#"{"themed":"bg","fixed":[0,0,0,1]}"#).unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn color_ref_rejects_duplicate_keys() {
        let err = from_json::<ColorRef>(r#"{"themed":"a","themed":"b"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("duplicate field `themed`"), "{msg}");
        assert!(!msg.contains("both"), "{msg}");

        let err = from_json::<ColorRef>(r#"{"fixed":[0,0,0,1],"fixed":[1,1,1,1]}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `fixed`"));
    }

    #[test]
    fn color_ref_rejects_wrong_value_types() {
        assert!(from_json::<ColorRef>(r#"{"themed":[0,0,0,1]}"#).is_err());
        assert!(from_json::<ColorRef>(r#"{"fixed":"black"}"#).is_err());
        assert!(from_json::<ColorRef>(r#"{"fixed":[0,0,1]}"#).is_err());
    }

    #[test]
    fn color_ref_rejects_non_map() {
        assert!(from_json::<ColorRef>(r#""primary""#).is_err());
        assert!(from_json::<ColorRef>("[0,0,0,1]").is_err());
    }

    #[test]
    fn codec_error_exposes_source() {
        use std::error::Error;
        let err = from_json::<Rgba>("nope").unwrap_err();
        assert!(err.source().is_some());
    }
}
