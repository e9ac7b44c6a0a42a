#![forbid(unsafe_code)]

//! Smoke tests for the public facade.

use themeparty::prelude::*;

#[test]
fn prelude_covers_the_common_path() {
    let registry = ThemeRegistry::builder()
        .default_colors([("accent", Rgba::WHITE)])
        .build();
    registry.register_colors(Some("dark"), [("accent", Rgba::BLACK)]);

    let root = ThemeEnvironment::themed(registry.clone());
    let pinned = StaticTheme::new(Some("dark"));
    let accent = root.bind(ColorRef::named("accent"));

    registry.change_theme(Some("dark"), None);
    assert_eq!(accent.color(), Rgba::BLACK);
    assert_eq!(
        pinned.apply(&root).resolve(&ColorRef::named("accent")),
        Rgba::BLACK
    );
}

#[test]
fn hex_errors_convert_into_facade_error() {
    fn parse(input: &str) -> Result<Rgba> {
        Ok(Rgba::from_hex(input)?)
    }

    assert_eq!(parse("#fff").unwrap(), Rgba::WHITE);
    let err = parse("#ffff").unwrap_err();
    assert!(matches!(err, Error::Hex(_)));
    assert!(err.to_string().contains("#ffff"));
}

#[test]
fn codec_errors_convert_into_facade_error() {
    fn decode(input: &str) -> Result<ColorRef> {
        Ok(themeparty::from_json(input)?)
    }

    assert_eq!(decode(r#"{"themed":"bg"}"#).unwrap(), ColorRef::named("bg"));
    assert!(matches!(decode("{}"), Err(Error::Codec(_))));

    let json = themeparty::to_json(&ColorRef::fixed(Rgba::WHITE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({"fixed": [1.0, 1.0, 1.0, 1.0]}));
}
