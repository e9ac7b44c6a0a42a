#![no_main]

use libfuzzer_sys::fuzz_target;
use themeparty_style::codec::{from_json, to_json};
use themeparty_style::{ColorRef, Rgba};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // Decoding must never panic, whatever the input.
    if let Ok(color_ref) = from_json::<ColorRef>(text) {
        let encoded = to_json(&color_ref).expect("decoded reference must encode");
        let prefix = if color_ref.is_themed() {
            r#"{"themed":"#
        } else {
            r#"{"fixed":["#
        };
        assert!(encoded.starts_with(prefix), "unexpected encoding {encoded}");

        let again: ColorRef = from_json(&encoded).expect("encoded reference must decode");
        assert_eq!(again, color_ref, "round trip changed the reference");
    }

    if let Ok(color) = from_json::<Rgba>(text) {
        let encoded = to_json(&color).expect("decoded color must encode");
        let again: Rgba = from_json(&encoded).expect("encoded color must decode");
        assert_eq!(again, color, "round trip changed the color");
    }
});
