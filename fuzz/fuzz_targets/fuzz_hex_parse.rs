#![no_main]

use libfuzzer_sys::fuzz_target;
use themeparty_style::Rgba;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 256 {
        return;
    }

    // Parsing must never panic.
    let Ok(color) = Rgba::from_hex(text) else {
        return;
    };

    assert!(color.is_normalized(), "hex produced out-of-range channels");

    // Formatting is canonical: parse(format(c)) == c for any parsed color.
    let hex = color.to_hex();
    assert_eq!(hex.len(), 9);
    assert_eq!(Rgba::from_hex(&hex).ok(), Some(color));
});
