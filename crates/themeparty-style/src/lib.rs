#![forbid(unsafe_code)]

//! Color vocabulary for ThemeParty.
//!
//! # Role in ThemeParty
//! `themeparty-style` holds the leaf value types every other crate speaks:
//! concrete colors and the references views use to ask for them. It has no
//! knowledge of themes, registries or observation.
//!
//! # This crate provides
//! - [`Rgba`], a four-channel floating-point color with hex parsing and
//!   interpolation.
//! - [`ColorRef`], either a theme-relative color name or a fixed color.
//! - With the `serde` feature (on by default), the wire codec for both types
//!   and JSON helpers in [`codec`].

/// Floating-point RGBA colors.
pub mod color;
/// Theme-relative or fixed color references.
pub mod color_ref;
/// Hex notation parsing and formatting.
pub mod hex;

#[cfg(feature = "serde")]
pub mod codec;

pub use color::Rgba;
pub use color_ref::ColorRef;
pub use hex::HexParseError;

#[cfg(feature = "serde")]
pub use codec::CodecError;
