#![forbid(unsafe_code)]

//! Reactive primitives backing the theme selection.
//!
//! [`Observable`] is a single-slot, latest-value broadcaster. The registry
//! stores its [`ThemeSelection`](crate::ThemeSelection) in one and every
//! live binding subscribes to it.

pub mod observable;

pub use observable::{Observable, Subscription};
