#![forbid(unsafe_code)]

//! Tracing contract for theme selection changes.
//!
//! Verifies that `change_theme` opens a `themeparty.selection` span with the
//! expected fields, that observer delivery nests inside it, and that asset
//! misses are reported at WARN.
//!
//! Run:
//!   cargo test -p themeparty-runtime --test tracing_selection_spans

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use themeparty_runtime::{NoAssets, ThemeRegistry, ThemedColor, Transition};
use themeparty_style::ColorRef;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

struct SpanCapture {
    captured: Arc<Mutex<Captured>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|pid| ctx.span(pid))
            .map(|span_ref| span_ref.name().to_string());

        self.captured.lock().unwrap().spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();

        self.captured.lock().unwrap().events.push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Captured) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let layer = SpanCapture {
        captured: Arc::clone(&captured),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = std::mem::take(&mut *captured.lock().unwrap());
    (result, captured)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn change_theme_opens_selection_span() {
    let registry = ThemeRegistry::default();
    let _bound = ThemedColor::new(Some(&registry), ColorRef::named("bg"));

    let ((), captured) = capture(|| {
        registry.change_theme(Some("dark"), Some(Transition::default()));
    });

    let selection: Vec<&CapturedSpan> = captured
        .spans
        .iter()
        .filter(|s| s.name == "themeparty.selection")
        .collect();
    assert_eq!(selection.len(), 1, "spans: {:?}", captured.spans);

    let span = selection[0];
    assert_eq!(span.fields.get("theme").map(String::as_str), Some("dark"));
    assert_eq!(span.fields.get("animated").map(String::as_str), Some("true"));
    assert_eq!(span.fields.get("subscribers").map(String::as_str), Some("1"));
    assert!(span.parent_name.is_none());
}

#[test]
fn observer_delivery_nests_in_selection_span() {
    let registry = ThemeRegistry::default();
    let _bound = ThemedColor::new(Some(&registry), ColorRef::named("bg"));

    let ((), captured) = capture(|| registry.change_theme(None, None));

    let notify = captured
        .spans
        .iter()
        .find(|s| s.name == "themeparty.notify")
        .expect("observer delivery span");
    assert_eq!(notify.parent_name.as_deref(), Some("themeparty.selection"));
}

#[test]
fn no_delivery_span_without_observers() {
    let registry = ThemeRegistry::default();
    let ((), captured) = capture(|| registry.change_theme(Some("dark"), None));

    assert!(captured.spans.iter().all(|s| s.name != "themeparty.notify"));
    assert!(
        captured
            .events
            .iter()
            .any(|e| e.message == "theme selection changed"
                && e.fields.get("registered").map(String::as_str) == Some("false"))
    );
}

#[test]
fn asset_miss_warns_with_key() {
    let registry = ThemeRegistry::builder().assets(NoAssets).build();

    let ((), captured) = capture(|| registry.register_asset_colors(Some("dark"), ["accent"]));

    let warning = captured
        .events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("asset miss warning");
    assert_eq!(
        warning.fields.get("asset").map(String::as_str),
        Some("dark_accent")
    );
}
