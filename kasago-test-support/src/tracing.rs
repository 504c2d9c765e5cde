//! Recording layer for asserting structured diagnostics in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Layer installed during tests to capture spans and events so structured
/// diagnostics can be asserted deterministically.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Returns the spans opened so far, in creation order.
    ///
    /// # Panics
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().expect("lock poisoned").clone()
    }

    /// Returns the events emitted so far, in emission order.
    ///
    /// # Panics
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().expect("lock poisoned").clone()
    }
}

/// Snapshot of an opened span: its name and recorded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the tracing metadata.
    pub name: String,
    /// Structured fields recorded at span creation.
    pub fields: HashMap<String, String>,
}

/// Snapshot of an emitted event: level, target, and rendered fields.
///
/// The event's message, if any, appears under the `message` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Log level of the event.
    pub level: Level,
    /// Event target string.
    pub target: String,
    /// Structured fields attached to the event.
    pub fields: HashMap<String, String>,
}

#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        attrs.record(&mut recorder);
        self.spans.lock().expect("lock poisoned").push(SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields: recorder.0,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.events.lock().expect("lock poisoned").push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields: recorder.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[test]
    fn records_events_with_message_and_fields() {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(answer = 42, "the answer");
        });

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].fields.get("answer").map(String::as_str), Some("42"));
        assert_eq!(
            events[0].fields.get("message").map(String::as_str),
            Some("the answer")
        );
    }

    #[test]
    fn records_span_names() {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("unit.work", step = "one");
            let _guard = span.enter();
        });

        let spans = layer.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "unit.work");
        assert_eq!(spans[0].fields.get("step").map(String::as_str), Some("one"));
    }
}
