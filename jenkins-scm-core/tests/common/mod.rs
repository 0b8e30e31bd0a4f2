#![allow(dead_code)]

use std::fmt::Write as FmtWrite;
use std::sync::{Arc, Mutex};

use jenkins_scm_core::Element;
use tracing::field::{Field, Visit};
use tracing::Level;
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// A captured tracing event: its level and `name=value` rendering of all fields.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: String,
}

/// Custom Layer to collect emitted events.
struct EventCollector {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldWriter(String);

impl Visit for FieldWriter {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let _ = write!(&mut self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut writer = FieldWriter(String::new());
        event.record(&mut writer);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: writer.0,
        });
    }
}

/// Runs `f` with a thread-local subscriber and returns what it emitted.
pub fn capture_events<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

pub fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.level == Level::WARN).collect()
}

/// Names of the direct children of `<traits>` under `source`.
pub fn trait_names(source: &Element) -> Vec<String> {
    source
        .select_element("traits")
        .expect("source has a traits element")
        .children()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

pub fn child_names(element: &Element) -> Vec<&str> {
    element.children().iter().map(|c| c.name()).collect()
}
