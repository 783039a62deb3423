//! `tracing` output routed to the browser console.
//!
//! A small [`Layer`] formats each event as `LEVEL target: message k=v ...` and
//! hands it to a [`ConsoleSink`]. In the browser the sink is the devtools
//! console; tests plug in a capturing sink instead.

use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsValue;

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write(&self, level: Level, line: &str);
}

/// Writes to `console.error` / `console.warn` / `console.log` / `console.debug`.
pub struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn write(&self, level: Level, line: &str) {
        let msg = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&msg),
            Level::WARN => web_sys::console::warn_1(&msg),
            Level::INFO => web_sys::console::log_1(&msg),
            _ => web_sys::console::debug_1(&msg),
        }
    }
}

pub struct ConsoleLayer<W> {
    sink: W,
    max_level: Level,
}

impl<W: ConsoleSink> ConsoleLayer<W> {
    pub fn new(sink: W, max_level: Level) -> Self {
        Self { sink, max_level }
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber,
    W: ConsoleSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        // More verbose levels compare greater.
        if *meta.level() > self.max_level {
            return;
        }
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = format_line(*meta.level(), meta.target(), &visitor.message, &visitor.fields);
        self.sink.write(*meta.level(), &line);
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

fn format_line(level: Level, target: &str, message: &str, fields: &str) -> String {
    format!("{level} {target}: {message}{fields}")
}

/// Install the console subscriber once. Later calls are no-ops.
pub fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new(BrowserConsole, max_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl ConsoleSink for Capture {
        fn write(&self, level: Level, line: &str) {
            self.0.lock().unwrap().push((level, line.to_string()));
        }
    }

    #[test]
    fn events_are_formatted_with_fields() {
        let capture = Capture::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(capture.clone(), Level::INFO));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "gateway", code = 503, "status check failed");
        });
        let lines = capture.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert_eq!(lines[0].1, "WARN gateway: status check failed code=503");
    }

    #[test]
    fn events_above_max_level_are_dropped() {
        let capture = Capture::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(capture.clone(), Level::INFO));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("noisy");
            tracing::error!("loud");
        });
        let lines = capture.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
    }
}
