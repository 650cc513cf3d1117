//! Event sink handlers

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::io::Write;
use tally_core::effects::{EventEffects, EventError};

fn check_name(name: &str) -> Result<(), EventError> {
    if name.is_empty() {
        return Err(EventError::InvalidName {
            reason: "event name cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Render a payload for humans and JSON consumers: parsed JSON when it is
/// JSON, hex otherwise.
fn payload_value(payload: &[u8]) -> Value {
    serde_json::from_slice(payload).unwrap_or_else(|_| json!({ "hex": hex::encode(payload) }))
}

/// Event sink that records events in the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl TracingEventSink {
    /// Create a new tracing event sink
    pub fn new() -> Self {
        Self
    }
}

impl EventEffects for TracingEventSink {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        check_name(name)?;
        tracing::info!(event = name, payload = %payload_value(payload), "Contract event");
        Ok(())
    }
}

/// Event sink writing one JSON object per line:
/// `{"event": <name>, "payload": <payload>}`
#[derive(Debug)]
pub struct JsonLinesEventSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesEventSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesEventSink<std::io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> EventEffects for JsonLinesEventSink<W> {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        check_name(name)?;
        let line = json!({ "event": name, "payload": payload_value(payload) });

        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| EventError::DeliveryFailed(e.to_string()))
    }
}
