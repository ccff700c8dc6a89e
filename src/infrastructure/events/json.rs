//! JSON Event Sink
//!
//! Outputs switch events as NDJSON for CI/automation consumption.

use crate::domain::ports::{SwitchEvent, SwitchEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(fields) = event.as_object_mut() {
            fields.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SwitchEventSink for JsonEventSink {
    fn on_event(&self, event: SwitchEvent) {
        let json = match event {
            SwitchEvent::Started { project, from, to } => {
                serde_json::json!({
                    "event": "start",
                    "command": "switch",
                    "project": project,
                    "from": from,
                    "to": to,
                })
            }

            SwitchEvent::PhaseStarted { phase } => {
                serde_json::json!({
                    "event": "phase_start",
                    "command": "switch",
                    "phase": phase,
                })
            }

            SwitchEvent::PhaseSkipped { phase, reason } => {
                serde_json::json!({
                    "event": "phase_skipped",
                    "command": "switch",
                    "phase": phase,
                    "reason": reason,
                })
            }

            SwitchEvent::FileWritten { path } => {
                serde_json::json!({
                    "event": "item_written",
                    "command": "switch",
                    "path": path.display().to_string(),
                })
            }

            SwitchEvent::FolderRemoved { path } => {
                serde_json::json!({
                    "event": "folder_removed",
                    "command": "switch",
                    "path": path.display().to_string(),
                })
            }

            SwitchEvent::PhaseFailed { phase, error } => {
                serde_json::json!({
                    "event": "phase_error",
                    "command": "switch",
                    "phase": phase,
                    "error": error,
                })
            }

            SwitchEvent::Completed { project, deployer } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "switch",
                    "status": "success",
                    "project": project,
                    "deployer": deployer,
                })
            }
        };

        self.write_event(json);
    }
}
