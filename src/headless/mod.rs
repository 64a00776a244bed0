//! Headless mode - NDJSON event output
//!
//! Instead of drawing the dashboard, every engine event is written to stdout
//! as one JSON object per line. Control commands are read from stdin.
//!
//! # Example Output
//!
//! ```json
//! {"event":"connection_changed","state":"live","timestamp":1704700001000}
//! {"event":"log","seq":0,"severity":"info","message":"Live channel connected","timestamp":1704700001000}
//! {"event":"command_status","command":"start","status":"Evaluation started","timestamp":1704700002000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use evalwatch_app::EngineEvent;
use evalwatch_client::Command;
use evalwatch_core::Severity;
use serde::Serialize;
use tracing::error;

pub use runner::run_headless;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Live channel state changed; `state` is the display label
    ConnectionChanged { state: String, timestamp: i64 },

    /// One event log line
    Log {
        seq: u64,
        severity: Severity,
        message: String,
        timestamp: i64,
    },

    /// The event log was cleared by a reset
    LogCleared { timestamp: i64 },

    /// A new results snapshot was loaded
    Snapshot {
        domains: usize,
        total_questions: u64,
        overall_accuracy: f64,
        fastest_domain: Option<String>,
        fastest_response_time_ms: Option<f64>,
        timestamp: i64,
    },

    /// A control command completed
    CommandStatus {
        command: Command,
        status: String,
        timestamp: i64,
    },

    /// Session ended
    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Convert one engine event into its output lines.
    ///
    /// Appended log batches expand to one event per line.
    pub fn from_engine_event(event: &EngineEvent) -> Vec<Self> {
        let timestamp = Self::now();
        match event {
            EngineEvent::ConnectionChanged { new, .. } => vec![Self::ConnectionChanged {
                state: new.label().to_string(),
                timestamp,
            }],
            EngineEvent::LogCleared => vec![Self::LogCleared { timestamp }],
            EngineEvent::LogAppended { lines } => lines
                .iter()
                .map(|line| Self::Log {
                    seq: line.seq,
                    severity: line.severity,
                    message: line.message.clone(),
                    timestamp: line.timestamp.timestamp_millis(),
                })
                .collect(),
            EngineEvent::SnapshotUpdated { kpis, domains } => {
                let (fastest_domain, fastest_response_time_ms) = match &kpis.fastest_domain {
                    Some((domain, ms)) => (Some(domain.clone()), Some(*ms)),
                    None => (None, None),
                };
                vec![Self::Snapshot {
                    domains: *domains,
                    total_questions: kpis.total_questions,
                    overall_accuracy: kpis.overall_accuracy,
                    fastest_domain,
                    fastest_response_time_ms,
                    timestamp,
                }]
            }
            EngineEvent::CommandStatus {
                command,
                status_text,
            } => vec![Self::CommandStatus {
                command: *command,
                status: status_text.clone(),
                timestamp,
            }],
            EngineEvent::Shutdown => vec![Self::Shutdown { timestamp }],
        }
    }

    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush so line-buffered consumers see each event immediately
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }
}
