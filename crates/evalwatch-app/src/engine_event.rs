//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. Headless mode serializes every one of them.

use evalwatch_client::Command;
use evalwatch_core::{ConnectionState, Kpis, LogLine};

/// Domain events emitted by the Engine.
///
/// Events are broadcast after each message processing cycle, so subscribers
/// see a consistent view of state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Live Channel
    // ─────────────────────────────────────────────────────────
    /// The live channel's transport state changed
    ConnectionChanged {
        old: ConnectionState,
        new: ConnectionState,
    },

    // ─────────────────────────────────────────────────────────
    // Event Log
    // ─────────────────────────────────────────────────────────
    /// The event log was cleared by a reset frame
    LogCleared,

    /// Lines appended to the event log, in arrival order
    LogAppended { lines: Vec<LogLine> },

    // ─────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────
    /// A new results snapshot replaced the previous one
    SnapshotUpdated { kpis: Kpis, domains: usize },

    /// A control command completed with the given status text
    CommandStatus {
        command: Command,
        status_text: String,
    },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Short name, used in diagnostics
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::ConnectionChanged { .. } => "connection_changed",
            EngineEvent::LogCleared => "log_cleared",
            EngineEvent::LogAppended { .. } => "log_appended",
            EngineEvent::SnapshotUpdated { .. } => "snapshot_updated",
            EngineEvent::CommandStatus { .. } => "command_status",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
