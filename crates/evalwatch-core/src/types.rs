//! Core domain types for the evaluation dashboard

use chrono::{DateTime, Local};
use serde::Serialize;

/// Lifecycle of the live event-stream connection.
///
/// Transitions are driven by transport events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Connection attempt in progress
    #[default]
    Connecting,
    /// Transport is open and frames are flowing
    Open,
    /// Closed by either side, or never opened
    Closed,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "live",
            ConnectionState::Closed => "offline",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

/// Severity class of an event log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Get display prefix for the severity
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Info => "INF",
            Severity::Success => "OK ",
            Severity::Warning => "WRN",
            Severity::Error => "ERR",
        }
    }
}

/// A single immutable line in the event log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    /// Position in arrival order; strictly increasing within a session
    pub seq: u64,
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
}

impl LogLine {
    pub fn new(seq: u64, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            seq,
            timestamp: Local::now(),
            severity,
            message: message.into(),
        }
    }

    /// Format timestamp for display
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// Format for single-line display
    pub fn display_line(&self) -> String {
        format!(
            "{} {} {}",
            self.formatted_time(),
            self.severity.prefix(),
            self.message
        )
    }
}
