//! Dashboard state (Model in TEA pattern)

use evalwatch_client::Command;
use evalwatch_core::{ConnectionState, EventLog, SnapshotStore};

use crate::config::Settings;
use crate::log_view_state::LogViewState;

/// Session lifecycle of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Live channel and results are being wired up or are flowing
    #[default]
    Active,
    /// Session torn down: live frames and late results are discarded
    Closed,
    /// Application is shutting down
    Quitting,
}

/// Complete dashboard state, composed for the presentation layer
#[derive(Debug)]
pub struct DashboardState {
    pub phase: SessionPhase,

    /// Mirror of the live channel's transport state
    pub connection: ConnectionState,

    /// Event log fed by the live channel
    pub log: EventLog,

    /// Latest results snapshot and its derived views
    pub store: SnapshotStore,

    /// Status text of the most recently completed command
    pub status_text: Option<String>,

    /// Command whose result produced `status_text`
    pub last_command: Option<Command>,

    /// Number of command results applied so far
    pub status_updates: u64,

    /// Commands sent but not yet answered
    pub commands_in_flight: usize,

    /// The most recently issued snapshot fetch has not completed yet
    pub snapshot_loading: bool,

    /// Id of the most recently issued snapshot fetch
    pub snapshot_requested: u64,

    /// Id of the fetch whose snapshot is in `store`; 0 before the first one
    pub snapshot_applied: u64,

    pub log_view: LogViewState,

    pub settings: Settings,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: SessionPhase::Active,
            connection: ConnectionState::Connecting,
            log: EventLog::new(),
            store: SnapshotStore::new(),
            status_text: None,
            last_command: None,
            status_updates: 0,
            commands_in_flight: 0,
            snapshot_loading: false,
            snapshot_requested: 0,
            snapshot_applied: 0,
            log_view: LogViewState::new(),
            settings,
        }
    }

    /// Allocate the id for a new snapshot fetch.
    ///
    /// Ids increase in issue order; responses are applied only if newer than
    /// the snapshot already shown.
    pub fn next_snapshot_request(&mut self) -> u64 {
        self.snapshot_requested += 1;
        self.snapshot_loading = true;
        self.snapshot_requested
    }

    pub fn is_session_open(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn request_quit(&mut self) {
        self.phase = SessionPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == SessionPhase::Quitting
    }
}
