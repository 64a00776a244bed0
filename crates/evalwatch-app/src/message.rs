//! Message types for the application (TEA pattern)

use evalwatch_client::{Command, CommandResult, LiveEvent};
use evalwatch_core::StatsSnapshot;

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    // ─────────────────────────────────────────────────────────
    // Live Channel
    // ─────────────────────────────────────────────────────────
    /// Transport event forwarded from the live channel task
    Live(LiveEvent),

    // ─────────────────────────────────────────────────────────
    // Results Snapshot
    // ─────────────────────────────────────────────────────────
    /// Request a fresh results snapshot (key binding or refresh timer)
    RefreshSnapshot,
    /// Snapshot fetch `seq` succeeded
    SnapshotLoaded { seq: u64, snapshot: StatsSnapshot },
    /// Snapshot fetch `seq` failed; previous snapshot is kept
    SnapshotFailed { seq: u64, error: String },

    // ─────────────────────────────────────────────────────────
    // Control Commands
    // ─────────────────────────────────────────────────────────
    /// Send a control command to the job runner
    IssueCommand(Command),
    /// A command acknowledgement (or the unreachable sentinel) arrived
    CommandCompleted {
        command: Command,
        result: CommandResult,
    },

    // ─────────────────────────────────────────────────────────
    // Event Log Scrolling
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The dashboard closed its own session (teardown)
    SessionClosed,
    /// Quit the application
    Quit,
}
