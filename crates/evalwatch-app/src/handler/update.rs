//! Main update function - handles state transitions (TEA pattern)

use evalwatch_core::prelude::*;

use super::{keys, live, results, scroll, UpdateResult};
use crate::message::Message;
use crate::state::{DashboardState, SessionPhase};

/// Process a message and update state.
/// Returns an optional action and follow-up message.
pub fn update(state: &mut DashboardState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key),

        Message::Live(event) => live::handle_live_event(state, event),

        Message::RefreshSnapshot => results::handle_refresh(state),
        Message::SnapshotLoaded { seq, snapshot } => {
            results::handle_snapshot_loaded(state, seq, snapshot)
        }
        Message::SnapshotFailed { seq, error } => results::handle_snapshot_failed(state, seq, error),

        Message::IssueCommand(command) => results::handle_issue_command(state, command),
        Message::CommandCompleted { command, result } => {
            results::handle_command_completed(state, command, result)
        }

        Message::ScrollUp => scroll::handle_scroll_up(state),
        Message::ScrollDown => scroll::handle_scroll_down(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),

        Message::SessionClosed => live::handle_session_closed(state),

        Message::Quit => {
            info!("Quit requested");
            state.request_quit();
            UpdateResult::none()
        }
    }
}

/// Whether late results should still be applied
pub(super) fn accepts_results(state: &DashboardState) -> bool {
    state.phase == SessionPhase::Active
}
