//! Live channel event handlers
//!
//! Applies transport events and classified frames to the event log. Frames
//! are applied strictly in arrival order; a `reset` frame clears the log
//! before anything that follows it is appended.

use evalwatch_client::LiveEvent;
use evalwatch_core::prelude::*;
use evalwatch_core::{classify_frame, ConnectionState, StatusFrame};

use super::UpdateResult;
use crate::state::{DashboardState, SessionPhase};

/// Longest raw frame excerpt shown in a malformed-frame line
const MALFORMED_EXCERPT_CHARS: usize = 120;

pub fn handle_live_event(state: &mut DashboardState, event: LiveEvent) -> UpdateResult {
    if !state.is_session_open() {
        debug!("Ignoring live event after session close: {:?}", event);
        return UpdateResult::none();
    }

    match event {
        LiveEvent::Opened => {
            state.connection = ConnectionState::Open;
            state.log.info("Live channel connected");
        }
        LiveEvent::Frame(raw) => apply_frame(state, &raw),
        LiveEvent::Closed { reason } => {
            state.connection = ConnectionState::Closed;
            let line = match reason {
                Some(reason) => format!("Live channel disconnected: {}", reason),
                None => "Live channel disconnected".to_string(),
            };
            state.log.warn(line);
        }
        LiveEvent::Failed { error } => {
            state.connection = ConnectionState::Closed;
            state
                .log
                .error(format!("Live channel connection failed: {}", error));
        }
    }

    UpdateResult::none()
}

/// Classify one raw frame and apply it to the event log
fn apply_frame(state: &mut DashboardState, raw: &str) {
    match classify_frame(raw) {
        StatusFrame::Control { control } => {
            if control.clears_log() {
                state.log.clear();
                state.log_view.reset();
            }
            if let Some((severity, text)) = control.log_line() {
                state.log.push(severity, text);
            }
        }
        StatusFrame::Result { result } => {
            state.log.info(result.display_line());
        }
        StatusFrame::Unrecognized { status } => {
            debug!("Ignoring unrecognized status {:?}", status);
        }
        StatusFrame::Malformed { raw } => {
            warn!("Malformed live frame: {}", raw);
            state
                .log
                .error(format!("Malformed frame: {}", excerpt(&raw)));
        }
    }
}

fn excerpt(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(MALFORMED_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// The dashboard tore down its own session.
///
/// The live channel emits nothing for a caller-initiated close, so the
/// disconnect line is added here when `[live] log_caller_close` is set.
pub fn handle_session_closed(state: &mut DashboardState) -> UpdateResult {
    if state.phase == SessionPhase::Closed {
        return UpdateResult::none();
    }

    let was_open = state.connection.is_open();
    state.connection = ConnectionState::Closed;

    if was_open && state.settings.live.log_caller_close {
        state.log.warn("Live channel disconnected (closed by dashboard)");
    }

    if state.phase == SessionPhase::Active {
        state.phase = SessionPhase::Closed;
    }
    info!("Session closed");
    UpdateResult::none()
}
