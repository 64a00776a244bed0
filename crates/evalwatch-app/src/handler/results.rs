//! Control command and results snapshot handlers

use evalwatch_client::{Command, CommandResult};
use evalwatch_core::prelude::*;
use evalwatch_core::StatsSnapshot;

use super::update::accepts_results;
use super::{UpdateAction, UpdateResult};
use crate::state::DashboardState;

pub fn handle_issue_command(state: &mut DashboardState, command: Command) -> UpdateResult {
    if !accepts_results(state) {
        return UpdateResult::none();
    }

    info!("Issuing {} command", command);
    state.commands_in_flight += 1;
    let snapshot_seq = command
        .refreshes_snapshot()
        .then(|| state.next_snapshot_request());
    UpdateResult::action(UpdateAction::ExecuteCommand {
        command,
        snapshot_seq,
    })
}

pub fn handle_command_completed(
    state: &mut DashboardState,
    command: Command,
    result: CommandResult,
) -> UpdateResult {
    state.commands_in_flight = state.commands_in_flight.saturating_sub(1);

    if !accepts_results(state) {
        debug!("Discarding late {} result: {:?}", command, result);
        return UpdateResult::none();
    }

    state.status_text = Some(result.status_text().to_string());
    state.last_command = Some(command);
    state.status_updates += 1;
    UpdateResult::none()
}

pub fn handle_refresh(state: &mut DashboardState) -> UpdateResult {
    if !accepts_results(state) {
        return UpdateResult::none();
    }

    let seq = state.next_snapshot_request();
    UpdateResult::action(UpdateAction::FetchSnapshot { seq })
}

/// The loading flag follows the latest fetch only.
fn finish_snapshot_request(state: &mut DashboardState, seq: u64) {
    if seq >= state.snapshot_requested {
        state.snapshot_loading = false;
    }
}

/// Fetches may complete out of order; a response older than the snapshot on
/// screen is dropped.
pub fn handle_snapshot_loaded(
    state: &mut DashboardState,
    seq: u64,
    snapshot: StatsSnapshot,
) -> UpdateResult {
    finish_snapshot_request(state, seq);

    if !accepts_results(state) {
        return UpdateResult::none();
    }

    if seq <= state.snapshot_applied {
        debug!(
            "Dropping stale snapshot #{} (showing #{})",
            seq, state.snapshot_applied
        );
        return UpdateResult::none();
    }

    debug!(
        "Snapshot #{} loaded with {} domains",
        seq,
        snapshot.entries().len()
    );
    state.store.replace(snapshot);
    state.snapshot_applied = seq;
    UpdateResult::none()
}

/// Keeps the previous snapshot; the failure is a diagnostic, not a log line.
pub fn handle_snapshot_failed(state: &mut DashboardState, seq: u64, error: String) -> UpdateResult {
    finish_snapshot_request(state, seq);
    warn!(
        "Results refresh #{} failed, keeping previous snapshot: {}",
        seq, error
    );
    UpdateResult::none()
}
