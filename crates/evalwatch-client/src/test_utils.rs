//! Test utilities for the backend seam
//!
//! Provides [`FakeBackend`], an in-memory [`EvaluationBackend`] that records
//! every call it receives.

use std::sync::{Arc, Mutex};

use evalwatch_core::prelude::*;
use evalwatch_core::StatsSnapshot;

use crate::backend::EvaluationBackend;
use crate::commands::{Command, CommandAck};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Command(Command),
    FetchSnapshot,
}

#[derive(Debug, Default)]
struct FakeState {
    /// `None` makes every command fail as unreachable
    ack: Option<String>,
    /// `None` makes every snapshot fetch fail
    snapshot: Option<StatsSnapshot>,
    calls: Vec<BackendCall>,
}

/// Scriptable backend; clones share recorded calls.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    /// Creates a backend that acknowledges with "ok" and serves an empty snapshot.
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.lock();
            state.ack = Some("ok".to_string());
            state.snapshot = Some(StatsSnapshot::default());
        }
        backend
    }

    pub fn with_ack(self, status: &str) -> Self {
        self.lock().ack = Some(status.to_string());
        self
    }

    pub fn with_snapshot(self, snapshot: StatsSnapshot) -> Self {
        self.lock().snapshot = Some(snapshot);
        self
    }

    /// Fail all commands and snapshot fetches.
    pub fn unreachable(self) -> Self {
        {
            let mut state = self.lock();
            state.ack = None;
            state.snapshot = None;
        }
        self
    }

    /// Replace the snapshot served from now on.
    pub fn set_snapshot(&self, snapshot: StatsSnapshot) {
        self.lock().snapshot = Some(snapshot);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EvaluationBackend for FakeBackend {
    async fn send_command(&self, command: Command) -> Result<CommandAck> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Command(command));
        match &state.ack {
            Some(status) => Ok(CommandAck {
                status: status.clone(),
            }),
            None => Err(Error::transport("connection refused")),
        }
    }

    async fn fetch_snapshot(&self) -> Result<StatsSnapshot> {
        let mut state = self.lock();
        state.calls.push(BackendCall::FetchSnapshot);
        state
            .snapshot
            .clone()
            .ok_or_else(|| Error::transport("connection refused"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_records_calls_across_clones() {
        let backend = FakeBackend::new();
        let clone = backend.clone();

        clone.send_command(Command::Quick).await.unwrap();
        clone.fetch_snapshot().await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![BackendCall::Command(Command::Quick), BackendCall::FetchSnapshot]
        );
    }

    #[tokio::test]
    async fn test_unreachable_fails_everything() {
        let backend = FakeBackend::new().unreachable();
        assert!(backend.send_command(Command::Start).await.is_err());
        assert!(backend.fetch_snapshot().await.is_err());
    }
}
