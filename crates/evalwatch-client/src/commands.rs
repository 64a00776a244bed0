//! Control commands and the command dispatcher

use serde::{Deserialize, Serialize};

use evalwatch_core::prelude::*;
use evalwatch_core::StatsSnapshot;

use crate::backend::EvaluationBackend;

/// Status text shown whenever a command could not reach the backend
pub const UNREACHABLE_STATUS: &str = "Error: backend unreachable.";

/// Evaluation control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Run the short smoke-test evaluation
    Quick,
    /// Start a full evaluation
    Start,
    Pause,
    Resume,
    /// Discard results and return the runner to idle
    Reset,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Quick,
        Command::Start,
        Command::Pause,
        Command::Resume,
        Command::Reset,
    ];

    /// Path segment under `/api/evaluations/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Command::Quick => "quick",
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Reset => "reset",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Quick => "Quick Test",
            Command::Start => "Start",
            Command::Pause => "Pause",
            Command::Resume => "Resume",
            Command::Reset => "Reset",
        }
    }

    /// Whether the results snapshot must be refetched after the ack
    pub fn refreshes_snapshot(&self) -> bool {
        matches!(self, Command::Reset)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Acknowledgement body returned by every command endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandAck {
    pub status: String,
}

/// Outcome of issuing one command, as shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandResult {
    Acknowledged { status_text: String },
    Unreachable,
}

impl CommandResult {
    /// Text for the operator status line
    pub fn status_text(&self) -> &str {
        match self {
            CommandResult::Acknowledged { status_text } => status_text,
            CommandResult::Unreachable => UNREACHABLE_STATUS,
        }
    }
}

/// Result of [`Dispatcher::execute`]
#[derive(Debug)]
pub struct CommandOutcome {
    pub command: Command,
    pub result: CommandResult,
    /// Present only for commands that refresh the snapshot
    pub snapshot: Option<Result<StatsSnapshot>>,
}

/// Issues control commands against an [`EvaluationBackend`].
///
/// Each call is independent: there is no queueing and no de-duplication, so
/// concurrent calls may complete in any order.
#[derive(Debug, Clone)]
pub struct Dispatcher<B> {
    backend: B,
}

impl<B: EvaluationBackend + Clone> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Send one command and map the reply to operator-facing status text.
    ///
    /// Transport or decode failures never escape: they become
    /// [`CommandResult::Unreachable`].
    pub async fn issue(&self, command: Command) -> CommandResult {
        match self.backend.send_command(command).await {
            Ok(ack) => {
                debug!("Command {} acknowledged: {}", command, ack.status);
                CommandResult::Acknowledged {
                    status_text: ack.status,
                }
            }
            Err(e) => {
                warn!("Command {} failed: {}", command, e);
                CommandResult::Unreachable
            }
        }
    }

    /// Issue a command, then refetch the snapshot if the command calls for it.
    ///
    /// The refetch starts only after the command reply was handled, whether
    /// or not the command itself succeeded.
    pub async fn execute(&self, command: Command) -> CommandOutcome {
        let result = self.issue(command).await;
        let snapshot = if command.refreshes_snapshot() {
            Some(self.backend.fetch_snapshot().await)
        } else {
            None
        };
        CommandOutcome {
            command,
            result,
            snapshot,
        }
    }

    /// Fetch the current results snapshot.
    pub async fn fetch_snapshot(&self) -> Result<StatsSnapshot> {
        self.backend.fetch_snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{BackendCall, FakeBackend};
    use evalwatch_core::DomainStat;

    #[test]
    fn test_only_reset_refreshes() {
        let refreshing: Vec<_> = Command::ALL
            .iter()
            .filter(|c| c.refreshes_snapshot())
            .collect();
        assert_eq!(refreshing, vec![&Command::Reset]);
    }

    #[test]
    fn test_path_segments() {
        let segments: Vec<_> = Command::ALL.iter().map(|c| c.path_segment()).collect();
        assert_eq!(segments, vec!["quick", "start", "pause", "resume", "reset"]);
    }

    #[test]
    fn test_unreachable_status_text() {
        assert_eq!(
            CommandResult::Unreachable.status_text(),
            "Error: backend unreachable."
        );
    }

    #[tokio::test]
    async fn test_issue_uses_backend_status_verbatim() {
        let backend = FakeBackend::new().with_ack("Evaluation started");
        let dispatcher = Dispatcher::new(backend.clone());

        let result = dispatcher.issue(Command::Start).await;
        assert_eq!(result.status_text(), "Evaluation started");
        assert_eq!(backend.calls(), vec![BackendCall::Command(Command::Start)]);
    }

    #[tokio::test]
    async fn test_issue_unreachable_backend() {
        let backend = FakeBackend::new().unreachable();
        let dispatcher = Dispatcher::new(backend);

        let result = dispatcher.issue(Command::Pause).await;
        assert_eq!(result, CommandResult::Unreachable);
        assert_eq!(result.status_text(), UNREACHABLE_STATUS);
    }

    #[tokio::test]
    async fn test_execute_reset_refetches_after_ack() {
        let snapshot = StatsSnapshot::new(vec![DomainStat::new("Math", 0, 0.0, 0.0)]);
        let backend = FakeBackend::new()
            .with_ack("Evaluation reset")
            .with_snapshot(snapshot.clone());
        let dispatcher = Dispatcher::new(backend.clone());

        let outcome = dispatcher.execute(Command::Reset).await;
        assert_eq!(outcome.result.status_text(), "Evaluation reset");
        assert_eq!(outcome.snapshot.unwrap().unwrap(), snapshot);
        assert_eq!(
            backend.calls(),
            vec![BackendCall::Command(Command::Reset), BackendCall::FetchSnapshot]
        );
    }

    #[tokio::test]
    async fn test_execute_reset_refetches_even_when_unreachable() {
        let backend = FakeBackend::new().unreachable();
        let dispatcher = Dispatcher::new(backend.clone());

        let outcome = dispatcher.execute(Command::Reset).await;
        assert_eq!(outcome.result, CommandResult::Unreachable);
        assert!(outcome.snapshot.unwrap().is_err());
        assert_eq!(
            backend.calls(),
            vec![BackendCall::Command(Command::Reset), BackendCall::FetchSnapshot]
        );
    }

    #[tokio::test]
    async fn test_execute_non_reset_skips_refetch() {
        let backend = FakeBackend::new().with_ack("Evaluation resumed");
        let dispatcher = Dispatcher::new(backend.clone());

        for command in [Command::Quick, Command::Start, Command::Pause, Command::Resume] {
            let outcome = dispatcher.execute(command).await;
            assert!(outcome.snapshot.is_none());
        }
        assert!(!backend.calls().contains(&BackendCall::FetchSnapshot));
    }
}
