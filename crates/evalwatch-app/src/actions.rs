//! Action handlers: UpdateAction dispatch and background task spawning

use tokio::sync::mpsc;

use evalwatch_client::{Dispatcher, EvaluationBackend};
use evalwatch_core::prelude::*;
use evalwatch_core::StatsSnapshot;

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task.
///
/// Results come back as messages. A closed message channel means the session
/// is gone, so send failures are dropped.
pub fn handle_action<B>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, dispatcher: Dispatcher<B>)
where
    B: EvaluationBackend + Clone + Sync + 'static,
{
    match action {
        UpdateAction::FetchSnapshot { seq } => {
            tokio::spawn(async move {
                let result = dispatcher.fetch_snapshot().await;
                let _ = msg_tx.send(snapshot_message(seq, result)).await;
            });
        }

        UpdateAction::ExecuteCommand {
            command,
            snapshot_seq,
        } => {
            tokio::spawn(async move {
                let outcome = dispatcher.execute(command).await;

                // The acknowledgement is reported before the refetched snapshot.
                let _ = msg_tx
                    .send(Message::CommandCompleted {
                        command: outcome.command,
                        result: outcome.result,
                    })
                    .await;

                if let (Some(result), Some(seq)) = (outcome.snapshot, snapshot_seq) {
                    let _ = msg_tx.send(snapshot_message(seq, result)).await;
                }
            });
        }
    }
}

fn snapshot_message(seq: u64, result: Result<StatsSnapshot>) -> Message {
    match result {
        Ok(snapshot) => Message::SnapshotLoaded { seq, snapshot },
        Err(e) => Message::SnapshotFailed {
            seq,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalwatch_client::test_utils::{BackendCall, FakeBackend};
    use evalwatch_client::{Command, CommandResult};
    use evalwatch_core::DomainStat;

    #[tokio::test]
    async fn test_fetch_snapshot_reports_loaded() {
        let snapshot = StatsSnapshot::new(vec![DomainStat::new("Math", 2, 1.0, 10.0)]);
        let backend = FakeBackend::new().with_snapshot(snapshot.clone());
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(
            UpdateAction::FetchSnapshot { seq: 7 },
            tx,
            Dispatcher::new(backend),
        );

        match rx.recv().await {
            Some(Message::SnapshotLoaded { seq, snapshot: got }) => {
                assert_eq!(seq, 7);
                assert_eq!(got, snapshot);
            }
            other => panic!("expected SnapshotLoaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_snapshot_reports_failure() {
        let (tx, mut rx) = mpsc::channel(8);
        handle_action(
            UpdateAction::FetchSnapshot { seq: 3 },
            tx,
            Dispatcher::new(FakeBackend::new().unreachable()),
        );

        assert!(matches!(
            rx.recv().await,
            Some(Message::SnapshotFailed { seq: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_reset_reports_ack_then_snapshot() {
        let backend = FakeBackend::new().with_ack("Evaluation reset");
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(
            UpdateAction::ExecuteCommand {
                command: Command::Reset,
                snapshot_seq: Some(2),
            },
            tx,
            Dispatcher::new(backend.clone()),
        );

        match rx.recv().await {
            Some(Message::CommandCompleted { command, result }) => {
                assert_eq!(command, Command::Reset);
                assert_eq!(
                    result,
                    CommandResult::Acknowledged {
                        status_text: "Evaluation reset".to_string()
                    }
                );
            }
            other => panic!("expected CommandCompleted, got {:?}", other),
        }
        assert!(matches!(
            rx.recv().await,
            Some(Message::SnapshotLoaded { seq: 2, .. })
        ));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::Command(Command::Reset), BackendCall::FetchSnapshot]
        );
    }

    #[tokio::test]
    async fn test_non_reset_command_sends_only_completion() {
        let (tx, mut rx) = mpsc::channel(8);
        handle_action(
            UpdateAction::ExecuteCommand {
                command: Command::Pause,
                snapshot_seq: None,
            },
            tx,
            Dispatcher::new(FakeBackend::new().unreachable()),
        );

        match rx.recv().await {
            Some(Message::CommandCompleted { result, .. }) => {
                assert_eq!(result, CommandResult::Unreachable)
            }
            other => panic!("expected CommandCompleted, got {:?}", other),
        }
        // Task finished and dropped its sender
        assert!(rx.recv().await.is_none());
    }
}
