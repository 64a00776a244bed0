//! Headless mode runner - main event loop without TUI

use evalwatch_app::{Engine, EngineEvent, Message, Settings};
use evalwatch_client::Command;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use evalwatch_core::prelude::Result;

use super::HeadlessEvent;

/// Run in headless mode - output NDJSON events instead of the TUI
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("evalwatch starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings)?;
    let mut events = engine.subscribe();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        read_stdin_commands(stdin_tx);
    });

    engine.start();
    emit_pending(&mut events);

    while !engine.should_quit() {
        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                emit_pending(&mut events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    engine.shutdown().await;
    emit_pending(&mut events);

    info!("evalwatch headless mode exiting");
    Ok(())
}

/// Write every queued engine event to stdout
fn emit_pending(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                for line in HeadlessEvent::from_engine_event(&event) {
                    line.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} engine events", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Map one stdin line to a message
fn parse_stdin_command(line: &str) -> Option<Message> {
    let command = match line {
        "1" | "quick" => Command::Quick,
        "s" | "start" => Command::Start,
        "p" | "pause" => Command::Pause,
        "r" | "resume" => Command::Resume,
        "x" | "reset" => Command::Reset,
        "f" | "refresh" => return Some(Message::RefreshSnapshot),
        "q" | "quit" => return Some(Message::Quit),
        _ => return None,
    };
    Some(Message::IssueCommand(command))
}

/// Read control commands from stdin until EOF or quit (blocking)
fn read_stdin_commands(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_stdin_command(trimmed) {
            Some(msg) => {
                let quit = matches!(msg, Message::Quit);
                info!("Stdin: {}", trimmed);
                if msg_tx.blocking_send(msg).is_err() || quit {
                    break;
                }
            }
            None => warn!("Unknown stdin command: {}", trimmed),
        }
    }

    info!("Stdin reader exiting");
}
