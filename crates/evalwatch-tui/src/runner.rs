//! Main TUI runner - entry point and event loop

use evalwatch_app::{Engine, Settings};
use evalwatch_core::prelude::*;
use ratatui::DefaultTerminal;

use super::{event, render, terminal};

/// Run the dashboard until the operator quits or a signal arrives.
///
/// Endpoint validation happens before the terminal is taken over, so a bad
/// URL is reported on a normal screen.
pub async fn run(settings: Settings) -> Result<()> {
    let mut engine = Engine::new(settings)?;
    let mut term = terminal::init()?;

    engine.start();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    terminal::restore();

    if let Err(e) = &result {
        error!("Dashboard loop failed: {}", e);
    }
    result
}

/// Drain engine messages, draw, then wait up to one poll interval for a key.
fn run_loop(terminal: &mut DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        engine.drain_pending_messages();

        terminal
            .draw(|frame| render::view(frame, &mut engine.state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
