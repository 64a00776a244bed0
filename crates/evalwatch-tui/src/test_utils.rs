//! Rendering helpers for widget tests

use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

/// Draw once into a test terminal and return the buffer text, one row per line.
pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    buffer
        .content
        .chunks(buffer.area.width.max(1) as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
