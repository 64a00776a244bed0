//! Status bar widget
//!
//! Key bindings on the left, results freshness on the right.

use evalwatch_app::DashboardState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

const BINDINGS: [(&str, &str); 8] = [
    ("1", "quick"),
    ("s", "start"),
    ("p", "pause"),
    ("r", "resume"),
    ("x", "reset"),
    ("f", "refresh"),
    ("↑↓", "scroll"),
    ("q", "quit"),
];

/// Single-row footer
pub struct StatusBar<'a> {
    state: &'a DashboardState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a DashboardState) -> Self {
        Self { state }
    }

    fn freshness(&self) -> Span<'static> {
        if self.state.snapshot_loading {
            return Span::styled("loading results… ", styles::keybinding());
        }
        match self.state.store.last_updated() {
            Some(at) => Span::styled(
                format!("results {} ", at.format("%H:%M:%S")),
                styles::text_secondary(),
            ),
            None => Span::styled("no results ", styles::text_muted()),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (key, action) in BINDINGS {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        let hints = Line::from(spans);
        buf.set_line(area.x, area.y, &hints, area.width);

        let freshness = Line::from(self.freshness());
        let width = freshness.width() as u16;
        if hints.width() as u16 + width <= area.width {
            buf.set_line(area.x + area.width - width, area.y, &freshness, width);
        }
    }
}
