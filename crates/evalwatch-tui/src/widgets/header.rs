//! Header bar widget
//!
//! Title, live connection indicator and the latest command status.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use evalwatch_app::DashboardState;

use crate::theme::{palette, styles};

/// Main header showing app title, connection state and command status
pub struct MainHeader<'a> {
    state: &'a DashboardState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a DashboardState) -> Self {
        Self { state }
    }

    fn left_spans(&self) -> Vec<Span<'static>> {
        let (icon, icon_style) = styles::connection_indicator(self.state.connection);
        vec![
            Span::raw(" "),
            Span::styled(icon, icon_style),
            Span::raw(" "),
            Span::styled("evalwatch", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.state.connection.label(), icon_style),
        ]
    }

    fn right_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        if self.state.commands_in_flight > 0 {
            spans.push(Span::styled(
                format!("[{} pending] ", self.state.commands_in_flight),
                styles::keybinding(),
            ));
        }

        match (&self.state.status_text, self.state.last_command) {
            (Some(text), Some(command)) => {
                spans.push(Span::styled(
                    format!("{}: ", command.label()),
                    styles::text_secondary(),
                ));
                spans.push(Span::styled(text.clone(), styles::text_primary()));
            }
            (Some(text), None) => {
                spans.push(Span::styled(text.clone(), styles::text_primary()));
            }
            _ => spans.push(Span::styled("No command issued", styles::text_muted())),
        }
        spans.push(Span::raw(" "));
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(self.left_spans());
        let right = Line::from(self.right_spans());
        let left_width = left.width() as u16;
        let right_width = right.width() as u16;

        buf.set_line(inner.x, inner.y, &left, inner.width);

        // Status text yields to the title when the row is too narrow
        if left_width + right_width < inner.width {
            let x = inner.x + inner.width - right_width;
            buf.set_line(x, inner.y, &right, right_width);
        }
    }
}
