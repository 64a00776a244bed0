//! Scrollable event log widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

use evalwatch_core::{EventLog, LogLine};

use super::LogViewState;
use crate::theme::styles;

/// Event log in arrival order, following the tail unless scrolled away
pub struct EventLogView<'a> {
    log: &'a EventLog,
    show_timestamps: bool,
}

impl<'a> EventLogView<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self {
            log,
            show_timestamps: true,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    fn title(&self) -> String {
        match self.log.len() {
            0 => "Event Log".to_string(),
            n => format!("Event Log ({})", n),
        }
    }

    fn format_line(&self, line: &'a LogLine) -> Line<'a> {
        let (prefix_style, message_style) = styles::severity_styles(line.severity);
        let mut spans = Vec::with_capacity(4);
        if self.show_timestamps {
            spans.push(Span::styled(
                format!("{} ", line.formatted_time()),
                styles::text_muted(),
            ));
        }
        spans.push(Span::styled(line.severity.prefix(), prefix_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(line.message.as_str(), message_style));
        Line::from(spans)
    }
}

impl StatefulWidget for EventLogView<'_> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = styles::titled_block(&self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        let total_lines = self.log.len();
        let visible_lines = inner.height as usize;
        state.update_content_size(total_lines, visible_lines);

        if total_lines == 0 {
            Paragraph::new(Span::styled("Waiting for events…", styles::text_muted()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .log
            .lines()
            .iter()
            .skip(state.offset)
            .take(visible_lines)
            .map(|line| self.format_line(line))
            .collect();
        Paragraph::new(lines).render(inner, buf);

        if total_lines > visible_lines {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");
            let mut scrollbar_state = ScrollbarState::new(total_lines).position(state.offset);
            scrollbar.render(area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_to_string;

    fn render_log(log: &EventLog, state: &mut LogViewState, height: u16) -> String {
        render_to_string(60, height, |frame| {
            frame.render_stateful_widget(
                EventLogView::new(log).show_timestamps(false),
                frame.area(),
                state,
            );
        })
    }

    #[test]
    fn test_empty_log_placeholder() {
        let log = EventLog::new();
        let mut state = LogViewState::new();
        let content = render_log(&log, &mut state, 6);
        assert!(content.contains("Waiting for events"));
        assert_eq!(state.total_lines, 0);
    }

    #[test]
    fn test_lines_render_in_arrival_order() {
        let mut log = EventLog::new();
        log.info("first");
        log.success("second");
        log.error("third");
        let mut state = LogViewState::new();

        let content = render_log(&log, &mut state, 8);
        let first = content.find("first").unwrap();
        let second = content.find("second").unwrap();
        let third = content.find("third").unwrap();
        assert!(first < second && second < third);
        assert!(content.contains("ERR third"));
        assert!(content.contains("Event Log (3)"));
    }

    #[test]
    fn test_auto_scroll_follows_tail() {
        let mut log = EventLog::new();
        for i in 0..20 {
            log.info(format!("line-{:02}", i));
        }
        let mut state = LogViewState::new();

        // 6 rows minus borders leaves 4 visible lines
        let content = render_log(&log, &mut state, 6);
        assert_eq!(state.visible_lines, 4);
        assert_eq!(state.offset, 16);
        assert!(content.contains("line-19"));
        assert!(!content.contains("line-15"));
    }

    #[test]
    fn test_scrolled_view_keeps_position() {
        let mut log = EventLog::new();
        for i in 0..20 {
            log.info(format!("line-{:02}", i));
        }
        let mut state = LogViewState::new();
        render_log(&log, &mut state, 6);
        state.scroll_to_top();

        let content = render_log(&log, &mut state, 6);
        assert!(content.contains("line-00"));
        assert!(!content.contains("line-19"));
    }

    #[test]
    fn test_timestamps_toggle() {
        let mut log = EventLog::new();
        log.info("hello");
        let expected = log.lines()[0].formatted_time();
        let mut state = LogViewState::new();

        let content = render_to_string(60, 4, |frame| {
            frame.render_stateful_widget(EventLogView::new(&log), frame.area(), &mut state);
        });
        assert!(content.contains(&format!("{} INF hello", expected)));
    }
}
