//! Screen layout definitions for the TUI
//!
//! Wide terminals put the event log beside the charts; narrow ones stack the
//! charts above the log.

use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the body is stacked vertically
pub const COMPACT_WIDTH: u16 = 100;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, connection indicator and command status
    pub header: Rect,
    /// Three KPI cards
    pub kpis: Rect,
    /// Event log
    pub logs: Rect,
    pub charts: ChartAreas,
    /// Keybinding hints
    pub footer: Rect,
}

/// One area per chart
#[derive(Debug, Clone, Copy)]
pub struct ChartAreas {
    pub accuracy: Rect,
    pub response_time: Rect,
    pub outcomes: Rect,
    pub distribution: Rect,
    /// Full-width bottom row
    pub scatter: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Length(3), // KPI cards
        Constraint::Min(6),    // Log + charts
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let (logs, charts) = if area.width >= COMPACT_WIDTH {
        let cols = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[2]);
        (cols[0], cols[1])
    } else {
        let stacked = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);
        (stacked[1], stacked[0])
    };

    ScreenAreas {
        header: rows[0],
        kpis: rows[1],
        logs,
        charts: chart_grid(charts),
        footer: rows[3],
    }
}

/// Two rows of paired charts, then the scatter plot across the full width
fn chart_grid(area: Rect) -> ChartAreas {
    let rows = Layout::vertical([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);
    let halves = [Constraint::Percentage(50), Constraint::Percentage(50)];
    let top = Layout::horizontal(halves).split(rows[0]);
    let middle = Layout::horizontal(halves).split(rows[1]);

    ChartAreas {
        accuracy: top[0],
        response_time: top[1],
        outcomes: middle[0],
        distribution: middle[1],
        scatter: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_puts_log_beside_charts() {
        let layout = create(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.kpis.y, 3);
        assert_eq!(layout.kpis.height, 3);
        assert_eq!(layout.footer.y, 39);
        assert_eq!(layout.footer.height, 1);

        assert_eq!(layout.logs.y, 6);
        assert_eq!(layout.logs.height, 33); // 40 - 3 - 3 - 1
        assert_eq!(layout.logs.width, 48); // 40% of 120
        assert_eq!(layout.charts.accuracy.x, 48);
    }

    #[test]
    fn test_chart_grid_covers_chart_column() {
        let layout = create(Rect::new(0, 0, 120, 40));
        let charts = layout.charts;

        assert_eq!(
            charts.accuracy.width + charts.response_time.width,
            charts.scatter.width
        );
        assert_eq!(charts.outcomes.y, charts.distribution.y);
        assert!(charts.outcomes.y > charts.accuracy.y);
        assert!(charts.scatter.y > charts.outcomes.y);
    }

    #[test]
    fn test_compact_layout_stacks_log_below_charts() {
        let layout = create(Rect::new(0, 0, 80, 30));

        assert_eq!(layout.logs.width, 80);
        assert_eq!(layout.charts.scatter.width, 80);
        assert!(layout.logs.y > layout.charts.scatter.y);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = create(Rect::new(0, 0, 10, 5));
        assert!(layout.logs.height <= 5);
    }
}
