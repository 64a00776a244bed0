//! Main render/view function (View in TEA pattern)


use evalwatch_app::DashboardState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Only the log scroll state is written: the event log widget records the
/// content and viewport size it rendered with.
pub fn view(frame: &mut Frame, state: &mut DashboardState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_widget(widgets::KpiCards::new(state.store.kpis()), areas.kpis);

    frame.render_stateful_widget(
        widgets::EventLogView::new(&state.log).show_timestamps(state.settings.ui.show_timestamps),
        areas.logs,
        &mut state.log_view,
    );

    let projections = state.store.projections();
    let charts = areas.charts;
    frame.render_widget(
        widgets::AccuracyChart::new(&projections.accuracy),
        charts.accuracy,
    );
    frame.render_widget(
        widgets::ResponseTimeChart::new(&projections.response_time),
        charts.response_time,
    );
    frame.render_widget(
        widgets::OutcomesChart::new(&projections.outcomes),
        charts.outcomes,
    );
    frame.render_widget(
        widgets::DistributionChart::new(&projections.distribution),
        charts.distribution,
    );
    frame.render_widget(
        widgets::ScatterChart::new(&projections.scatter),
        charts.scatter,
    );

    frame.render_widget(widgets::StatusBar::new(state), areas.footer);
}
