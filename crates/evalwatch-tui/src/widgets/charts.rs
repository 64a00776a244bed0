//! The five result charts
//!
//! Each widget borrows one projection from the snapshot store and renders it
//! as-is; no aggregation happens here.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Direction, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Paragraph, Widget,
    },
};

use evalwatch_core::{CategorySeries, OutcomeSplit, ScatterPoint};

use crate::theme::{palette, styles};

const MAX_BAR_WIDTH: u16 = 9;

/// Widest bar that lets `bars` bars and their gaps fit in `width` columns
pub(crate) fn fit_bar_width(width: u16, bars: usize, gap: u16) -> u16 {
    if bars == 0 {
        return 1;
    }
    let bars = bars.min(u16::MAX as usize) as u16;
    let per_bar = width.saturating_add(gap) / bars;
    per_bar.saturating_sub(gap).clamp(1, MAX_BAR_WIDTH)
}

fn render_placeholder(block: Block<'_>, area: Rect, buf: &mut Buffer) {
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(Span::styled("No results yet", styles::text_muted()))
        .alignment(Alignment::Center)
        .render(inner, buf);
}

fn value_style() -> Style {
    Style::default()
        .fg(palette::DEEPEST_BG)
        .add_modifier(Modifier::BOLD)
}

/// Horizontal bars of accuracy per domain, scaled to 100%
pub struct AccuracyChart<'a> {
    series: &'a CategorySeries,
}

impl<'a> AccuracyChart<'a> {
    pub fn new(series: &'a CategorySeries) -> Self {
        Self { series }
    }
}

impl Widget for AccuracyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block(self.series.label);
        if self.series.points.is_empty() {
            return render_placeholder(block, area, buf);
        }

        let bars: Vec<Bar> = self
            .series
            .points
            .iter()
            .map(|(domain, accuracy)| {
                // NaN casts to 0
                let percent = (accuracy.clamp(0.0, 1.0) * 100.0).round() as u64;
                Bar::default()
                    .value(percent)
                    .label(Line::from(domain.as_str()))
                    .text_value(format!("{}%", percent))
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(palette::SERIES_ACCURACY))
            .value_style(value_style())
            .max(100)
            .render(area, buf);
    }
}

/// Vertical bars of average response time per domain
pub struct ResponseTimeChart<'a> {
    series: &'a CategorySeries,
}

impl<'a> ResponseTimeChart<'a> {
    pub fn new(series: &'a CategorySeries) -> Self {
        Self { series }
    }
}

impl Widget for ResponseTimeChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block(self.series.label);
        if self.series.points.is_empty() {
            return render_placeholder(block, area, buf);
        }

        let bars: Vec<Bar> = self
            .series
            .points
            .iter()
            .map(|(domain, ms)| {
                let ms = ms.max(0.0).round() as u64;
                Bar::default()
                    .value(ms)
                    .label(Line::from(domain.as_str()))
                    .text_value(ms.to_string())
            })
            .collect();
        let bar_width = fit_bar_width(block.inner(area).width, bars.len(), 1);

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(palette::SERIES_RESPONSE_TIME))
            .value_style(value_style())
            .render(area, buf);
    }
}

/// Correct and incorrect answers side by side for every domain
pub struct OutcomesChart<'a> {
    outcomes: &'a [OutcomeSplit],
}

impl<'a> OutcomesChart<'a> {
    pub fn new(outcomes: &'a [OutcomeSplit]) -> Self {
        Self { outcomes }
    }
}

impl Widget for OutcomesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Correct / Incorrect");
        if self.outcomes.is_empty() {
            return render_placeholder(block, area, buf);
        }

        // Each group is two bars plus a one-column group gap
        let group_width = fit_bar_width(block.inner(area).width, self.outcomes.len(), 1);
        let bar_width = (group_width / 2).max(1);

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(bar_width)
            .bar_gap(0)
            .group_gap(1)
            .value_style(value_style());

        for split in self.outcomes {
            let bars = [
                Bar::default()
                    .value(split.correct)
                    .style(Style::default().fg(palette::SERIES_CORRECT)),
                Bar::default()
                    .value(split.incorrect)
                    .style(Style::default().fg(palette::SERIES_INCORRECT)),
            ];
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(split.domain.as_str()))
                    .bars(&bars),
            );
        }

        chart.render(area, buf);
    }
}

/// Horizontal bars of question count per domain
pub struct DistributionChart<'a> {
    series: &'a CategorySeries,
}

impl<'a> DistributionChart<'a> {
    pub fn new(series: &'a CategorySeries) -> Self {
        Self { series }
    }
}

impl Widget for DistributionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block(self.series.label);
        if self.series.points.is_empty() {
            return render_placeholder(block, area, buf);
        }

        let bars: Vec<Bar> = self
            .series
            .points
            .iter()
            .map(|(domain, count)| {
                let count = count.max(0.0) as u64;
                Bar::default()
                    .value(count)
                    .label(Line::from(domain.as_str()))
                    .text_value(count.to_string())
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(palette::SERIES_COUNT))
            .value_style(value_style())
            .render(area, buf);
    }
}

/// Accuracy against response time, one labelled point per domain
pub struct ScatterChart<'a> {
    points: &'a [ScatterPoint],
}

impl<'a> ScatterChart<'a> {
    pub fn new(points: &'a [ScatterPoint]) -> Self {
        Self { points }
    }

    /// Upper x bound with some headroom; never zero
    fn x_max(&self) -> f64 {
        let max = self
            .points
            .iter()
            .map(|p| p.response_time_ms)
            .fold(0.0, f64::max);
        if max > 0.0 {
            (max * 1.1).ceil()
        } else {
            1.0
        }
    }
}

impl Widget for ScatterChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Accuracy vs Response Time");
        if self.points.is_empty() {
            return render_placeholder(block, area, buf);
        }

        let coords: Vec<[(f64, f64); 1]> = self
            .points
            .iter()
            .map(|p| [(p.response_time_ms, p.accuracy * 100.0)])
            .collect();

        let datasets: Vec<Dataset> = self
            .points
            .iter()
            .zip(coords.iter())
            .enumerate()
            .map(|(i, (point, coord))| {
                let color = palette::SCATTER_COLORS[i % palette::SCATTER_COLORS.len()];
                Dataset::default()
                    .name(point.domain.clone())
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color))
                    .data(coord)
            })
            .collect();

        let x_max = self.x_max();
        let axis_style = styles::text_muted();

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("ms")
                    .style(axis_style)
                    .bounds([0.0, x_max])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{:.0}", x_max / 2.0)),
                        Span::raw(format!("{:.0}", x_max)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("%")
                    .style(axis_style)
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            )
            .render(area, buf);
    }
}
