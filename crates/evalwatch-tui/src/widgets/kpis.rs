//! KPI cards above the charts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use evalwatch_core::Kpis;

use crate::theme::{palette, styles};

/// Total questions, overall accuracy and fastest domain side by side
pub struct KpiCards<'a> {
    kpis: &'a Kpis,
}

impl<'a> KpiCards<'a> {
    pub fn new(kpis: &'a Kpis) -> Self {
        Self { kpis }
    }
}

impl Widget for KpiCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

        let values = [
            ("Total Questions", self.kpis.total_questions.to_string()),
            ("Overall Accuracy", self.kpis.accuracy_percent()),
            ("Fastest Domain", self.kpis.fastest_label()),
        ];

        for ((title, value), card) in values.into_iter().zip(cards.iter()) {
            render_card(title, value, *card, buf);
        }
    }
}

fn render_card(title: &str, value: String, area: Rect, buf: &mut Buffer) {
    let value = Line::from(Span::styled(
        value,
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ));
    Paragraph::new(value)
        .alignment(Alignment::Center)
        .block(styles::titled_block(title))
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_to_string;
    use evalwatch_core::{DomainStat, StatsSnapshot};

    #[test]
    fn test_kpis_for_empty_snapshot() {
        let kpis = Kpis::from_snapshot(&StatsSnapshot::default());
        let content = render_to_string(90, 3, |frame| {
            frame.render_widget(KpiCards::new(&kpis), frame.area());
        });

        assert!(content.contains("Total Questions"));
        assert!(content.contains("0.0%"));
        assert!(content.contains("—"));
    }

    #[test]
    fn test_kpis_show_fastest_domain() {
        let snapshot = StatsSnapshot::new(vec![
            DomainStat::new("Math", 10, 0.8, 120.0),
            DomainStat::new("Security", 5, 0.6, 90.0),
        ]);
        let kpis = Kpis::from_snapshot(&snapshot);
        let content = render_to_string(90, 3, |frame| {
            frame.render_widget(KpiCards::new(&kpis), frame.area());
        });

        assert!(content.contains("15"));
        assert!(content.contains(&kpis.accuracy_percent()));
        assert!(content.contains("Security (90 ms)"));
    }
}
