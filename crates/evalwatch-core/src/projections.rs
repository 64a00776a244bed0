//! Chart-ready projections of a [`StatsSnapshot`]
//!
//! All projections are plain data; renderers consume them without touching
//! the snapshot. Domain order always follows snapshot order.

use serde::Serialize;

use crate::stats::StatsSnapshot;

/// One labelled value series over domains
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySeries {
    pub label: &'static str,
    /// `(domain, value)` pairs
    pub points: Vec<(String, f64)>,
}

/// Correct/incorrect split for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeSplit {
    pub domain: String,
    pub correct: u64,
    pub incorrect: u64,
}

impl OutcomeSplit {
    pub fn total(&self) -> u64 {
        self.correct + self.incorrect
    }
}

/// One domain positioned by (response time, accuracy)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub domain: String,
    pub response_time_ms: f64,
    pub accuracy: f64,
}

/// The five dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjections {
    /// Accuracy per domain
    pub accuracy: CategorySeries,
    /// Average response time per domain
    pub response_time: CategorySeries,
    /// Correct vs incorrect per domain
    pub outcomes: Vec<OutcomeSplit>,
    /// Question count distribution
    pub distribution: CategorySeries,
    /// Accuracy vs response time
    pub scatter: Vec<ScatterPoint>,
}

impl ChartProjections {
    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        let entries = snapshot.entries();
        Self {
            accuracy: CategorySeries {
                label: "Accuracy",
                points: entries
                    .iter()
                    .map(|s| (s.domain.clone(), s.accuracy))
                    .collect(),
            },
            response_time: CategorySeries {
                label: "Avg Response Time (ms)",
                points: entries
                    .iter()
                    .map(|s| (s.domain.clone(), s.avg_response_time_ms))
                    .collect(),
            },
            outcomes: entries
                .iter()
                .map(|s| split_outcomes(&s.domain, s.count, s.accuracy))
                .collect(),
            distribution: CategorySeries {
                label: "Question Count",
                points: entries
                    .iter()
                    .map(|s| (s.domain.clone(), s.count as f64))
                    .collect(),
            },
            scatter: entries
                .iter()
                .map(|s| ScatterPoint {
                    domain: s.domain.clone(),
                    response_time_ms: s.avg_response_time_ms,
                    accuracy: s.accuracy,
                })
                .collect(),
        }
    }
}

/// `correct = round(accuracy × count)`, with accuracy clamped to `[0, 1]`
/// so that `correct ≤ count` holds for any input.
fn split_outcomes(domain: &str, count: u64, accuracy: f64) -> OutcomeSplit {
    let accuracy = if accuracy.is_nan() {
        0.0
    } else {
        accuracy.clamp(0.0, 1.0)
    };
    let correct = ((accuracy * count as f64).round() as u64).min(count);
    OutcomeSplit {
        domain: domain.to_string(),
        correct,
        incorrect: count - correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DomainStat;

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot::new(vec![
            DomainStat::new("History", 10, 0.8, 120.0),
            DomainStat::new("Security", 5, 0.6, 90.0),
            DomainStat::new("Math", 3, 0.5, 200.0),
        ])
    }

    #[test]
    fn test_series_follow_snapshot_order() {
        let charts = ChartProjections::from_snapshot(&snapshot());
        let domains: Vec<_> = charts.accuracy.points.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(domains, vec!["History", "Security", "Math"]);
        assert_eq!(charts.response_time.points[1], ("Security".to_string(), 90.0));
        assert_eq!(charts.distribution.points[0], ("History".to_string(), 10.0));
        assert_eq!(charts.accuracy.label, "Accuracy");
    }

    #[test]
    fn test_outcome_split_rounds_half_away_from_zero() {
        let charts = ChartProjections::from_snapshot(&snapshot());
        // 0.5 * 3 = 1.5 -> 2
        assert_eq!(
            charts.outcomes[2],
            OutcomeSplit {
                domain: "Math".to_string(),
                correct: 2,
                incorrect: 1
            }
        );
    }

    #[test]
    fn test_outcome_totals_match_counts() {
        let snapshot = StatsSnapshot::new(vec![
            DomainStat::new("A", 7, 0.33, 1.0),
            DomainStat::new("B", 0, 0.9, 1.0),
            DomainStat::new("C", 4, 1.7, 1.0),
            DomainStat::new("D", 9, -0.2, 1.0),
            DomainStat::new("E", 6, f64::NAN, 1.0),
        ]);
        let charts = ChartProjections::from_snapshot(&snapshot);
        let correct: u64 = charts.outcomes.iter().map(|o| o.correct).sum();
        let incorrect: u64 = charts.outcomes.iter().map(|o| o.incorrect).sum();
        assert_eq!(correct + incorrect, snapshot.total_questions());

        for (split, stat) in charts.outcomes.iter().zip(snapshot.entries()) {
            assert!(split.correct <= stat.count);
            assert_eq!(split.total(), stat.count);
        }
        assert_eq!(charts.outcomes[2].correct, 4);
        assert_eq!(charts.outcomes[3].correct, 0);
    }

    #[test]
    fn test_scatter_pairs_time_with_accuracy() {
        let charts = ChartProjections::from_snapshot(&snapshot());
        assert_eq!(
            charts.scatter[0],
            ScatterPoint {
                domain: "History".to_string(),
                response_time_ms: 120.0,
                accuracy: 0.8
            }
        );
    }

    #[test]
    fn test_empty_snapshot_has_empty_projections() {
        let charts = ChartProjections::from_snapshot(&StatsSnapshot::default());
        assert!(charts.accuracy.points.is_empty());
        assert!(charts.outcomes.is_empty());
        assert!(charts.scatter.is_empty());
        assert!(charts.distribution.points.is_empty());
    }
}
