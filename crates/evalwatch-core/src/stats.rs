//! Results snapshot, KPIs and the snapshot store

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use crate::projections::ChartProjections;

/// Aggregate results for one evaluated domain
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainStat {
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Fraction of correct answers, expected in `[0, 1]`
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy: f64,
    #[serde(
        rename = "avgResponseTime",
        default,
        deserialize_with = "null_as_default"
    )]
    pub avg_response_time_ms: f64,
}

impl DomainStat {
    pub fn new(
        domain: impl Into<String>,
        count: u64,
        accuracy: f64,
        avg_response_time_ms: f64,
    ) -> Self {
        Self {
            domain: domain.into(),
            count,
            accuracy,
            avg_response_time_ms,
        }
    }
}

/// The runner reports `null` for domains it has not scored yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered per-domain results as returned by the results endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StatsSnapshot {
    entries: Vec<DomainStat>,
}

impl StatsSnapshot {
    pub fn new(entries: Vec<DomainStat>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DomainStat] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `count` over all domains, saturating at `u64::MAX`
    pub fn total_questions(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.count))
    }

    /// Count-weighted mean accuracy; 0 when no questions were scored
    pub fn overall_accuracy(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .entries
            .iter()
            .map(|s| s.accuracy * s.count as f64)
            .sum();
        weighted / total as f64
    }

    /// Domain with the lowest average response time (first one wins ties)
    pub fn fastest_domain(&self) -> Option<&DomainStat> {
        self.entries.iter().fold(None, |best, s| match best {
            Some(b) if b.avg_response_time_ms <= s.avg_response_time_ms => Some(b),
            _ => Some(s),
        })
    }
}

/// Headline metrics shown above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_questions: u64,
    pub overall_accuracy: f64,
    pub fastest_domain: Option<(String, f64)>,
}

impl Kpis {
    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        Self {
            total_questions: snapshot.total_questions(),
            overall_accuracy: snapshot.overall_accuracy(),
            fastest_domain: snapshot
                .fastest_domain()
                .map(|s| (s.domain.clone(), s.avg_response_time_ms)),
        }
    }

    /// e.g. `73.3%`
    pub fn accuracy_percent(&self) -> String {
        format!("{:.1}%", self.overall_accuracy * 100.0)
    }

    /// e.g. `Security (90 ms)`, or `—` for an empty snapshot
    pub fn fastest_label(&self) -> String {
        match &self.fastest_domain {
            Some((domain, ms)) => format!("{} ({} ms)", domain, ms.round()),
            None => "—".to_string(),
        }
    }
}

/// Holds the latest snapshot together with everything derived from it.
///
/// The snapshot is only ever replaced wholesale; derived views are recomputed
/// in full on every replacement.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshot: StatsSnapshot,
    kpis: Kpis,
    projections: ChartProjections,
    last_updated: Option<DateTime<Local>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let snapshot = StatsSnapshot::default();
        Self {
            kpis: Kpis::from_snapshot(&snapshot),
            projections: ChartProjections::from_snapshot(&snapshot),
            snapshot,
            last_updated: None,
        }
    }

    /// Replace the held snapshot after a successful fetch
    pub fn replace(&mut self, snapshot: StatsSnapshot) {
        self.kpis = Kpis::from_snapshot(&snapshot);
        self.projections = ChartProjections::from_snapshot(&snapshot);
        self.snapshot = snapshot;
        self.last_updated = Some(Local::now());
    }

    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    pub fn kpis(&self) -> &Kpis {
        &self.kpis
    }

    pub fn projections(&self) -> &ChartProjections {
        &self.projections
    }

    /// Local time of the last successful refresh, `None` before the first one
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> StatsSnapshot {
        StatsSnapshot::new(vec![
            DomainStat::new("History", 10, 0.8, 120.0),
            DomainStat::new("Security", 5, 0.6, 90.0),
        ])
    }

    #[test]
    fn test_scenario_kpis() {
        let snapshot = scenario();
        assert_eq!(snapshot.total_questions(), 15);
        let expected = (0.8 * 10.0 + 0.6 * 5.0) / 15.0;
        assert!((snapshot.overall_accuracy() - expected).abs() < 1e-12);
        assert_eq!(
            snapshot.fastest_domain().map(|s| s.domain.as_str()),
            Some("Security")
        );
    }

    #[test]
    fn test_empty_snapshot_kpis() {
        let snapshot = StatsSnapshot::default();
        assert_eq!(snapshot.total_questions(), 0);
        assert_eq!(snapshot.overall_accuracy(), 0.0);
        assert!(snapshot.fastest_domain().is_none());
    }

    #[test]
    fn test_zero_counts_give_zero_accuracy() {
        let snapshot = StatsSnapshot::new(vec![
            DomainStat::new("History", 0, 0.9, 100.0),
            DomainStat::new("Math", 0, 0.4, 80.0),
        ]);
        let accuracy = snapshot.overall_accuracy();
        assert_eq!(accuracy, 0.0);
        assert!(!accuracy.is_nan());
    }

    #[test]
    fn test_fastest_domain_tie_keeps_first() {
        let snapshot = StatsSnapshot::new(vec![
            DomainStat::new("Alpha", 1, 1.0, 50.0),
            DomainStat::new("Beta", 1, 1.0, 50.0),
            DomainStat::new("Gamma", 1, 1.0, 70.0),
        ]);
        assert_eq!(
            snapshot.fastest_domain().map(|s| s.domain.as_str()),
            Some("Alpha")
        );
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"[
            {"domain":"History","count":10,"accuracy":0.8,"avgResponseTime":120},
            {"domain":"Security","count":null,"accuracy":0.6}
        ]"#;
        let snapshot: StatsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.entries().len(), 2);
        assert_eq!(snapshot.entries()[0].avg_response_time_ms, 120.0);
        assert_eq!(snapshot.entries()[1].count, 0);
        assert_eq!(snapshot.entries()[1].avg_response_time_ms, 0.0);
    }

    #[test]
    fn test_total_questions_saturates_on_huge_counts() {
        let json = r#"[
            {"domain":"A","count":18446744073709551615,"accuracy":0.5,"avgResponseTime":10},
            {"domain":"B","count":1,"accuracy":1.0,"avgResponseTime":20}
        ]"#;
        let snapshot: StatsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.total_questions(), u64::MAX);

        let kpis = Kpis::from_snapshot(&snapshot);
        assert_eq!(kpis.total_questions, u64::MAX);
        assert!(kpis.overall_accuracy.is_finite());
    }

    #[test]
    fn test_kpi_labels() {
        let kpis = Kpis::from_snapshot(&scenario());
        assert_eq!(kpis.accuracy_percent(), "73.3%");
        assert_eq!(kpis.fastest_label(), "Security (90 ms)");

        let empty = Kpis::from_snapshot(&StatsSnapshot::default());
        assert_eq!(empty.accuracy_percent(), "0.0%");
        assert_eq!(empty.fastest_label(), "—");
    }

    #[test]
    fn test_store_replace_recomputes_everything() {
        let mut store = SnapshotStore::new();
        assert!(store.last_updated().is_none());
        assert_eq!(store.kpis().total_questions, 0);

        store.replace(scenario());
        assert_eq!(store.kpis().total_questions, 15);
        assert_eq!(store.projections().accuracy.points.len(), 2);
        assert!(store.last_updated().is_some());

        store.replace(StatsSnapshot::default());
        assert_eq!(store.kpis().total_questions, 0);
        assert!(store.projections().accuracy.points.is_empty());
    }
}
