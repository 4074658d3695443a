//! Score board: an immutable scored batch with ranking and comparison views.

use std::collections::{BTreeMap, BTreeSet};

use keel_core::scores::{ResilienceScoreRecord, ScoreMetric, ScoreSummary};
use serde::Serialize;

/// One batch of scores, in batch order.
///
/// Produced wholesale by [`crate::score_batch`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    records: Vec<ResilienceScoreRecord>,
}

impl ScoreBoard {
    #[must_use]
    pub const fn new(records: Vec<ResilienceScoreRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ResilienceScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ResilienceScoreRecord> {
        self.records
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, metro_code: &str) -> Option<&ResilienceScoreRecord> {
        self.records.iter().find(|r| r.metro_code == metro_code)
    }

    /// Records for the given metro codes, in batch order.
    ///
    /// Codes not present in the batch are skipped.
    #[must_use]
    pub fn compare<I, S>(&self, metro_codes: I) -> Vec<ResilienceScoreRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<String> = metro_codes
            .into_iter()
            .map(|code| code.as_ref().to_string())
            .collect();

        let selected: Vec<ResilienceScoreRecord> = self
            .records
            .iter()
            .filter(|r| wanted.contains(&r.metro_code))
            .cloned()
            .collect();

        if selected.len() < wanted.len() {
            let found: BTreeSet<&str> = selected.iter().map(|r| r.metro_code.as_str()).collect();
            let unknown: Vec<&str> = wanted
                .iter()
                .map(String::as_str)
                .filter(|code| !found.contains(code))
                .collect();
            tracing::debug!(?unknown, "compare skipped metros not in batch");
        }
        selected
    }

    /// The `n` best records by `metric`; ties keep batch order.
    #[must_use]
    pub fn top(&self, n: usize, metric: ScoreMetric) -> Vec<ResilienceScoreRecord> {
        let mut ranked: Vec<&ResilienceScoreRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
        ranked.into_iter().take(n).cloned().collect()
    }

    /// Composite statistics and category distribution.
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        let mut category_distribution = BTreeMap::new();
        for record in &self.records {
            *category_distribution.entry(record.category).or_insert(0) += 1;
        }

        if self.records.is_empty() {
            return ScoreSummary {
                total_metros: 0,
                mean_composite: 0.0,
                highest_composite: 0.0,
                lowest_composite: 0.0,
                category_distribution,
            };
        }

        let composites = self.records.iter().map(|r| r.composite);
        let sum: f64 = composites.clone().sum();
        #[allow(clippy::cast_precision_loss)]
        let mean_composite = sum / self.records.len() as f64;

        ScoreSummary {
            total_metros: self.records.len(),
            mean_composite,
            highest_composite: composites.clone().fold(f64::NEG_INFINITY, f64::max),
            lowest_composite: composites.fold(f64::INFINITY, f64::min),
            category_distribution,
        }
    }
}

impl From<Vec<ResilienceScoreRecord>> for ScoreBoard {
    fn from(records: Vec<ResilienceScoreRecord>) -> Self {
        Self::new(records)
    }
}
