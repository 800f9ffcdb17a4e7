//! Result Cross-Tabulation
//!
//! Count data behind the dashboard's bar and pie charts.

use crate::event::PredictionEvent;
use risk_features::ModelKind;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Count of one (kind, result) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub result: String,
    pub count: usize,
}

/// Counts of result labels grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    counts: BTreeMap<(ModelKind, String), usize>,
}

/// Kind × result matrix with zeros for absent combinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryGrid {
    /// Row labels (kinds present in the entries)
    pub kinds: Vec<ModelKind>,
    /// Column labels (results present in the entries)
    pub results: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

/// Share of one result label across all entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultShare {
    pub result: String,
    pub count: usize,
    /// Percentage of all entries (0-100)
    pub percent: f64,
}

/// Cross-tabulate result counts by kind
pub fn summarize<'a, I>(entries: I) -> Summary
where
    I: IntoIterator<Item = &'a PredictionEvent>,
{
    let mut counts = BTreeMap::new();
    for event in entries {
        *counts
            .entry((event.kind(), event.result().to_string()))
            .or_insert(0) += 1;
    }
    Summary { counts }
}

impl Summary {
    /// Count for a combination; 0 when absent
    pub fn count(&self, kind: ModelKind, result: &str) -> usize {
        self.counts
            .get(&(kind, result.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of entries summarized
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct (kind, result) groups
    pub fn groups(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero combinations, ordered by kind then result
    pub fn rows(&self) -> Vec<SummaryRow> {
        self.counts
            .iter()
            .map(|((kind, result), count)| SummaryRow {
                kind: *kind,
                result: result.clone(),
                count: *count,
            })
            .collect()
    }

    /// Dense matrix over the kinds and results seen
    pub fn grid(&self) -> SummaryGrid {
        let kinds: Vec<ModelKind> = self
            .counts
            .keys()
            .map(|(kind, _)| *kind)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let results: Vec<String> = self
            .counts
            .keys()
            .map(|(_, result)| result.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let counts = kinds
            .iter()
            .map(|kind| {
                results
                    .iter()
                    .map(|result| self.count(*kind, result))
                    .collect()
            })
            .collect();

        SummaryGrid {
            kinds,
            results,
            counts,
        }
    }
}

/// Count and percentage per result label, most frequent first
pub fn risk_distribution<'a, I>(entries: I) -> Vec<ResultShare>
where
    I: IntoIterator<Item = &'a PredictionEvent>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for event in entries {
        *counts.entry(event.result()).or_insert(0) += 1;
        total += 1;
    }

    let mut shares: Vec<ResultShare> = counts
        .into_iter()
        .map(|(result, count)| ResultShare {
            result: result.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    // stable: ties keep label order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
