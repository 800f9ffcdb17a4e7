//! Append-Only Prediction Log

use crate::event::PredictionEvent;
use risk_features::{ModelKind, UnknownKind};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Type selector for log views: everything or one model kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(ModelKind),
}

impl KindFilter {
    /// Selected kind, `None` for all
    pub fn kind(&self) -> Option<ModelKind> {
        match self {
            KindFilter::All => None,
            KindFilter::Only(kind) => Some(*kind),
        }
    }
}

impl From<Option<ModelKind>> for KindFilter {
    fn from(kind: Option<ModelKind>) -> Self {
        kind.map_or(KindFilter::All, KindFilter::Only)
    }
}

impl FromStr for KindFilter {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(KindFilter::All)
        } else {
            s.parse().map(KindFilter::Only)
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str("All"),
            KindFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

/// KPI counts over the whole log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LogStats {
    pub total: usize,
    pub heart: usize,
    pub diabetes: usize,
}

/// Insertion-ordered prediction events for one session
#[derive(Debug, Clone, Default)]
pub struct PredictionLog {
    entries: Vec<PredictionEvent>,
}

impl PredictionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the end of the log
    pub fn append(&mut self, event: PredictionEvent) {
        debug!(
            "Logged {} prediction #{}: {}",
            event.kind(),
            self.entries.len() + 1,
            event.result()
        );
        self.entries.push(event);
    }

    /// Entries of one kind, or all entries, in insertion order
    pub fn filter(&self, kind: Option<ModelKind>) -> Vec<&PredictionEvent> {
        self.entries
            .iter()
            .filter(|event| kind.map_or(true, |k| event.kind() == k))
            .collect()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[PredictionEvent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total and per-kind counts
    pub fn stats(&self) -> LogStats {
        self.entries
            .iter()
            .fold(LogStats::default(), |mut stats, event| {
                stats.total += 1;
                match event.kind() {
                    ModelKind::Heart => stats.heart += 1,
                    ModelKind::Diabetes => stats.diabetes += 1,
                }
                stats
            })
    }
}
