//! Prediction Log
//!
//! Session-scoped, append-only record of risk predictions with filtering,
//! chart summaries and CSV export. Nothing here is persisted.

mod event;
mod export;
mod log;
mod summary;

pub use event::PredictionEvent;
pub use export::{export_csv, write_csv, CSV_HEADER};
pub use log::{KindFilter, LogStats, PredictionLog};
pub use summary::{risk_distribution, summarize, ResultShare, Summary, SummaryGrid, SummaryRow};
