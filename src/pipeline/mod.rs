//! End-to-end runs: load, normalize, filter, enrich, report, persist.

pub mod fatal;
pub mod highway;

pub use fatal::run_fatal;
pub use highway::run_highway;

use std::path::PathBuf;

/// What a pipeline run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Rows in the final row-level table.
    pub rows: usize,
    /// Rows in the city/year summary table.
    pub summary_rows: usize,
    pub tables: Vec<PathBuf>,
    pub charts: Vec<PathBuf>,
}
