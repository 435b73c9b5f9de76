//! Summary series and the charts built from them.
//!
//! Chart builders only read the table they are given, so they can run in
//! any order; [`render_all`] writes them one after another.

pub mod chart;
pub mod fatal;
pub mod highway;
pub mod series;

use anyhow::Result;
use chart::Chart;
use std::path::{Path, PathBuf};

/// Renders every chart into `dir`, returning the written paths in order.
pub fn render_all(charts: &[Chart], dir: &Path) -> Result<Vec<PathBuf>> {
    charts.iter().map(|c| chart::render(c, dir)).collect()
}
