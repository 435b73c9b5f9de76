//! Persistence of the final tables.
//!
//! Tables are written as comma-separated files with a header row and no
//! index column.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Logs the first rows of a table as pretty-printed JSON.
pub fn log_preview<T: Serialize>(table: &str, rows: &[T], limit: usize) -> Result<()> {
    let preview = &rows[..rows.len().min(limit)];
    debug!(table, "{}", serde_json::to_string_pretty(preview)?);
    Ok(())
}

/// Writes `rows` to `path`, replacing any existing file.
///
/// Creates the parent directory if it does not already exist.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Table written");
    Ok(())
}
