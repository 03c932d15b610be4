//! Result table writer and destination-path resolution.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// One held-out sample in the persisted result table.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub patient_id: String,
    pub true_label: i32,
    pub predicted_label: i32,
    pub predicted_probability: f64,
}

/// Resolve the destination of the result table.
///
/// The base name is a pure function of the flags and of whether the caller's
/// path mentions the alternate ("new") dataset:
///
/// - `result_baseline.csv` / `result_extended.csv`, promoted to the
///   `new_` preset when `save_path` contains "new"; written next to the
///   caller-supplied path.
/// - `multiple` overrides the caller's path entirely with
///   `result/result_<part>_multi.csv`. Intentional quirk kept from the
///   source system: the caller's directory is ignored in that mode.
pub fn resolve_save_path(save_path: &Path, extended: bool, multiple: bool) -> PathBuf {
    let part = if extended { "extended" } else { "baseline" };
    let part = if save_path.to_string_lossy().contains("new") {
        format!("new_{}", part)
    } else {
        part.to_string()
    };

    if multiple {
        return PathBuf::from(format!("result/result_{}_multi.csv", part));
    }

    let dir = save_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("result_{}.csv", part))
}

/// Write the result table as headered csv, no index column.
///
/// Overwrites any existing file at `path` silently.
pub fn write_results(path: &Path, records: &[ResultRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open result file: {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write result row for {}", record.patient_id))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush result file: {}", path.display()))?;
    Ok(())
}
