//! Bulk export and single-result download.
//!
//! Bulk export bundles every history entry into a zip archive, one file per
//! entry; if archiving fails the export degrades to a single JSON document
//! with the same information.

use crate::error::{DataExtractError, Result};
use crate::types::{HistoryEntry, OutputFormat};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Fallback export document.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "exportedAt")]
    exported_at: String,
    #[serde(rename = "totalEntries")]
    total_entries: usize,
    entries: &'a [HistoryEntry],
}

/// Name of the archive entry for the history entry at `index` (0-based).
fn entry_filename(index: usize, format: OutputFormat) -> String {
    format!("extraction_{}.{}", index + 1, format.extension())
}

fn export_basename() -> String {
    format!("dataextract_export_{}", Utc::now().timestamp_millis())
}

/// Bundle all history entries into a zip archive under `dir`.
///
/// The archive is named `dataextract_export_<timestamp>.zip`; entries are
/// named `extraction_<n>.<ext>` in history order (newest first).
///
/// # Errors
///
/// Returns `DataExtractError::Validation` for an empty history; archive
/// write failures surface as `Storage`.
pub fn export_history_zip(entries: &[HistoryEntry], dir: &Path) -> Result<PathBuf> {
    if entries.is_empty() {
        return Err(DataExtractError::validation("No data to export"));
    }

    let path = dir.join(format!("{}.zip", export_basename()));
    let file = std::fs::File::create(&path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (index, entry) in entries.iter().enumerate() {
        zip.start_file(entry_filename(index, entry.format), options)
            .map_err(|e| DataExtractError::storage_with_source("Failed to write archive entry", e))?;
        zip.write_all(entry.content.as_bytes())?;
    }

    zip.finish()
        .map_err(|e| DataExtractError::storage_with_source("Failed to finalize archive", e))?;

    tracing::info!(path = %path.display(), entries = entries.len(), "history exported as zip");
    Ok(path)
}

/// Fallback: export the history as one JSON document
/// (`{ exportedAt, totalEntries, entries }`).
pub fn export_history_json(entries: &[HistoryEntry], dir: &Path) -> Result<PathBuf> {
    if entries.is_empty() {
        return Err(DataExtractError::validation("No data to export"));
    }

    let document = ExportDocument {
        exported_at: Utc::now().to_rfc3339(),
        total_entries: entries.len(),
        entries,
    };

    let path = dir.join(format!("{}.json", export_basename()));
    std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;

    tracing::info!(path = %path.display(), entries = entries.len(), "history exported as json");
    Ok(path)
}

/// Export the history, preferring the zip archive and degrading to the JSON
/// document when archiving fails.
pub fn export_history(entries: &[HistoryEntry], dir: &Path) -> Result<PathBuf> {
    match export_history_zip(entries, dir) {
        Ok(path) => Ok(path),
        Err(err @ DataExtractError::Validation { .. }) => Err(err),
        Err(err) => {
            tracing::warn!(error = %err, "zip export failed, falling back to json");
            export_history_json(entries, dir)
        }
    }
}

/// File name for a single-result download: `extracted_data_<timestamp>.<ext>`.
pub fn download_filename(format: OutputFormat) -> String {
    format!(
        "extracted_data_{}.{}",
        Utc::now().timestamp_millis(),
        format.extension()
    )
}

/// Write the current editor content verbatim to a download file under `dir`.
pub fn write_download(content: &str, format: OutputFormat, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(download_filename(format));
    std::fs::write(&path, content)?;
    Ok(path)
}
