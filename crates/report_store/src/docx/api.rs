//! Public export entry points

use crate::docx::inspect::DocxInspection;
use crate::docx::summary::ExportSummary;
use crate::docx::writer::DocxWriter;
use crate::file_io::write_atomic;
use crate::{Result, StoreError};
use report_model::{DocumentStyleConfig, ReportSpec};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Extension appended to output paths that have none
pub const DEFAULT_EXTENSION: &str = "docx";

/// Append `.docx` when `path` has no extension
pub fn normalize_output_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => path.with_extension(DEFAULT_EXTENSION),
    }
}

/// Check that a document can be written at `path`
///
/// The parent directory must exist and `path` itself must not be a
/// directory. Nothing is created.
pub fn check_destination(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(StoreError::InvalidDestination(path.to_path_buf()));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(StoreError::MissingDestinationDirectory(parent.to_path_buf()))
        }
        _ => Ok(()),
    }
}

/// Render a report to DOCX bytes without touching the destination
pub fn export_report_bytes(
    report: &ReportSpec,
    style: &DocumentStyleConfig,
) -> Result<(Vec<u8>, ExportSummary)> {
    style.validate()?;

    let (cursor, summary) = DocxWriter::new(Cursor::new(Vec::new())).write(report, style)?;
    Ok((cursor.into_inner(), summary))
}

/// Export a report to a DOCX file at `path`
///
/// The document is rendered fully in memory first; the file at `path` is
/// only replaced once rendering succeeded. Missing or unreadable images do
/// not fail the export, they are reported in the returned summary.
pub fn export_report(
    report: &ReportSpec,
    style: &DocumentStyleConfig,
    path: &Path,
) -> Result<ExportSummary> {
    check_destination(path)?;

    let (bytes, summary) = export_report_bytes(report, style)?;
    write_atomic(path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        sections = summary.sections,
        items = summary.items,
        images = summary.images_embedded,
        placeholders = summary.placeholders,
        "Exported report"
    );

    Ok(summary)
}

/// Inspect a DOCX file on disk
pub fn inspect_docx(path: &Path) -> Result<DocxInspection> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    Ok(DocxInspection::from_reader(BufReader::new(file))?)
}

/// Inspect DOCX bytes
pub fn inspect_docx_bytes(bytes: &[u8]) -> Result<DocxInspection> {
    Ok(DocxInspection::from_reader(Cursor::new(bytes))?)
}
