//! Report Store - DOCX export and file I/O for audit reports
//!
//! This crate turns a [`report_model::ReportSpec`] into a landscape DOCX
//! document, persists it atomically, reads exported documents back for
//! inspection, and loads/saves exporter settings.

mod error;
mod file_io;
mod settings;
pub mod docx;

pub use error::*;
pub use file_io::*;
pub use settings::*;

// Re-export DOCX functionality
pub use docx::{
    check_destination, export_report, export_report_bytes, inspect_docx, inspect_docx_bytes,
    normalize_output_path, DocxError, DocxInspection, DocxResult, ExportSummary, ExportWarning,
    DEFAULT_EXTENSION,
};
