//! DOCX Export Module
//!
//! Writes a [`report_model::ReportSpec`] as a Microsoft Word DOCX file.
//! DOCX is based on the Office Open XML (OOXML) format defined in ECMA-376.
//!
//! ## Structure
//!
//! A DOCX file is a ZIP archive containing XML files:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `docProps/core.xml` - Title and timestamps
//! - `word/document.xml` - Main document content
//! - `word/styles.xml` - Style definitions
//! - `word/settings.xml` - Compatibility settings
//! - `word/_rels/document.xml.rels` - Document relationships
//! - `word/media/` - Embedded images
//!
//! ## Layout
//!
//! Each section becomes an optional centered heading followed by one
//! picture/caption table and one comment paragraph per item, closed by a
//! next-page section break.

mod error;
mod content_types;
mod relationships;
mod media;
mod document_writer;
mod styles_writer;
mod tables_writer;
mod summary;
mod writer;
mod reader;
mod inspect;
mod api;

pub use error::{DocxError, DocxResult};
pub use api::{
    check_destination, export_report, export_report_bytes, inspect_docx, inspect_docx_bytes,
    normalize_output_path, DEFAULT_EXTENSION,
};
pub use content_types::ContentTypes;
pub use relationships::{Relationship, Relationships};
pub use media::{ImageFormat, ImageIssue};
pub use summary::{ExportSummary, ExportWarning};
pub use writer::DocxWriter;
pub use inspect::DocxInspection;

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
    /// DrawingML namespace
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    /// WordprocessingML Drawing namespace
    pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
    /// Picture namespace
    pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
    /// Core properties namespace
    pub const CP: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// Check whether XML 1.0 can hold the character at all
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Escape special XML characters
///
/// Characters XML cannot represent (most C0 controls, U+FFFE, U+FFFF) are
/// dropped. `\r` is written as a character reference so parsers keep it.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#xD;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    escaped
}
