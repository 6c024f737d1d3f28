//! DOCX Writer Infrastructure
//!
//! Creates ZIP archives with correct DOCX structure.

use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::styles_writer::StylesWriter;
use crate::docx::summary::ExportSummary;
use crate::docx::{escape_xml, namespaces};
use chrono::{DateTime, Utc};
use report_model::{DocumentStyleConfig, ReportSpec};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Creator recorded in the core properties
const CREATOR: &str = "energy-report";

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
    created: DateTime<Utc>,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
            created: Utc::now(),
        }
    }

    /// Override the creation timestamp written to docProps/core.xml
    pub fn with_timestamp(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Write a complete DOCX package for a report
    ///
    /// Returns the underlying writer and what was written.
    pub fn write(
        mut self,
        report: &ReportSpec,
        style: &DocumentStyleConfig,
    ) -> DocxResult<(W, ExportSummary)> {
        // Build document.xml first; it registers image relationships
        let mut document_writer = DocumentWriter::new(style);
        let doc_xml = document_writer.write(report, &mut self.doc_rels);
        let (media, summary) = document_writer.finish();

        self.write_file("word/document.xml", &doc_xml)?;

        let styles_xml = StylesWriter::new(style).write();
        self.write_file("word/styles.xml", &styles_xml)?;

        self.write_file("word/settings.xml", &generate_settings_xml())?;

        let core_xml = generate_core_xml(report.document_title(), &self.created);
        self.write_file("docProps/core.xml", &core_xml)?;

        // Write media files (images)
        for file in &media {
            self.content_types
                .add_default(file.format.extension(), file.format.mime_type());
            self.write_binary(&file.part_name, &file.data)?;
        }

        // Write relationships
        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // Write [Content_Types].xml last
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        // Finish the ZIP archive
        let inner = self.zip.finish()?;

        Ok((inner, summary))
    }

    /// Write a file to the ZIP archive
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options = entry_options().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Write binary data to the ZIP archive
    fn write_binary(&mut self, path: &str, data: &[u8]) -> DocxResult<()> {
        let options = entry_options().compression_method(zip::CompressionMethod::Stored); // Don't compress binary

        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;

        Ok(())
    }
}

/// Entry options with a fixed modification time so identical input gives
/// identical archives
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().last_modified_time(zip::DateTime::default())
}

/// Generate a minimal settings.xml
pub fn generate_settings_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:settings xmlns:w="{}">"#,
            r#"<w:defaultTabStop w:val="720"/>"#,
            r#"<w:characterSpacingControl w:val="doNotCompress"/>"#,
            "<w:compat>",
            r#"<w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>"#,
            "</w:compat>",
            "</w:settings>",
        ),
        namespaces::W
    )
}

/// Generate docProps/core.xml
pub fn generate_core_xml(title: Option<&str>, created: &DateTime<Utc>) -> String {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        concat!(
            r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
            r#"xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        ),
        namespaces::CP
    ));
    if let Some(title) = title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", CREATOR));
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        timestamp
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        timestamp
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::reader::DocxReader;
    use chrono::TimeZone;
    use report_model::{GraphItem, Section};
    use std::io::Cursor;

    #[test]
    fn test_package_parts() {
        let report = ReportSpec::new()
            .with_section(Section::new("Energy").with_item(GraphItem::not_found("A", "B")));
        let style = DocumentStyleConfig::default();

        let (cursor, summary) = DocxWriter::new(Cursor::new(Vec::new()))
            .write(&report, &style)
            .unwrap();
        assert_eq!(summary.items, 1);

        let reader = DocxReader::new(Cursor::new(cursor.into_inner())).unwrap();
        assert!(reader.is_valid_docx());
        for part in [
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/settings.xml",
            "docProps/core.xml",
        ] {
            assert!(reader.file_exists(part), "missing {}", part);
        }
    }

    #[test]
    fn test_pinned_timestamp_is_reproducible() {
        let report = ReportSpec::new()
            .with_section(Section::new("Gas").with_item(GraphItem::not_found("Boiler", "Old")));
        let style = DocumentStyleConfig::default();
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let write = || {
            DocxWriter::new(Cursor::new(Vec::new()))
                .with_timestamp(created)
                .write(&report, &style)
                .unwrap()
                .0
                .into_inner()
        };
        assert_eq!(write(), write());
    }

    #[test]
    fn test_generate_settings() {
        let settings = generate_settings_xml();
        assert!(settings.contains("w:settings"));
        assert!(settings.contains("compatibilityMode"));
    }

    #[test]
    fn test_core_xml() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let xml = generate_core_xml(Some("Gas & Water"), &created);

        assert!(xml.contains("<dc:title>Gas &amp; Water</dc:title>"));
        assert!(xml.contains("2024-03-01T12:30:00Z"));

        let untitled = generate_core_xml(None, &created);
        assert!(!untitled.contains("dc:title"));
    }
}
