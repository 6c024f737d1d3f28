//! Document.xml writer
//!
//! Converts a ReportSpec to DOCX document.xml format. The body is built
//! append-only: a section is finished (closed by its section break) before
//! the next one starts.

use crate::docx::media::{generate_inline_drawing, ImageIssue, MediaFile, MediaRegistry};
use crate::docx::relationships::Relationships;
use crate::docx::summary::{ExportSummary, ExportWarning};
use crate::docx::tables_writer::TableWriter;
use crate::docx::{escape_xml, namespaces};
use report_model::units::{points_to_emu, points_to_twips};
use report_model::{
    figure_caption, Alignment, DocumentStyleConfig, GraphItem, ImageSource, PageSetup,
    ReportSpec, Section,
};

/// Direct paragraph formatting used by the report layout
#[derive(Debug, Clone, Copy, Default)]
struct ParagraphFormat {
    alignment: Option<Alignment>,
    space_after: Option<f32>,
    bold: bool,
}

impl ParagraphFormat {
    fn aligned(alignment: Alignment) -> Self {
        Self {
            alignment: Some(alignment),
            ..Self::default()
        }
    }
}

/// Writer for document.xml
pub struct DocumentWriter<'a> {
    style: &'a DocumentStyleConfig,
    page: PageSetup,
    media: MediaRegistry,
    summary: ExportSummary,
    next_drawing_id: u32,
}

impl<'a> DocumentWriter<'a> {
    /// Create a new document writer for the given style
    pub fn new(style: &'a DocumentStyleConfig) -> Self {
        Self {
            style,
            page: style.effective_page(),
            media: MediaRegistry::new(),
            summary: ExportSummary::default(),
            next_drawing_id: 1,
        }
    }

    /// Generate document.xml content
    ///
    /// Image relationships are added to `doc_rels` as pictures are embedded.
    pub fn write(&mut self, report: &ReportSpec, doc_rels: &mut Relationships) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::A,
        ));
        xml.push_str("<w:body>");

        for (section_number, section) in report.numbered_sections() {
            self.write_section(&mut xml, section_number, section, doc_rels);
        }

        // Final section properties for the trailing (empty) section
        xml.push_str(&self.section_properties());

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");

        xml
    }

    /// Take the embedded media and the export summary
    pub fn finish(mut self) -> (Vec<MediaFile>, ExportSummary) {
        self.summary.images_embedded = self.media.len();
        (self.media.into_files(), self.summary)
    }

    fn write_section(
        &mut self,
        xml: &mut String,
        section_number: usize,
        section: &Section,
        doc_rels: &mut Relationships,
    ) {
        tracing::debug!(
            section = section_number,
            items = section.items.len(),
            title = %section.title,
            "Writing section"
        );

        if section.has_heading() {
            let heading = &self.style.heading;
            let format = ParagraphFormat {
                alignment: Some(heading.alignment),
                space_after: Some(heading.space_after),
                bold: heading.bold,
            };
            write_paragraph(xml, &format, &section.title);
        }

        for (item_number, item) in section.numbered_items() {
            self.write_item(xml, section_number, item_number, item, doc_rels);
        }

        // Every section ends on its own page, even when it has no items
        xml.push_str("<w:p><w:pPr>");
        xml.push_str(&self.section_properties());
        xml.push_str("</w:pPr></w:p>");

        self.summary.sections += 1;
    }

    /// Write the picture/caption table followed by the comment paragraph
    fn write_item(
        &mut self,
        xml: &mut String,
        section_number: usize,
        item_number: usize,
        item: &GraphItem,
        doc_rels: &mut Relationships,
    ) {
        let picture_cell = self.picture_cell(section_number, item_number, &item.image, doc_rels);

        let caption = figure_caption(
            self.style.figure_label.as_deref(),
            section_number,
            item_number,
            &item.caption,
        );
        let mut caption_cell = String::new();
        write_paragraph(&mut caption_cell, &ParagraphFormat::aligned(Alignment::Center), &caption);

        TableWriter::new(&self.style.table_style, self.style.usable_width())
            .write_table(xml, &[picture_cell, caption_cell]);

        write_paragraph(xml, &ParagraphFormat::aligned(Alignment::Left), &item.comment);

        self.summary.items += 1;
    }

    /// Cell content holding the drawing, or placeholder text if the image
    /// cannot be embedded
    fn picture_cell(
        &mut self,
        section_number: usize,
        item_number: usize,
        image: &ImageSource,
        doc_rels: &mut Relationships,
    ) -> String {
        let embedded = match image {
            ImageSource::File(path) => self.media.embed(path, doc_rels),
            ImageSource::NotFound => Err(ImageIssue::NotFound),
        };

        let mut cell = String::new();
        match embedded {
            Ok(image) => {
                let (cx, cy) = image.extent_emu(points_to_emu(self.style.image_width()));
                let drawing =
                    generate_inline_drawing(&image.rel_id, self.next_drawing_id, cx, cy, &image.name);
                self.next_drawing_id += 1;

                cell.push_str("<w:p>");
                write_paragraph_properties(&mut cell, &ParagraphFormat::aligned(Alignment::Center));
                cell.push_str("<w:r>");
                cell.push_str(&drawing);
                cell.push_str("</w:r>");
                cell.push_str("</w:p>");
            }
            Err(issue) => {
                let path = image.path().map(|p| p.to_path_buf());
                tracing::warn!(
                    section = section_number,
                    item = item_number,
                    path = ?path,
                    "Using placeholder for image: {}",
                    issue
                );
                self.summary.placeholders += 1;
                self.summary.warnings.push(ExportWarning::missing_image(
                    section_number,
                    item_number,
                    path,
                    &issue,
                ));
                write_paragraph(
                    &mut cell,
                    &ParagraphFormat::aligned(Alignment::Center),
                    &self.style.missing_image_text,
                );
            }
        }
        cell
    }

    /// w:sectPr for a landscape, next-page section
    fn section_properties(&self) -> String {
        let page = &self.page;
        let margins = &self.style.margins;
        format!(
            concat!(
                "<w:sectPr>",
                r#"<w:type w:val="nextPage"/>"#,
                r#"<w:pgSz w:w="{}" w:h="{}" w:orient="{}"/>"#,
                r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
                r#"<w:cols w:space="720"/>"#,
                "</w:sectPr>",
            ),
            points_to_twips(page.width),
            points_to_twips(page.height),
            page.orientation.ooxml_value(),
            points_to_twips(margins.top),
            points_to_twips(margins.right),
            points_to_twips(margins.bottom),
            points_to_twips(margins.left),
        )
    }
}

/// Write a paragraph with a single run of text
fn write_paragraph(xml: &mut String, format: &ParagraphFormat, text: &str) {
    xml.push_str("<w:p>");
    write_paragraph_properties(xml, format);
    if !text.is_empty() {
        write_run(xml, text, format.bold);
    }
    xml.push_str("</w:p>");
}

/// Write paragraph properties
fn write_paragraph_properties(xml: &mut String, format: &ParagraphFormat) {
    if format.alignment.is_none() && format.space_after.is_none() {
        return;
    }

    xml.push_str("<w:pPr>");

    // Spacing precedes justification in CT_PPr
    if let Some(after) = format.space_after {
        xml.push_str(&format!(r#"<w:spacing w:after="{}"/>"#, points_to_twips(after)));
    }

    if let Some(alignment) = format.alignment {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.ooxml_value()));
    }

    xml.push_str("</w:pPr>");
}

/// Write a run element, turning `\n` into line breaks and `\t` into tabs
fn write_run(xml: &mut String, text: &str, bold: bool) {
    xml.push_str("<w:r>");

    if bold {
        xml.push_str("<w:rPr><w:b/><w:bCs/></w:rPr>");
    }

    for (line_index, line) in text.split('\n').enumerate() {
        if line_index > 0 {
            xml.push_str("<w:br/>");
        }
        for (tab_index, segment) in line.split('\t').enumerate() {
            if tab_index > 0 {
                xml.push_str("<w:tab/>");
            }
            let escaped = escape_xml(segment);
            if escaped.is_empty() {
                continue;
            }
            // Keep leading/trailing spaces
            if escaped.starts_with(' ') || escaped.ends_with(' ') {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
            } else {
                xml.push_str("<w:t>");
            }
            xml.push_str(&escaped);
            xml.push_str("</w:t>");
        }
    }

    xml.push_str("</w:r>");
}
