//! Read-back inspection of exported documents
//!
//! Walks `word/document.xml` and reports the text outline, the number of
//! section breaks and the page geometry. Used to verify exports and by the
//! CLI `inspect` command.

use crate::docx::content_types::ContentTypes;
use crate::docx::error::{DocxError, DocxResult};
use crate::docx::reader::{DocxReader, XmlParser};
use crate::docx::relationship_types;
use crate::docx::relationships::Relationships;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use std::io::{Read, Seek};

/// Outline of an exported DOCX
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocxInspection {
    /// Text of body-level paragraphs (headings and comments), in order
    ///
    /// Paragraphs that only carry a section break are left out.
    pub body_paragraphs: Vec<String>,
    /// Text of each table, one entry per cell paragraph
    pub tables: Vec<Vec<String>>,
    /// Section breaks placed in paragraph properties
    pub section_breaks: usize,
    /// Inline drawings in the body
    pub drawings: usize,
    /// Page width in twips, from the last section properties
    pub page_width: Option<u32>,
    /// Page height in twips, from the last section properties
    pub page_height: Option<u32>,
    /// Orientation flag from the last section properties
    pub orientation: Option<String>,
    /// Margins (top, right, bottom, left) in twips
    pub margins: Option<[i32; 4]>,
    /// Media parts in the package
    pub media_parts: Vec<String>,
    /// Image relationships in document.xml.rels
    pub image_relationships: usize,
}

impl DocxInspection {
    /// Read a package and inspect it
    pub fn from_reader<R: Read + Seek>(reader: R) -> DocxResult<Self> {
        let mut docx = DocxReader::new(reader)?;
        if !docx.is_valid_docx() {
            return Err(DocxError::InvalidStructure(
                "missing [Content_Types].xml or word/document.xml".into(),
            ));
        }

        let content_types = ContentTypes::parse(&docx.read_file_as_string("[Content_Types].xml")?)?;
        let document_xml = docx.read_file_as_string("word/document.xml")?;
        let mut inspection = Self::from_document_xml(&document_xml)?;

        inspection.media_parts = docx
            .file_names()
            .into_iter()
            .filter(|name| name.starts_with("word/media/"))
            .collect();

        for part in &inspection.media_parts {
            if content_types.get_content_type(part).is_none() {
                return Err(DocxError::InvalidStructure(format!(
                    "no content type for {}",
                    part
                )));
            }
        }

        if docx.file_exists("word/_rels/document.xml.rels") {
            let rels = Relationships::parse(&docx.read_file_as_string("word/_rels/document.xml.rels")?)?;
            inspection.image_relationships = rels.get_all_by_type(relationship_types::IMAGE).len();
        }

        Ok(inspection)
    }

    /// Inspect the content of a document.xml part
    pub fn from_document_xml(content: &str) -> DocxResult<Self> {
        let mut result = Self::default();
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();

        let mut table_depth = 0usize;
        let mut in_paragraph_props = false;
        let mut in_text = false;
        let mut paragraph: Option<String> = None;
        let mut paragraph_is_break = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"w:tbl" => {
                        table_depth += 1;
                        result.tables.push(Vec::new());
                    }
                    b"w:p" => {
                        paragraph = Some(String::new());
                        paragraph_is_break = false;
                    }
                    b"w:pPr" => in_paragraph_props = true,
                    b"w:t" => in_text = true,
                    b"w:drawing" => result.drawings += 1,
                    b"w:sectPr" => {
                        if in_paragraph_props {
                            result.section_breaks += 1;
                            paragraph_is_break = true;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"w:p" => {
                        if table_depth > 0 {
                            if let Some(cells) = result.tables.last_mut() {
                                cells.push(String::new());
                            }
                        } else {
                            result.body_paragraphs.push(String::new());
                        }
                    }
                    b"w:br" => push_text(&mut paragraph, "\n"),
                    b"w:tab" => push_text(&mut paragraph, "\t"),
                    b"w:pgSz" => read_page_size(&mut result, e),
                    b"w:pgMar" => read_margins(&mut result, e),
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        let text = e.unescape()?;
                        push_text(&mut paragraph, &text);
                    }
                }
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                    b"w:pPr" => in_paragraph_props = false,
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if let Some(text) = paragraph.take() {
                            if table_depth > 0 {
                                if let Some(cells) = result.tables.last_mut() {
                                    cells.push(text);
                                }
                            } else if !paragraph_is_break {
                                result.body_paragraphs.push(text);
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::from(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(result)
    }

    /// Captions are the last cell of each figure table
    pub fn captions(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter_map(|cells| cells.last().map(String::as_str))
            .collect()
    }

    /// Check whether the page is landscape
    pub fn is_landscape(&self) -> bool {
        self.orientation.as_deref() == Some("landscape")
    }
}

fn push_text(paragraph: &mut Option<String>, text: &str) {
    if let Some(p) = paragraph.as_mut() {
        p.push_str(text);
    }
}

fn read_page_size(result: &mut DocxInspection, e: &BytesStart) {
    result.page_width = XmlParser::get_w_attribute(e, "w").and_then(|v| v.parse().ok());
    result.page_height = XmlParser::get_w_attribute(e, "h").and_then(|v| v.parse().ok());
    result.orientation = XmlParser::get_w_attribute(e, "orient");
}

fn read_margins(result: &mut DocxInspection, e: &BytesStart) {
    let get = |name: &str| XmlParser::get_w_attribute(e, name).and_then(|v| v.parse::<i32>().ok());
    if let (Some(top), Some(right), Some(bottom), Some(left)) =
        (get("top"), get("right"), get("bottom"), get("left"))
    {
        result.margins = Some([top, right, bottom, left]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_document_xml() {
        let xml = concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>"#,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>[image]</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>1.1. Gas</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"<w:p><w:r><w:t>line one</w:t><w:br/><w:t xml:space="preserve"> &amp; two</w:t></w:r></w:p>"#,
            r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="15840" w:h="12240" w:orient="landscape"/></w:sectPr></w:pPr></w:p>"#,
            r#"<w:sectPr><w:pgSz w:w="15840" w:h="12240" w:orient="landscape"/>"#,
            r#"<w:pgMar w:top="850" w:right="850" w:bottom="850" w:left="1134"/></w:sectPr>"#,
            r#"</w:body></w:document>"#,
        );

        let inspection = DocxInspection::from_document_xml(xml).unwrap();
        assert_eq!(inspection.body_paragraphs, vec!["Title", "line one\n & two"]);
        assert_eq!(inspection.tables, vec![vec!["[image]".to_string(), "1.1. Gas".to_string()]]);
        assert_eq!(inspection.captions(), vec!["1.1. Gas"]);
        assert_eq!(inspection.section_breaks, 1);
        assert_eq!(inspection.page_width, Some(15840));
        assert!(inspection.is_landscape());
        assert_eq!(inspection.margins, Some([850, 850, 850, 1134]));
    }
}
