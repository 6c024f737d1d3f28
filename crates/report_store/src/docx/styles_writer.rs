//! Styles.xml writer
//!
//! Generates styles.xml from the document style configuration: document
//! defaults, the Normal paragraph style and the table styles used by the
//! picture blocks.

use crate::docx::{escape_xml, namespaces};
use report_model::units::{multiple_to_line_units, points_to_half_points, points_to_twips};
use report_model::{BodyTypography, DocumentStyleConfig, LineSpacing};

/// Writer for styles.xml
pub struct StylesWriter<'a> {
    style: &'a DocumentStyleConfig,
}

impl<'a> StylesWriter<'a> {
    /// Create a new styles writer
    pub fn new(style: &'a DocumentStyleConfig) -> Self {
        Self { style }
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        let body = &self.style.body;
        self.write_doc_defaults(&mut xml, body);
        self.write_normal_style(&mut xml, body);
        self.write_table_styles(&mut xml);

        xml.push_str("</w:styles>");
        xml
    }

    /// Write document defaults
    fn write_doc_defaults(&self, xml: &mut String, body: &BodyTypography) {
        xml.push_str("<w:docDefaults>");

        xml.push_str("<w:rPrDefault>");
        write_run_properties(xml, body);
        xml.push_str("</w:rPrDefault>");

        xml.push_str("<w:pPrDefault>");
        write_paragraph_properties(xml, body);
        xml.push_str("</w:pPrDefault>");

        xml.push_str("</w:docDefaults>");
    }

    /// Write the default paragraph style
    fn write_normal_style(&self, xml: &mut String, body: &BodyTypography) {
        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/>"#);
        xml.push_str("<w:qFormat/>");
        write_paragraph_properties(xml, body);
        write_run_properties(xml, body);
        xml.push_str("</w:style>");
    }

    /// Write "Normal Table" and the bordered grid style used for figures
    fn write_table_styles(&self, xml: &mut String) {
        xml.push_str(r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal">"#);
        xml.push_str(r#"<w:name w:val="Normal Table"/>"#);
        xml.push_str(r#"<w:uiPriority w:val="99"/>"#);
        xml.push_str("<w:semiHidden/>");
        xml.push_str("<w:unhideWhenUsed/>");
        xml.push_str("<w:tblPr>");
        xml.push_str(r#"<w:tblInd w:w="0" w:type="dxa"/>"#);
        xml.push_str("<w:tblCellMar>");
        xml.push_str(r#"<w:top w:w="0" w:type="dxa"/>"#);
        xml.push_str(r#"<w:left w:w="108" w:type="dxa"/>"#);
        xml.push_str(r#"<w:bottom w:w="0" w:type="dxa"/>"#);
        xml.push_str(r#"<w:right w:w="108" w:type="dxa"/>"#);
        xml.push_str("</w:tblCellMar>");
        xml.push_str("</w:tblPr>");
        xml.push_str("</w:style>");

        let style_id = escape_xml(&self.style.table_style);
        xml.push_str(&format!(
            r#"<w:style w:type="table" w:styleId="{}">"#,
            style_id
        ));
        let name = if self.style.table_style == "TableGrid" {
            "Table Grid".to_string()
        } else {
            style_id.clone()
        };
        xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, name));
        xml.push_str(r#"<w:basedOn w:val="TableNormal"/>"#);
        xml.push_str(r#"<w:uiPriority w:val="59"/>"#);
        xml.push_str("<w:pPr>");
        xml.push_str(r#"<w:spacing w:after="0" w:line="240" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr>");
        xml.push_str("<w:tblPr>");
        xml.push_str("<w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            xml.push_str(&format!(
                r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
                edge
            ));
        }
        xml.push_str("</w:tblBorders>");
        xml.push_str("</w:tblPr>");
        xml.push_str("</w:style>");
    }
}

/// Write run properties for the body font
fn write_run_properties(xml: &mut String, body: &BodyTypography) {
    let font = escape_xml(&body.font_family);
    let half_pts = points_to_half_points(body.font_size);

    xml.push_str("<w:rPr>");
    xml.push_str(&format!(
        r#"<w:rFonts w:ascii="{0}" w:eastAsia="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
        font
    ));
    xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half_pts));
    xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, half_pts));
    xml.push_str("</w:rPr>");
}

/// Write paragraph properties for body spacing and indentation
fn write_paragraph_properties(xml: &mut String, body: &BodyTypography) {
    xml.push_str("<w:pPr>");

    xml.push_str(&format!(
        r#"<w:spacing w:after="{}""#,
        points_to_twips(body.space_after)
    ));
    match body.line_spacing {
        LineSpacing::Multiple(mult) => {
            xml.push_str(&format!(
                r#" w:line="{}" w:lineRule="auto""#,
                multiple_to_line_units(mult)
            ));
        }
        LineSpacing::Exact(pts) => {
            xml.push_str(&format!(r#" w:line="{}" w:lineRule="exact""#, points_to_twips(pts)));
        }
        LineSpacing::AtLeast(pts) => {
            xml.push_str(&format!(r#" w:line="{}" w:lineRule="atLeast""#, points_to_twips(pts)));
        }
    }
    xml.push_str("/>");

    if let Some(first) = body.first_line_indent {
        if first >= 0.0 {
            xml.push_str(&format!(r#"<w:ind w:firstLine="{}"/>"#, points_to_twips(first)));
        } else {
            xml.push_str(&format!(r#"<w:ind w:hanging="{}"/>"#, points_to_twips(-first)));
        }
    }

    xml.push_str("</w:pPr>");
}
