//! Table writer for DOCX files
//!
//! Generates the single-column w:tbl used to frame a picture and its caption.

use crate::docx::escape_xml;
use report_model::units::points_to_twips;

/// Writer for one-column, centered tables
pub struct TableWriter<'a> {
    style_id: &'a str,
    column_twips: i32,
}

impl<'a> TableWriter<'a> {
    /// Create a table writer for a column of the given width in points
    pub fn new(style_id: &'a str, column_width: f32) -> Self {
        Self {
            style_id,
            column_twips: points_to_twips(column_width),
        }
    }

    /// Write a table with one row per entry in `cells`
    ///
    /// Each entry is the inner XML of the cell and must contain at least one
    /// `w:p`.
    pub fn write_table(&self, xml: &mut String, cells: &[String]) {
        xml.push_str("<w:tbl>");
        self.write_table_properties(xml);
        self.write_table_grid(xml);

        for cell in cells {
            xml.push_str("<w:tr>");
            xml.push_str("<w:tc>");
            xml.push_str(&format!(
                r#"<w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>"#,
                self.column_twips
            ));
            xml.push_str(cell);
            xml.push_str("</w:tc>");
            xml.push_str("</w:tr>");
        }

        xml.push_str("</w:tbl>");
    }

    /// Write table properties
    fn write_table_properties(&self, xml: &mut String) {
        xml.push_str("<w:tblPr>");
        xml.push_str(&format!(
            r#"<w:tblStyle w:val="{}"/>"#,
            escape_xml(self.style_id)
        ));
        xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        xml.push_str(r#"<w:jc w:val="center"/>"#);
        xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
        xml.push_str("</w:tblPr>");
    }

    /// Write table grid
    fn write_table_grid(&self, xml: &mut String) {
        xml.push_str("<w:tblGrid>");
        xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, self.column_twips));
        xml.push_str("</w:tblGrid>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_row_table() {
        let mut xml = String::new();
        let writer = TableWriter::new("TableGrid", 500.0);
        writer.write_table(&mut xml, &["<w:p/>".to_string(), "<w:p/>".to_string()]);

        assert!(xml.starts_with("<w:tbl>"));
        assert!(xml.ends_with("</w:tbl>"));
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 2);
        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"<w:gridCol w:w="10000"/>"#));
    }
}
