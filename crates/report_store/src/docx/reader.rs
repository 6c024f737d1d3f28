//! ZIP archive reading and XML parsing utilities

use crate::docx::error::{DocxError, DocxResult};
use quick_xml::events::BytesStart;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A wrapper around a ZIP archive for reading DOCX files
pub struct DocxReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> DocxReader<R> {
    /// Create a new DOCX reader from a source that implements Read + Seek
    pub fn new(reader: R) -> DocxResult<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read a file from the archive as a string
    pub fn read_file_as_string(&mut self, path: &str) -> DocxResult<String> {
        let mut file = self.archive.by_name(path).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                DocxError::MissingPart(path.to_string())
            } else {
                DocxError::from(e)
            }
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Check if a file exists in the archive
    pub fn file_exists(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Get a sorted list of all files in the archive
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Check if this is a valid DOCX file
    pub fn is_valid_docx(&self) -> bool {
        // Must have [Content_Types].xml and word/document.xml
        self.file_exists("[Content_Types].xml") && self.file_exists("word/document.xml")
    }
}

/// XML reader utilities for parsing DOCX XML content
pub struct XmlParser;

impl XmlParser {
    /// Create a new XML reader from a string
    ///
    /// Text is not trimmed so that `xml:space="preserve"` runs survive.
    pub fn from_string(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        reader
    }

    /// Get an attribute value from an event
    pub fn get_attribute(event: &BytesStart, name: &[u8]) -> Option<String> {
        event
            .attributes()
            .filter_map(|a| a.ok())
            .find(|a| a.key.as_ref() == name)
            .map(|a| String::from_utf8_lossy(&a.value).to_string())
    }

    /// Get a w: namespaced attribute (most common in DOCX)
    pub fn get_w_attribute(event: &BytesStart, name: &str) -> Option<String> {
        let key = format!("w:{}", name);
        Self::get_attribute(event, key.as_bytes())
            .or_else(|| Self::get_attribute(event, name.as_bytes()))
    }

    /// Check if an element name matches, ignoring any namespace prefix
    pub fn matches_element(name: &[u8], local: &str) -> bool {
        let local_part = match name.iter().position(|&b| b == b':') {
            Some(pos) => &name[pos + 1..],
            None => name,
        };
        local_part == local.as_bytes()
    }
}
