//! Report definition: sections of (image, caption, comment) items

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path string that marks an image the collector could not locate
pub const NOT_FOUND_SENTINEL: &str = "not found";

/// Where a graph item's picture comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PathBuf", into = "PathBuf")]
pub enum ImageSource {
    /// An image file on disk (may still turn out to be unreadable)
    File(PathBuf),
    /// The expected image was absent when the report was assembled
    NotFound,
}

impl ImageSource {
    /// Create a source from a path, mapping the sentinel to `NotFound`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::from(path.into())
    }

    /// Get the file path, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageSource::File(path) => Some(path),
            ImageSource::NotFound => None,
        }
    }

    /// Check whether this is the not-found sentinel
    pub fn is_not_found(&self) -> bool {
        matches!(self, ImageSource::NotFound)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == NOT_FOUND_SENTINEL {
            ImageSource::NotFound
        } else {
            ImageSource::File(path)
        }
    }
}

impl From<ImageSource> for PathBuf {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::File(path) => path,
            ImageSource::NotFound => PathBuf::from(NOT_FOUND_SENTINEL),
        }
    }
}

/// One picture with its caption and free-form comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphItem {
    /// Picture to embed
    pub image: ImageSource,
    /// Caption text without numbering
    pub caption: String,
    /// Comment rendered below the picture block
    #[serde(default)]
    pub comment: String,
}

impl GraphItem {
    /// Create a new graph item
    pub fn new(image: ImageSource, caption: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            image,
            caption: caption.into(),
            comment: comment.into(),
        }
    }

    /// Create an item backed by an image file
    pub fn with_file(
        path: impl Into<PathBuf>,
        caption: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(ImageSource::from_path(path), caption, comment)
    }

    /// Create an item whose image is missing
    pub fn not_found(caption: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::new(ImageSource::NotFound, caption, comment)
    }
}

/// A titled group of graph items followed by a page break
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text; empty means no heading is rendered
    #[serde(default)]
    pub title: String,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<GraphItem>,
}

impl Section {
    /// Create an empty section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Builder-style item append
    pub fn with_item(mut self, item: GraphItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append an item
    pub fn push(&mut self, item: GraphItem) {
        self.items.push(item);
    }

    /// Whether a heading paragraph is rendered for this section
    pub fn has_heading(&self) -> bool {
        !self.title.is_empty()
    }

    /// Items paired with their 1-based number
    pub fn numbered_items(&self) -> impl Iterator<Item = (usize, &GraphItem)> {
        self.items.iter().enumerate().map(|(i, item)| (i + 1, item))
    }
}

/// Ordered sections making up one export request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSpec {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ReportSpec {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style section append
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the report has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of items across all sections
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Sections paired with their 1-based number
    pub fn numbered_sections(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections.iter().enumerate().map(|(i, section)| (i + 1, section))
    }

    /// First non-empty section title, used as the document title
    pub fn document_title(&self) -> Option<&str> {
        self.sections
            .iter()
            .map(|s| s.title.as_str())
            .find(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_maps_to_not_found() {
        assert_eq!(ImageSource::from_path(NOT_FOUND_SENTINEL), ImageSource::NotFound);
        assert_eq!(
            ImageSource::from_path("graphs/1.png"),
            ImageSource::File(PathBuf::from("graphs/1.png"))
        );
    }

    #[test]
    fn test_json_boundary() {
        let json = r#"{
            "sections": [
                {
                    "title": "Electricity",
                    "items": [
                        {"image": "graphs/1.png", "caption": "Daily use", "comment": "Stable"},
                        {"image": "not found", "caption": "Peak"}
                    ]
                },
                {"items": []}
            ]
        }"#;

        let report: ReportSpec = serde_json::from_str(json).unwrap();
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.item_count(), 2);
        assert!(report.sections[0].items[1].image.is_not_found());
        assert_eq!(report.sections[0].items[1].comment, "");
        assert!(!report.sections[1].has_heading());

        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["sections"][0]["items"][1]["image"], "not found");
    }

    #[test]
    fn test_numbering_is_one_based() {
        let report = ReportSpec::new()
            .with_section(Section::new("A").with_item(GraphItem::not_found("x", "")))
            .with_section(Section::new("B"));

        let numbers: Vec<usize> = report.numbered_sections().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);

        let (_, first) = report.numbered_sections().next().unwrap();
        assert_eq!(first.numbered_items().next().map(|(n, _)| n), Some(1));
    }

    #[test]
    fn test_document_title_skips_empty() {
        let report = ReportSpec::new()
            .with_section(Section::new(""))
            .with_section(Section::new("Heat"));
        assert_eq!(report.document_title(), Some("Heat"));
        assert_eq!(ReportSpec::new().document_title(), None);
    }
}
