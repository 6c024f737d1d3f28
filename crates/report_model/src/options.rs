//! Source collector options
//!
//! Describes the per-category directory layout the collector reads.

use serde::{Deserialize, Serialize};

/// File names and matching rules for category directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorOptions {
    /// One caption per line
    pub names_file: String,
    /// One comment per line, paired with the names file by line number
    pub comments_file: String,
    /// Optional section title (first non-empty line)
    pub title_file: String,
    /// Image extensions in order of preference
    pub image_extensions: Vec<String>,
    /// Turn literal `\n` sequences into line breaks
    pub unescape_newlines: bool,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            names_file: "names.txt".to_string(),
            comments_file: "comments.txt".to_string(),
            title_file: "title.txt".to_string(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "bmp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unescape_newlines: true,
        }
    }
}

impl CollectorOptions {
    /// Preference rank of an extension (lower wins), case-insensitive
    pub fn extension_rank(&self, extension: &str) -> Option<usize> {
        self.image_extensions
            .iter()
            .position(|e| e.eq_ignore_ascii_case(extension))
    }
}
