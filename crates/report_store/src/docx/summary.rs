//! Export summary and non-fatal warnings

use crate::docx::media::ImageIssue;
use serde::Serialize;
use std::path::PathBuf;

/// A problem recovered from during export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportWarning {
    /// The item's picture was replaced by placeholder text
    MissingSourceImage {
        /// 1-based section number
        section: usize,
        /// 1-based item number within the section
        item: usize,
        path: Option<PathBuf>,
        reason: String,
    },
}

impl ExportWarning {
    pub(crate) fn missing_image(
        section: usize,
        item: usize,
        path: Option<PathBuf>,
        issue: &ImageIssue,
    ) -> Self {
        ExportWarning::MissingSourceImage {
            section,
            item,
            path,
            reason: issue.to_string(),
        }
    }
}

impl std::fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportWarning::MissingSourceImage {
                section,
                item,
                path,
                reason,
            } => match path {
                Some(path) => write!(f, "figure {}.{} ({}): {}", section, item, path.display(), reason),
                None => write!(f, "figure {}.{}: {}", section, item, reason),
            },
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub sections: usize,
    pub items: usize,
    /// Distinct image parts in the package
    pub images_embedded: usize,
    /// Items rendered with placeholder text instead of a picture
    pub placeholders: usize,
    pub warnings: Vec<ExportWarning>,
}

impl ExportSummary {
    /// Check whether every picture was embedded
    pub fn is_complete(&self) -> bool {
        self.placeholders == 0
    }
}
