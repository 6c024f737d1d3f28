//! Non-fatal collection problems

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A problem that did not stop collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectWarning {
    /// No image file for the item; it is kept with a missing image
    MissingSourceImage {
        category: PathBuf,
        /// 1-based item number
        item: usize,
    },
    /// Names and comments have different line counts; the longer list was
    /// truncated
    MalformedInputPair {
        category: PathBuf,
        names: usize,
        comments: usize,
    },
    /// The comments file is absent so no items were produced
    MissingCommentsFile { category: PathBuf, names: usize },
}

impl fmt::Display for CollectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectWarning::MissingSourceImage { category, item } => {
                write!(f, "{}: no image for item {}", category.display(), item)
            }
            CollectWarning::MalformedInputPair {
                category,
                names,
                comments,
            } => write!(
                f,
                "{}: {} names but {} comments, using the first {}",
                category.display(),
                names,
                comments,
                names.min(comments)
            ),
            CollectWarning::MissingCommentsFile { category, names } => write!(
                f,
                "{}: comments file missing, {} names skipped",
                category.display(),
                names
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = CollectWarning::MalformedInputPair {
            category: PathBuf::from("data/gas"),
            names: 3,
            comments: 2,
        };
        assert_eq!(warning.to_string(), "data/gas: 3 names but 2 comments, using the first 2");
    }
}
