//! Numbered image lookup

use crate::{CollectError, Result};
use regex_lite::Regex;
use report_model::CollectorOptions;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const IMAGE_NAME_PATTERN: &str = r"^(\d+)\.([A-Za-z0-9]+)$";

/// Images in a category directory keyed by their 1-based number
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    images: BTreeMap<usize, PathBuf>,
}

impl ImageIndex {
    /// Compile the pattern matching `N.ext` file names
    pub fn pattern() -> Result<Regex> {
        Regex::new(IMAGE_NAME_PATTERN).map_err(|e| CollectError::Pattern(e.to_string()))
    }

    /// Index the images in `dir`
    ///
    /// When several files share a number, the extension listed first in
    /// `options.image_extensions` wins. Files with other extensions are
    /// ignored.
    pub fn scan(dir: &Path, pattern: &Regex, options: &CollectorOptions) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| CollectError::io(dir, e))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        let mut ranked: BTreeMap<usize, (usize, PathBuf)> = BTreeMap::new();
        for name in names {
            let Some(captures) = pattern.captures(&name) else {
                continue;
            };
            let Ok(number) = captures[1].parse::<usize>() else {
                continue;
            };
            let Some(rank) = options.extension_rank(&captures[2]) else {
                continue;
            };

            let better = ranked.get(&number).map_or(true, |(best, _)| rank < *best);
            if better {
                ranked.insert(number, (rank, dir.join(&name)));
            }
        }

        Ok(Self {
            images: ranked.into_iter().map(|(n, (_, path))| (n, path)).collect(),
        })
    }

    /// Image for the 1-based item number
    pub fn get(&self, number: usize) -> Option<&Path> {
        self.images.get(&number).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scan(dir: &Path) -> ImageIndex {
        let pattern = ImageIndex::pattern().unwrap();
        ImageIndex::scan(dir, &pattern, &CollectorOptions::default()).unwrap()
    }

    #[test]
    fn test_matches_numbered_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1.png", "2.JPG", "10.bmp", "3.svg", "cover.png", "4.png.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("5.png")).unwrap();

        let index = scan(dir.path());
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(1), Some(dir.path().join("1.png").as_path()));
        assert_eq!(index.get(2), Some(dir.path().join("2.JPG").as_path()));
        assert_eq!(index.get(10), Some(dir.path().join("10.bmp").as_path()));
        assert_eq!(index.get(3), None);
        assert_eq!(index.get(5), None);
    }

    #[test]
    fn test_extension_preference() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1.gif", "1.jpg", "1.png", "2.jpeg", "2.bmp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let index = scan(dir.path());
        assert_eq!(index.get(1), Some(dir.path().join("1.png").as_path()));
        assert_eq!(index.get(2), Some(dir.path().join("2.jpeg").as_path()));
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1.png", "1.webp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let options = CollectorOptions {
            image_extensions: vec!["webp".into(), "png".into()],
            ..CollectorOptions::default()
        };

        let pattern = ImageIndex::pattern().unwrap();
        let index = ImageIndex::scan(dir.path(), &pattern, &options).unwrap();
        assert_eq!(index.get(1), Some(dir.path().join("1.webp").as_path()));
    }
}
