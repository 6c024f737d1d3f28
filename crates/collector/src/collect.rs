//! Category directory collection

use crate::images::ImageIndex;
use crate::text::{read_lines, unescape_newlines};
use crate::warning::CollectWarning;
use crate::{CollectError, Result};
use regex_lite::Regex;
use report_model::{CollectorOptions, GraphItem, ImageSource, ReportSpec, Section};
use std::path::{Path, PathBuf};

/// A category directory and an optional explicit section title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySource {
    pub dir: PathBuf,
    /// Takes precedence over the title file
    pub title: Option<String>,
}

impl CategorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A collected report and the problems recovered from on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub report: ReportSpec,
    pub warnings: Vec<CollectWarning>,
}

/// Reads category directories into sections
pub struct Collector {
    options: CollectorOptions,
    pattern: Regex,
}

impl Collector {
    pub fn new(options: CollectorOptions) -> Result<Self> {
        Ok(Self {
            options,
            pattern: ImageIndex::pattern()?,
        })
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    /// Collect every subdirectory of `root` that has a names file
    ///
    /// Categories are ordered by directory name.
    pub fn collect_report(&self, root: &Path) -> Result<Collection> {
        if !root.is_dir() {
            return Err(CollectError::MissingDataRoot(root.to_path_buf()));
        }

        let entries = std::fs::read_dir(root).map_err(|e| CollectError::io(root, e))?;
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(&self.options.names_file).is_file())
            .collect();
        dirs.sort();

        tracing::debug!(root = %root.display(), categories = dirs.len(), "Scanned data root");

        let sources: Vec<CategorySource> = dirs.into_iter().map(CategorySource::new).collect();
        self.collect_categories(&sources)
    }

    /// Collect an explicit, ordered list of categories
    pub fn collect_categories(&self, sources: &[CategorySource]) -> Result<Collection> {
        let mut collection = Collection::default();
        for source in sources {
            let section = self.collect_category(source, &mut collection.warnings)?;
            collection.report.push(section);
        }

        tracing::info!(
            sections = collection.report.sections.len(),
            items = collection.report.item_count(),
            warnings = collection.warnings.len(),
            "Collected report"
        );

        Ok(collection)
    }

    /// Collect one category directory into a section
    pub fn collect_category(
        &self,
        source: &CategorySource,
        warnings: &mut Vec<CollectWarning>,
    ) -> Result<Section> {
        let dir = &source.dir;
        let names_path = dir.join(&self.options.names_file);
        if !names_path.is_file() {
            return Err(CollectError::MissingNamesFile(names_path));
        }

        let names = read_lines(&names_path)?;
        let comments_path = dir.join(&self.options.comments_file);
        let comments = if comments_path.is_file() {
            read_lines(&comments_path)?
        } else {
            push_warning(
                warnings,
                CollectWarning::MissingCommentsFile {
                    category: dir.clone(),
                    names: names.len(),
                },
            );
            Vec::new()
        };

        if comments_path.is_file() && names.len() != comments.len() {
            push_warning(
                warnings,
                CollectWarning::MalformedInputPair {
                    category: dir.clone(),
                    names: names.len(),
                    comments: comments.len(),
                },
            );
        }

        let images = ImageIndex::scan(dir, &self.pattern, &self.options)?;
        let mut section = Section::new(self.section_title(source)?);

        for (index, (name, comment)) in names.iter().zip(comments.iter()).enumerate() {
            let number = index + 1;
            let image = match images.get(number) {
                Some(path) => ImageSource::from_path(path),
                None => {
                    push_warning(
                        warnings,
                        CollectWarning::MissingSourceImage {
                            category: dir.clone(),
                            item: number,
                        },
                    );
                    ImageSource::NotFound
                }
            };
            section.push(GraphItem::new(image, self.unescape(name), self.unescape(comment)));
        }

        tracing::debug!(
            category = %dir.display(),
            title = %section.title,
            items = section.items.len(),
            "Collected category"
        );

        Ok(section)
    }

    fn section_title(&self, source: &CategorySource) -> Result<String> {
        if let Some(title) = &source.title {
            return Ok(title.clone());
        }

        let title_path = source.dir.join(&self.options.title_file);
        if !title_path.is_file() {
            return Ok(String::new());
        }

        let title = read_lines(&title_path)?
            .into_iter()
            .map(|line| line.trim().to_string())
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        Ok(self.unescape(&title))
    }

    fn unescape(&self, s: &str) -> String {
        if self.options.unescape_newlines {
            unescape_newlines(s)
        } else {
            s.to_string()
        }
    }
}

fn push_warning(warnings: &mut Vec<CollectWarning>, warning: CollectWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}
