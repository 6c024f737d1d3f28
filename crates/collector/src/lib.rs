//! Collector - builds a report from category directories
//!
//! A category directory holds a `names.txt` with one caption per line, a
//! `comments.txt` with the matching comments, images named `1.png`,
//! `2.jpg`, ... and optionally a `title.txt`. Each directory becomes one
//! section of the resulting [`report_model::ReportSpec`].

mod error;
mod text;
mod images;
mod warning;
mod collect;

pub use error::*;
pub use text::{read_lines, unescape_newlines};
pub use images::ImageIndex;
pub use warning::CollectWarning;
pub use collect::{CategorySource, Collection, Collector};
