//! Report Model - Report definition and document style types
//!
//! This crate provides the data shapes shared by the source collector and the
//! report exporter: the ordered sections of graph items, the positional
//! caption numbering, and the page/typography configuration applied to an
//! exported document.

mod error;
mod report;
pub mod caption;
pub mod style;
pub mod units;
pub mod options;

pub use error::*;
pub use report::*;
pub use caption::{caption, figure_caption};
pub use style::*;
pub use options::*;
