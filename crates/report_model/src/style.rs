//! Document style configuration
//!
//! A [`DocumentStyleConfig`] is built once (usually from settings) and handed
//! to the exporter by reference. It describes the page geometry, margins and
//! the default body typography of the exported document. The exporter reads
//! it and never mutates it.

use crate::error::{ModelError, Result};
use crate::units::cm_to_points;
use serde::{Deserialize, Serialize};

// =============================================================================
// Page Setup
// =============================================================================

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Value of the `w:orient` attribute
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page size in points with its orientation flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
    /// Orientation flag
    #[serde(default)]
    pub orientation: Orientation,
}

impl PageSetup {
    /// US Letter (8.5" x 11"), portrait
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            orientation: Orientation::Portrait,
        }
    }

    /// A4 (210mm x 297mm), portrait
    pub fn a4() -> Self {
        Self {
            width: 595.276,
            height: 841.89,
            orientation: Orientation::Portrait,
        }
    }

    /// Turn the page sideways: swap width and height, then set the flag
    ///
    /// A page that is already landscape keeps its dimensions.
    pub fn to_landscape(self) -> Self {
        if self.orientation == Orientation::Landscape {
            return self;
        }
        Self {
            width: self.height,
            height: self.width,
            orientation: Orientation::Landscape,
        }
    }

    /// Width available between the left and right margins
    pub fn usable_width(&self, margins: &PageMargins) -> f32 {
        self.width - margins.left - margins.right
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl PageMargins {
    /// Build margins from centimeter values
    pub fn from_cm(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top: cm_to_points(top),
            bottom: cm_to_points(bottom),
            left: cm_to_points(left),
            right: cm_to_points(right),
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::from_cm(1.5, 1.5, 2.0, 1.5)
    }
}

// =============================================================================
// Typography
// =============================================================================

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `w:jc` attribute
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Line spacing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineSpacing {
    /// Multiple of line height (1.0 = single)
    Multiple(f32),
    /// Exact spacing in points
    Exact(f32),
    /// At least this many points
    AtLeast(f32),
}

impl Default for LineSpacing {
    fn default() -> Self {
        LineSpacing::Multiple(1.0)
    }
}

/// Default body text formatting (document defaults and the Normal style)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTypography {
    /// Font family name
    pub font_family: String,
    /// Font size in points
    pub font_size: f32,
    /// First-line indent in points; `None` means no indent
    pub first_line_indent: Option<f32>,
    /// Space after each paragraph in points
    pub space_after: f32,
    /// Line spacing
    pub line_spacing: LineSpacing,
}

impl Default for BodyTypography {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            font_size: 14.0,
            first_line_indent: None,
            space_after: 8.0,
            line_spacing: LineSpacing::Multiple(1.0),
        }
    }
}

/// Formatting of section heading paragraphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStyle {
    pub bold: bool,
    pub alignment: Alignment,
    /// Space after the heading in points
    pub space_after: f32,
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            bold: true,
            alignment: Alignment::Center,
            space_after: 12.0,
        }
    }
}

// =============================================================================
// Document Style Configuration
// =============================================================================

/// Everything the exporter needs to know about page and text layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyleConfig {
    /// Base page size; the exporter always turns it to landscape
    pub page: PageSetup,
    /// Page margins
    pub margins: PageMargins,
    /// Default body typography
    pub body: BodyTypography,
    /// Section heading formatting
    pub heading: HeadingStyle,
    /// Pictures are `usable_width / image_width_divisor` wide
    pub image_width_divisor: f32,
    /// Optional label placed before caption numbers (e.g. "Fig.")
    pub figure_label: Option<String>,
    /// Text shown in place of a picture that cannot be embedded
    pub missing_image_text: String,
    /// Table style id for the picture/caption table
    pub table_style: String,
}

impl Default for DocumentStyleConfig {
    fn default() -> Self {
        Self {
            page: PageSetup::letter(),
            margins: PageMargins::default(),
            body: BodyTypography::default(),
            heading: HeadingStyle::default(),
            image_width_divisor: 1.4,
            figure_label: None,
            missing_image_text: "[image not found]".to_string(),
            table_style: "TableGrid".to_string(),
        }
    }
}

impl DocumentStyleConfig {
    /// Page geometry as written to the document (always landscape)
    pub fn effective_page(&self) -> PageSetup {
        self.page.to_landscape()
    }

    /// Usable width of the landscape page in points
    pub fn usable_width(&self) -> f32 {
        self.effective_page().usable_width(&self.margins)
    }

    /// Width of embedded pictures in points
    pub fn image_width(&self) -> f32 {
        self.usable_width() / self.image_width_divisor
    }

    /// Reject configurations that cannot produce a sensible layout
    pub fn validate(&self) -> Result<()> {
        if !(self.page.width > 0.0 && self.page.height > 0.0) {
            return Err(ModelError::InvalidStyle(format!(
                "page size must be positive, got {}x{}",
                self.page.width, self.page.height
            )));
        }

        let m = &self.margins;
        if [m.top, m.bottom, m.left, m.right].iter().any(|v| !(*v >= 0.0)) {
            return Err(ModelError::InvalidStyle("margins must not be negative".into()));
        }

        if self.usable_width() <= 0.0 {
            return Err(ModelError::InvalidStyle(
                "left and right margins leave no usable width".into(),
            ));
        }

        if !(self.image_width_divisor > 0.0) {
            return Err(ModelError::InvalidStyle(format!(
                "image width divisor must be positive, got {}",
                self.image_width_divisor
            )));
        }

        if !(self.body.font_size > 0.0) {
            return Err(ModelError::InvalidStyle(format!(
                "font size must be positive, got {}",
                self.body.font_size
            )));
        }

        if self.body.font_family.trim().is_empty() {
            return Err(ModelError::InvalidStyle("font family is empty".into()));
        }

        if self.table_style.trim().is_empty() {
            return Err(ModelError::InvalidStyle("table style id is empty".into()));
        }

        Ok(())
    }
}
