//! Media handling for DOCX files
//!
//! Loads image files, detects their format and pixel size, and registers each
//! distinct file once as a `word/media/imageN.<ext>` part with an image
//! relationship. Images that cannot be embedded are reported as an
//! [`ImageIssue`] so the caller can render a placeholder instead.

use crate::docx::relationship_types;
use crate::docx::relationships::Relationships;
use crate::docx::escape_xml;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons an image could not be embedded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageIssue {
    #[error("image was not found when the report was collected")]
    NotFound,

    #[error("image could not be read: {0}")]
    Unreadable(String),

    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("image dimensions could not be determined")]
    NoDimensions,
}

/// Image formats Word can display inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: 47 49 46 38
        if data.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
            return Self::Gif;
        }

        // BMP: 42 4D
        if data.starts_with(&[0x42, 0x4D]) {
            return Self::Bmp;
        }

        Self::Unknown
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Get the file extension used for the media part
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Unknown => "bin",
        }
    }

    /// Pixel dimensions read from the file header
    pub fn dimensions(&self, data: &[u8]) -> Option<(u32, u32)> {
        let (width, height) = match self {
            Self::Png => png_dimensions(data)?,
            Self::Jpeg => jpeg_dimensions(data)?,
            Self::Gif => gif_dimensions(data)?,
            Self::Bmp => bmp_dimensions(data)?,
            Self::Unknown => return None,
        };
        if width == 0 || height == 0 {
            return None;
        }
        Some((width, height))
    }
}

fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    // IHDR chunk: width at 16, height at 20
    if data.len() < 24 {
        return None;
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    Some((width, height))
}

fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        // Start-of-frame markers; C4, C8 and CC share the range but are not frames
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Some((width, height));
        }
        // Fill bytes and standalone markers carry no length
        if marker == 0xFF || marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            i += if marker == 0xFF { 1 } else { 2 };
            continue;
        }
        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + length;
    }
    None
}

fn gif_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 10 {
        return None;
    }
    let width = u16::from_le_bytes([data[6], data[7]]) as u32;
    let height = u16::from_le_bytes([data[8], data[9]]) as u32;
    Some((width, height))
}

fn bmp_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 26 {
        return None;
    }
    let width = i32::from_le_bytes([data[18], data[19], data[20], data[21]]);
    // Height is negative for top-down bitmaps
    let height = i32::from_le_bytes([data[22], data[23], data[24], data[25]]);
    Some((width.unsigned_abs(), height.unsigned_abs()))
}

/// A registered media part
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Part name inside the package (e.g. `word/media/image1.png`)
    pub part_name: String,
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

/// Reference to an embedded image, reused by every item that shows it
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Relationship id from document.xml.rels
    pub rel_id: String,
    /// Display name (source file name)
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl EmbeddedImage {
    /// Drawing extent in EMUs for a given display width, keeping aspect ratio
    pub fn extent_emu(&self, width_emu: i64) -> (i64, i64) {
        let height_emu =
            (width_emu as f64 * self.height_px as f64 / self.width_px as f64).round() as i64;
        (width_emu, height_emu)
    }
}

/// Collects media parts for one export
#[derive(Debug, Default)]
pub struct MediaRegistry {
    by_path: HashMap<PathBuf, EmbeddedImage>,
    files: Vec<MediaFile>,
}

impl MediaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed the image at `path`, or reuse it if it was embedded already
    pub fn embed(
        &mut self,
        path: &Path,
        doc_rels: &mut Relationships,
    ) -> Result<EmbeddedImage, ImageIssue> {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(existing) = self.by_path.get(&key) {
            return Ok(existing.clone());
        }

        let data = std::fs::read(path).map_err(|e| ImageIssue::Unreadable(e.to_string()))?;
        let format = ImageFormat::from_bytes(&data);
        if format == ImageFormat::Unknown {
            return Err(ImageIssue::UnsupportedFormat);
        }
        let (width_px, height_px) = format.dimensions(&data).ok_or(ImageIssue::NoDimensions)?;

        let file_name = format!("image{}.{}", self.files.len() + 1, format.extension());
        let rel_id = doc_rels.add(
            relationship_types::IMAGE,
            &format!("media/{}", file_name),
        );

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());

        let embedded = EmbeddedImage {
            rel_id,
            name,
            width_px,
            height_px,
        };

        self.files.push(MediaFile {
            part_name: format!("word/media/{}", file_name),
            format,
            data,
        });
        self.by_path.insert(key, embedded.clone());

        Ok(embedded)
    }

    /// Number of distinct media parts
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if nothing was embedded
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Take the collected media parts
    pub fn into_files(self) -> Vec<MediaFile> {
        self.files
    }
}

/// Generate a w:drawing element for an inline image
pub fn generate_inline_drawing(
    rel_id: &str,
    drawing_id: u32,
    width_emu: i64,
    height_emu: i64,
    name: &str,
) -> String {
    let name = escape_xml(name);
    format!(
        concat!(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="{id}" name="Picture {id}" descr="{name}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="{pic_ns}">"#,
            r#"<pic:pic xmlns:pic="{pic_ns}">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        ),
        cx = width_emu,
        cy = height_emu,
        id = drawing_id,
        name = name,
        rel = rel_id,
        pic_ns = crate::docx::namespaces::PIC,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::docx::relationships::create_document_rels;

    // 1x1 RGBA PNG
    pub(crate) const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    /// PNG header claiming the given size (enough for dimension probing)
    pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = TINY_PNG[..16].to_vec();
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&TINY_PNG[24..]);
        data
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_bytes(TINY_PNG), ImageFormat::Png);
        assert_eq!(ImageFormat::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_bytes(b"GIF89a"), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_bytes(b"<svg></svg>"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_bytes(b"ab"), ImageFormat::Unknown);
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(ImageFormat::Png.dimensions(TINY_PNG), Some((1, 1)));
        assert_eq!(ImageFormat::Png.dimensions(&png_header(1280, 480)), Some((1280, 480)));
        assert_eq!(ImageFormat::Png.dimensions(&TINY_PNG[..20]), None);
    }

    #[test]
    fn test_jpeg_dimensions() {
        // SOI, APP0 with 2-byte payload, SOF0 with 640x480
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01,
            0xE0, 0x02, 0x80, 0x03, 0x01, 0x22, 0x00,
        ];
        assert_eq!(ImageFormat::Jpeg.dimensions(&data), Some((640, 480)));
        assert_eq!(ImageFormat::Jpeg.dimensions(&[0xFF, 0xD8, 0xFF]), None);
    }

    #[test]
    fn test_gif_and_bmp_dimensions() {
        let gif = [b'G', b'I', b'F', b'8', b'9', b'a', 0x20, 0x00, 0x10, 0x00];
        assert_eq!(ImageFormat::Gif.dimensions(&gif), Some((32, 16)));

        let mut bmp = vec![0u8; 26];
        bmp[0] = b'B';
        bmp[1] = b'M';
        bmp[18..22].copy_from_slice(&10i32.to_le_bytes());
        bmp[22..26].copy_from_slice(&(-20i32).to_le_bytes());
        assert_eq!(ImageFormat::Bmp.dimensions(&bmp), Some((10, 20)));
    }

    #[test]
    fn test_embed_deduplicates_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");
        std::fs::write(&path, png_header(200, 100)).unwrap();

        let mut rels = create_document_rels();
        let mut registry = MediaRegistry::new();

        let first = registry.embed(&path, &mut rels).unwrap();
        let second = registry.embed(&path, &mut rels).unwrap();

        assert_eq!(first.rel_id, second.rel_id);
        assert_eq!(registry.len(), 1);
        assert_eq!(first.name, "1.png");
        assert_eq!(first.extent_emu(1000), (1000, 500));

        let files = registry.into_files();
        assert_eq!(files[0].part_name, "word/media/image1.png");
    }

    #[test]
    fn test_embed_issues() {
        let dir = tempfile::tempdir().unwrap();
        let mut rels = create_document_rels();
        let mut registry = MediaRegistry::new();

        let missing = registry.embed(&dir.path().join("nope.png"), &mut rels);
        assert!(matches!(missing, Err(ImageIssue::Unreadable(_))));

        let svg = dir.path().join("chart.svg");
        std::fs::write(&svg, "<svg width=\"10\" height=\"10\"></svg>").unwrap();
        assert_eq!(registry.embed(&svg, &mut rels).unwrap_err(), ImageIssue::UnsupportedFormat);

        let zero = dir.path().join("zero.png");
        std::fs::write(&zero, png_header(0, 10)).unwrap();
        assert_eq!(registry.embed(&zero, &mut rels).unwrap_err(), ImageIssue::NoDimensions);

        assert!(registry.is_empty());
        // Failed embeds must not leave dangling relationships
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_generate_inline_drawing() {
        let xml = generate_inline_drawing("rId3", 7, 914400, 457200, "a&b.png");
        assert!(xml.contains(r#"<wp:extent cx="914400" cy="457200"/>"#));
        assert!(xml.contains(r#"r:embed="rId3""#));
        assert!(xml.contains(r#"id="7""#));
        assert!(xml.contains("a&amp;b.png"));
    }
}
