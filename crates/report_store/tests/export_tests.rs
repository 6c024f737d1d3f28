//! Integration tests for DOCX export
//!
//! Exports reports to disk, reads them back and checks pagination, caption
//! numbering, placeholder handling and the default page geometry.

use quick_xml::events::Event;
use report_model::{DocumentStyleConfig, GraphItem, ImageSource, ReportSpec, Section};
use report_store::{
    export_report, export_report_bytes, inspect_docx, inspect_docx_bytes, ExportWarning,
    StoreError, DEFAULT_EXTENSION,
};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

// 1x1 RGBA PNG
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, TINY_PNG).unwrap();
    path
}

fn section(title: &str, captions: &[&str]) -> Section {
    captions.iter().fold(Section::new(title), |section, caption| {
        section.with_item(GraphItem::not_found(*caption, format!("{} comment", caption)))
    })
}

#[test]
fn one_page_break_per_section() {
    let dir = tempfile::tempdir().unwrap();
    let report = ReportSpec::new()
        .with_section(section("Electricity", &["Load", "Peak", "Night"]))
        .with_section(section("Empty", &[]))
        .with_section(section("Gas", &["Boiler"]));

    let path = dir.path().join("report.docx");
    let summary = export_report(&report, &DocumentStyleConfig::default(), &path).unwrap();
    assert_eq!(summary.sections, 3);
    assert_eq!(summary.items, 4);

    let inspection = inspect_docx(&path).unwrap();
    assert_eq!(inspection.section_breaks, 3);
}

#[test]
fn captions_follow_position() {
    let dir = tempfile::tempdir().unwrap();
    let first = section("First", &["A"]);
    let second = section("Second", &["B", "C", "D"]);
    let style = DocumentStyleConfig::default();

    let path = dir.path().join("ordered.docx");
    let report = ReportSpec::new()
        .with_section(first.clone())
        .with_section(second.clone());
    export_report(&report, &style, &path).unwrap();
    assert_eq!(
        inspect_docx(&path).unwrap().captions(),
        vec!["1.1. A", "2.1. B", "2.2. C", "2.3. D"]
    );

    let swapped_path = dir.path().join("swapped.docx");
    let swapped = ReportSpec::new().with_section(second).with_section(first);
    export_report(&swapped, &style, &swapped_path).unwrap();
    assert_eq!(
        inspect_docx(&swapped_path).unwrap().captions(),
        vec!["1.1. B", "1.2. C", "1.3. D", "2.1. A"]
    );
}

#[test]
fn missing_images_keep_their_block() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "1.png");
    let missing = dir.path().join("2.png");

    let report = ReportSpec::new().with_section(
        Section::new("Water")
            .with_item(GraphItem::with_file(&image, "Meter", "Reading"))
            .with_item(GraphItem::new(ImageSource::NotFound, "Pump", "No photo"))
            .with_item(GraphItem::with_file(&missing, "Valve", "Deleted")),
    );

    let path = dir.path().join("water.docx");
    let summary = export_report(&report, &DocumentStyleConfig::default(), &path).unwrap();
    assert_eq!(summary.items, 3);
    assert_eq!(summary.images_embedded, 1);
    assert_eq!(summary.placeholders, 2);
    assert!(!summary.is_complete());
    assert!(matches!(
        &summary.warnings[1],
        ExportWarning::MissingSourceImage { section: 1, item: 3, path: Some(p), .. } if p == &missing
    ));

    let inspection = inspect_docx(&path).unwrap();
    assert_eq!(inspection.captions(), vec!["1.1. Meter", "1.2. Pump", "1.3. Valve"]);
    assert_eq!(
        inspection.body_paragraphs,
        vec!["Water", "Reading", "No photo", "Deleted"]
    );
    assert_eq!(inspection.drawings, 1);
    assert_eq!(inspection.media_parts, vec!["word/media/image1.png"]);
    assert_eq!(inspection.image_relationships, 1);
    assert_eq!(inspection.tables[1][0], "[image not found]");
}

#[test]
fn repeated_exports_have_identical_text() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "1.png");
    let report = ReportSpec::new()
        .with_section(
            Section::new("Heat").with_item(GraphItem::with_file(&image, "Radiators", "Line 1\nLine 2")),
        )
        .with_section(section("Lighting", &["Hall"]));
    let style = DocumentStyleConfig::default();

    let a = dir.path().join("a.docx");
    let b = dir.path().join("b.docx");
    let summary_a = export_report(&report, &style, &a).unwrap();
    let summary_b = export_report(&report, &style, &b).unwrap();

    assert_eq!(summary_a, summary_b);
    assert_eq!(inspect_docx(&a).unwrap(), inspect_docx(&b).unwrap());
    assert_eq!(
        inspect_docx(&a).unwrap().body_paragraphs,
        vec!["Heat", "Line 1\nLine 2", "Lighting", "Hall comment"]
    );
}

#[test]
fn empty_report_is_a_blank_landscape_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");

    let summary = export_report(&ReportSpec::new(), &DocumentStyleConfig::default(), &path).unwrap();
    assert_eq!(summary.sections, 0);
    assert!(summary.warnings.is_empty());

    let inspection = inspect_docx(&path).unwrap();
    assert!(inspection.body_paragraphs.is_empty());
    assert!(inspection.tables.is_empty());
    assert_eq!(inspection.section_breaks, 0);
    assert!(inspection.is_landscape());
    assert_eq!(inspection.page_width, Some(15840));
    assert_eq!(inspection.page_height, Some(12240));
    assert_eq!(inspection.margins, Some([850, 850, 850, 1134]));
}

#[test]
fn export_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("report.{}", DEFAULT_EXTENSION));
    fs::write(&path, b"stale").unwrap();

    let report = ReportSpec::new().with_section(section("Only", &["One"]));
    export_report(&report, &DocumentStyleConfig::default(), &path).unwrap();

    assert_eq!(inspect_docx(&path).unwrap().captions(), vec!["1.1. One"]);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_destination_directory_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("report.docx");

    let result = export_report(&ReportSpec::new(), &DocumentStyleConfig::default(), &path);
    assert!(matches!(result, Err(StoreError::MissingDestinationDirectory(_))));
    assert!(!path.exists());
}

#[test]
fn figure_label_prefixes_captions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labelled.docx");
    let mut style = DocumentStyleConfig::default();
    style.figure_label = Some("Fig.".into());

    let report = ReportSpec::new().with_section(section("Gas", &["Boiler"]));
    export_report(&report, &style, &path).unwrap();

    assert_eq!(inspect_docx(&path).unwrap().captions(), vec!["Fig. 1.1. Boiler"]);
}

/// Parse every XML part of a package, rejecting characters XML 1.0 forbids
fn assert_package_well_formed(bytes: &[u8]) {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();

    for name in names.iter().filter(|n| n.ends_with(".xml") || n.ends_with(".rels")) {
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();

        let illegal = content.chars().find(|c| {
            !(matches!(c, '\t' | '\n' | '\r') || (*c >= ' ' && *c != '\u{FFFE}' && *c != '\u{FFFF}'))
        });
        assert_eq!(illegal, None, "illegal character in {}", name);

        let mut reader = quick_xml::Reader::from_str(&content);
        let mut depth = 0usize;
        loop {
            match reader.read_event() {
                Ok(Event::Start(_)) => depth += 1,
                Ok(Event::End(_)) => depth -= 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("{} is not well-formed: {}", name, e),
            }
        }
        assert_eq!(depth, 0, "unclosed elements in {}", name);
    }
}

#[test]
fn control_characters_do_not_break_the_package() {
    let report = ReportSpec::new().with_section(
        Section::new("Heat\u{0007}ing").with_item(GraphItem::not_found(
            "Boiler\u{001B}",
            "page\u{000C}break \u{0001}",
        )),
    );

    let (bytes, summary) = export_report_bytes(&report, &DocumentStyleConfig::default()).unwrap();
    assert_eq!(summary.items, 1);
    assert_package_well_formed(&bytes);

    let inspection = inspect_docx_bytes(&bytes).unwrap();
    assert_eq!(inspection.body_paragraphs, vec!["Heating", "pagebreak "]);
    assert_eq!(inspection.captions(), vec!["1.1. Boiler"]);
}

#[test]
fn exported_parts_are_well_formed() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "1.png");
    let report = ReportSpec::new()
        .with_section(Section::new("Gas & Water").with_item(GraphItem::with_file(&image, "<Meter>", "a\r\nb")))
        .with_section(section("", &["Night"]));

    let (bytes, _) = export_report_bytes(&report, &DocumentStyleConfig::default()).unwrap();
    assert_package_well_formed(&bytes);
    assert_eq!(
        inspect_docx_bytes(&bytes).unwrap().body_paragraphs,
        vec!["Gas & Water", "a\r\nb", "Night comment"]
    );
}
