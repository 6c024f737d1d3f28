//! Command implementations

use anyhow::Context;
use collector::{Collection, Collector};
use report_model::ReportSpec;
use report_store::{
    export_report, inspect_docx, normalize_output_path, DocxInspection, ExportSummary,
    ExporterSettings, SettingsManager,
};
use std::path::{Path, PathBuf};

/// Where the report to export comes from
#[derive(Debug, Clone)]
pub enum ReportInput {
    DataRoot(PathBuf),
    SpecFile(PathBuf),
}

/// Load settings from `path`, or use the defaults when no file is given
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ExporterSettings> {
    let Some(path) = path else {
        return Ok(ExporterSettings::default());
    };

    let mut manager = SettingsManager::from_file(path);
    let settings = manager
        .load()
        .with_context(|| format!("loading settings from {}", path.display()))?
        .clone();
    settings
        .style
        .validate()
        .with_context(|| format!("invalid style in {}", path.display()))?;
    Ok(settings)
}

pub fn collect(settings: &ExporterSettings, data_root: &Path, json: bool) -> anyhow::Result<()> {
    let collection = collect_from(settings, data_root)?;
    print_collect_warnings(&collection);

    if json {
        println!("{}", serde_json::to_string_pretty(&collection.report)?);
    } else {
        print_outline(&collection.report);
    }
    Ok(())
}

pub fn export(settings: &ExporterSettings, input: &ReportInput, output: &Path) -> anyhow::Result<()> {
    let report = match input {
        ReportInput::DataRoot(root) => {
            let collection = collect_from(settings, root)?;
            print_collect_warnings(&collection);
            collection.report
        }
        ReportInput::SpecFile(path) => read_spec(path)?,
    };

    let output = normalize_output_path(output);
    let summary = export_report(&report, &settings.style, &output)
        .with_context(|| format!("exporting to {}", output.display()))?;

    print_summary(&output, &summary);
    Ok(())
}

pub fn inspect(document: &Path, json: bool) -> anyhow::Result<()> {
    let inspection = inspect_docx(document)
        .with_context(|| format!("inspecting {}", document.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        print_inspection(&inspection);
    }
    Ok(())
}

fn collect_from(settings: &ExporterSettings, root: &Path) -> anyhow::Result<Collection> {
    let collector = Collector::new(settings.collector.clone())?;
    collector
        .collect_report(root)
        .with_context(|| format!("collecting {}", root.display()))
}

/// Read a report from a JSON file
pub fn read_spec(path: &Path) -> anyhow::Result<ReportSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(report)
}

fn print_collect_warnings(collection: &Collection) {
    for warning in &collection.warnings {
        eprintln!("warning: {}", warning);
    }
}

fn print_outline(report: &ReportSpec) {
    for (section_number, section) in report.numbered_sections() {
        if section.has_heading() {
            println!("{}", section.title);
        } else {
            println!("(section {})", section_number);
        }
        for (item_number, item) in section.numbered_items() {
            let image = item
                .image
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| report_model::NOT_FOUND_SENTINEL.to_string());
            println!(
                "  {} [{}]",
                report_model::caption(section_number, item_number, &item.caption),
                image
            );
        }
    }
    println!(
        "{} sections, {} items",
        report.sections.len(),
        report.item_count()
    );
}

fn print_summary(output: &Path, summary: &ExportSummary) {
    for warning in &summary.warnings {
        eprintln!("warning: {}", warning);
    }
    println!(
        "Wrote {}: {} sections, {} items, {} images, {} placeholders",
        output.display(),
        summary.sections,
        summary.items,
        summary.images_embedded,
        summary.placeholders
    );
}

fn print_inspection(inspection: &DocxInspection) {
    if let (Some(w), Some(h)) = (inspection.page_width, inspection.page_height) {
        println!(
            "Page: {}x{} twips, {}",
            w,
            h,
            inspection.orientation.as_deref().unwrap_or("portrait")
        );
    }
    if let Some([top, right, bottom, left]) = inspection.margins {
        println!("Margins: top {} right {} bottom {} left {}", top, right, bottom, left);
    }
    println!("Section breaks: {}", inspection.section_breaks);
    println!("Pictures: {}", inspection.drawings);
    println!("Captions:");
    for caption in inspection.captions() {
        println!("  {}", caption);
    }
    println!("Paragraphs:");
    for paragraph in &inspection.body_paragraphs {
        println!("  {}", paragraph.replace('\n', " / "));
    }
}
