//! Export and report formatting for analysis results
//!
//! Every numeric value is rendered with its display precision: one decimal
//! for millimeters, two for centimeters, inches and points, whole numbers
//! for the pixel equivalent.

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::classify::PageDescriptor;
use crate::error::{Error, Result};
use crate::summary::BatchSummary;

/// CSV header row
pub const CSV_HEADERS: [&str; 14] = [
    "Page",
    "Width (px)",
    "Height (px)",
    "Width (pt)",
    "Height (pt)",
    "Width (in)",
    "Height (in)",
    "Width (mm)",
    "Height (mm)",
    "Width (cm)",
    "Height (cm)",
    "Orientation",
    "Aspect Ratio",
    "Paper Size",
];

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// Display-rounded view of a [`PageDescriptor`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRow {
    pub page: usize,
    pub width_px: i64,
    pub height_px: i64,
    pub width_pt: String,
    pub height_pt: String,
    pub width_in: String,
    pub height_in: String,
    pub width_mm: String,
    pub height_mm: String,
    pub width_cm: String,
    pub height_cm: String,
    pub orientation: String,
    pub aspect_ratio: String,
    pub paper: String,
}

impl From<&PageDescriptor> for PageRow {
    fn from(page: &PageDescriptor) -> Self {
        Self {
            page: page.page_index,
            width_px: page.width_px(),
            height_px: page.height_px(),
            width_pt: format!("{:.2}", page.width_pt),
            height_pt: format!("{:.2}", page.height_pt),
            width_in: format!("{:.2}", page.width_in),
            height_in: format!("{:.2}", page.height_in),
            width_mm: format!("{:.1}", page.width_mm),
            height_mm: format!("{:.1}", page.height_mm),
            width_cm: format!("{:.2}", page.width_cm),
            height_cm: format!("{:.2}", page.height_cm),
            orientation: page.orientation.to_string(),
            aspect_ratio: page.aspect_ratio.to_string(),
            paper: page.matched_paper.clone(),
        }
    }
}

impl PageRow {
    fn record(&self) -> [String; 14] {
        [
            self.page.to_string(),
            self.width_px.to_string(),
            self.height_px.to_string(),
            self.width_pt.clone(),
            self.height_pt.clone(),
            self.width_in.clone(),
            self.height_in.clone(),
            self.width_mm.clone(),
            self.height_mm.clone(),
            self.width_cm.clone(),
            self.height_cm.clone(),
            self.orientation.clone(),
            self.aspect_ratio.clone(),
            self.paper.clone(),
        ]
    }
}

/// Structured export document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport<'a> {
    pub filename: &'a str,
    pub total_pages: usize,
    pub pages: Vec<PageRow>,
}

/// Write one CSV row per page, header first
pub fn write_csv<W: Write>(pages: &[PageDescriptor], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CSV_HEADERS)?;
    for page in pages {
        csv.write_record(PageRow::from(page).record())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv(pages: &[PageDescriptor]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(pages, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Pretty-printed `{ filename, totalPages, pages }` document
pub fn to_json(analysis: &Analysis) -> Result<String> {
    let export = JsonExport {
        filename: &analysis.file_name,
        total_pages: analysis.total_pages(),
        pages: analysis.pages.iter().map(PageRow::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// One "Page N: W×H mm (paper, orientation)" line per page
pub fn to_text(pages: &[PageDescriptor]) -> String {
    pages
        .iter()
        .map(|page| {
            let row = PageRow::from(page);
            format!(
                "Page {}: {}×{} mm ({}, {})",
                row.page, row.width_mm, row.height_mm, row.paper, row.orientation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render an analysis in the given format
pub fn render(analysis: &Analysis, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(&analysis.pages),
        ExportFormat::Json => to_json(analysis),
        ExportFormat::Text => Ok(to_text(&analysis.pages)),
    }
}

/// Default export name: `report.pdf` becomes `report_analysis.csv`
pub fn export_file_name(file_name: &str, format: ExportFormat) -> String {
    let path = Path::new(file_name);
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let stem = if is_pdf {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        file_name.to_string()
    };

    format!("{}_analysis.{}", stem, format.extension())
}

/// Path next to `input` where `--save` writes the export
pub fn export_path(input: &Path, format: ExportFormat) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(export_file_name(&name, format))
}

/// Per-page table for terminal output
pub fn to_table(pages: &[PageDescriptor]) -> String {
    let headers = [
        "Page",
        "Pixels",
        "Points",
        "Inches",
        "Millimeters",
        "Centimeters",
        "Orientation",
        "Ratio",
        "Paper",
    ];

    let rows: Vec<[String; 9]> = pages
        .iter()
        .map(PageRow::from)
        .map(|r| {
            [
                r.page.to_string(),
                format!("{} × {}", r.width_px, r.height_px),
                format!("{} × {}", r.width_pt, r.height_pt),
                format!("{} × {}", r.width_in, r.height_in),
                format!("{} × {}", r.width_mm, r.height_mm),
                format!("{} × {}", r.width_cm, r.height_cm),
                r.orientation,
                r.aspect_ratio,
                r.paper,
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    out.join("\n")
}

/// Uniformity line shown under the table
pub fn uniformity_message(summary: &BatchSummary) -> &'static str {
    if summary.all_pages_uniform {
        "✓ All pages have the same dimensions."
    } else {
        "⚠ This PDF contains pages with different sizes."
    }
}

/// Statistics block for terminal output
pub fn statistics_text(summary: &BatchSummary) -> String {
    let (min_w, max_w) = summary.width_mm_range;
    let (min_h, max_h) = summary.height_mm_range;
    let counts = &summary.orientation_counts;

    let mut lines = vec![
        "Statistics".to_string(),
        format!(
            "  Dimensions range (mm): {:.1}–{:.1} × {:.1}–{:.1}",
            min_w, max_w, min_h, max_h
        ),
        format!(
            "  Most common size:      {} ({})",
            summary.most_common_paper, summary.most_common_count
        ),
        format!("  Portrait pages:        {}", counts.portrait),
        format!("  Landscape pages:       {}", counts.landscape),
    ];
    if counts.square > 0 {
        lines.push(format!("  Square pages:          {}", counts.square));
    }

    lines.join("\n")
}
