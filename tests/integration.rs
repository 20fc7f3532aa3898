//! Integration tests for the PDF dimensions library

use lopdf::{dictionary, Document, Object};
use pdf_dimensions::analysis::analyze_pdf;
use pdf_dimensions::catalog::{PaperCatalog, PaperFormat};
use pdf_dimensions::classify::{gcd, Classifier, Orientation, Thresholds};
use pdf_dimensions::export::{self, ExportFormat};
use pdf_dimensions::pdf::extract_metadata;
use pdf_dimensions::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a PDF whose pages have the given sizes in points
fn write_pdf(dir: &Path, name: &str, sizes: &[(f32, f32)], title: Option<&str>) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = sizes
        .iter()
        .map(|&(w, h)| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(w),
                    Object::Real(h),
                ],
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(kids.len() as i64),
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write test PDF");
    path
}

const A4: (f32, f32) = (595.28, 841.89);
const A4_LANDSCAPE: (f32, f32) = (841.89, 595.28);
const LETTER: (f32, f32) = (612.0, 792.0);

#[test]
fn test_single_a4_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "a4.pdf", &[A4], None);

    let analysis = analyze_pdf(&path, &Classifier::default()).expect("Failed to analyze PDF");

    assert_eq!(analysis.file_name, "a4.pdf");
    assert_eq!(analysis.total_pages(), 1);

    let page = &analysis.pages[0];
    assert_eq!(page.page_index, 1);
    assert!((page.width_mm - 210.0).abs() < 0.05);
    assert!((page.height_mm - 297.0).abs() < 0.05);
    assert_eq!(page.orientation, Orientation::Portrait);
    assert_eq!(page.matched_paper, "A4");
    assert_eq!(page.aspect_ratio.to_string(), "595:842");
    assert_eq!(gcd(page.aspect_ratio.width, page.aspect_ratio.height), 1.0);

    assert!(analysis.summary.all_pages_uniform);
    assert_eq!(analysis.summary.most_common_paper, "A4");
}

#[test]
fn test_mixed_orientation_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "mixed.pdf", &[A4, A4, A4_LANDSCAPE], None);

    let analysis = analyze_pdf(&path, &Classifier::default()).expect("Failed to analyze PDF");
    let summary = &analysis.summary;

    assert!(!summary.all_pages_uniform);
    assert_eq!(summary.most_common_paper, "A4");
    assert_eq!(summary.most_common_count, 3);
    assert_eq!(summary.orientation_counts.portrait, 2);
    assert_eq!(summary.orientation_counts.landscape, 1);
    assert_eq!(summary.orientation_counts.square, 0);

    let order: Vec<usize> = analysis.pages.iter().map(|p| p.page_index).collect();
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn test_tie_break_follows_page_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "tie.pdf", &[LETTER, A4, A4, LETTER], None);

    for _ in 0..3 {
        let analysis = analyze_pdf(&path, &Classifier::default()).expect("Failed to analyze PDF");
        assert_eq!(analysis.summary.most_common_paper, "Letter");
        assert_eq!(analysis.summary.most_common_count, 2);
    }
}

#[test]
fn test_custom_catalog() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    // 76 x 127 mm index card
    let path = write_pdf(temp_dir.path(), "card.pdf", &[(215.43, 360.0), A4], None);

    let catalog = PaperCatalog::new(vec![PaperFormat::new("Index Card", 76.0, 127.0)])
        .expect("Failed to build catalog");
    let classifier = Classifier::new(catalog, Thresholds::default());

    let analysis = analyze_pdf(&path, &classifier).expect("Failed to analyze PDF");
    assert_eq!(analysis.pages[0].matched_paper, "Index Card");
    assert_eq!(analysis.pages[1].matched_paper, "Custom");
}

#[test]
fn test_exports() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "report.pdf", &[LETTER, A4_LANDSCAPE], None);
    let analysis = analyze_pdf(&path, &Classifier::default()).expect("Failed to analyze PDF");

    let csv = export::render(&analysis, ExportFormat::Csv).expect("CSV export failed");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Page,Width (px),Height (px)"));
    assert!(lines[1].ends_with("Portrait,17:22,Letter"));
    assert!(lines[2].ends_with(",Landscape,842:595,A4"));

    let json = export::render(&analysis, ExportFormat::Json).expect("JSON export failed");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(value["filename"], "report.pdf");
    assert_eq!(value["totalPages"], 2);
    assert_eq!(value["pages"].as_array().map(|p| p.len()), Some(2));

    let text = export::render(&analysis, ExportFormat::Text).expect("Text export failed");
    assert_eq!(
        text,
        "Page 1: 215.9×279.4 mm (Letter, Portrait)\nPage 2: 297.0×210.0 mm (A4, Landscape)"
    );

    let export_path = export::export_path(&path, ExportFormat::Csv);
    assert_eq!(export_path, temp_dir.path().join("report_analysis.csv"));
}

#[test]
fn test_metadata() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "titled.pdf", &[A4, A4], Some("Bridge Handout"));

    let metadata = extract_metadata(&path).expect("Failed to read metadata");
    assert_eq!(metadata.page_count, 2);
    assert_eq!(metadata.title.as_deref(), Some("Bridge Handout"));
    assert_eq!(metadata.author, None);
    assert!(metadata.file_size > 0);
}

#[test]
fn test_corrupt_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("corrupt.pdf");
    std::fs::write(&path, b"%PDF-1.5\nthis is not really a pdf").expect("Failed to write file");

    let result = analyze_pdf(&path, &Classifier::default());
    assert!(result.is_err(), "Should fail on a corrupt PDF");
}

#[test]
fn test_nonexistent_file() {
    let result = analyze_pdf(Path::new("nonexistent.pdf"), &Classifier::default());
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_document_without_pages() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "empty.pdf", &[], None);

    let result = analyze_pdf(&path, &Classifier::default());
    assert!(matches!(result, Err(Error::EmptyBatch)));
}

#[test]
fn test_zero_sized_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_pdf(temp_dir.path(), "zero.pdf", &[A4, (0.0, 842.0)], None);

    let result = analyze_pdf(&path, &Classifier::default());
    assert!(matches!(result, Err(Error::InvalidGeometry { .. })));
}
