//! Document analysis: classify every page in order, then summarize

use std::path::Path;
use tracing::info;

use crate::classify::{Classifier, PageDescriptor};
use crate::error::Result;
use crate::pdf::PdfSource;
use crate::source::GeometrySource;
use crate::summary::{summarize, BatchSummary};

/// Results for one document
#[derive(Debug, Clone)]
pub struct Analysis {
    /// File name shown in reports and exports
    pub file_name: String,
    /// One descriptor per page, in document order
    pub pages: Vec<PageDescriptor>,
    pub summary: BatchSummary,
}

impl Analysis {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }
}

/// Classify each page of `source` strictly in page order
///
/// The first page that cannot be read or classified aborts the whole run.
pub fn classify_pages<S>(source: &S, classifier: &Classifier) -> Result<Vec<PageDescriptor>>
where
    S: GeometrySource + ?Sized,
{
    let count = source.page_count();
    let mut pages = Vec::with_capacity(count);

    for page_index in 1..=count {
        let geometry = source.page_geometry(page_index)?;
        pages.push(classifier.classify(geometry, page_index)?);
    }

    Ok(pages)
}

/// Classify and summarize all pages of `source`
pub fn analyze_source<S>(
    file_name: &str,
    source: &S,
    classifier: &Classifier,
) -> Result<Analysis>
where
    S: GeometrySource + ?Sized,
{
    let pages = classify_pages(source, classifier)?;
    let summary = summarize(&pages)?;

    info!(
        file = file_name,
        pages = pages.len(),
        paper = %summary.most_common_paper,
        uniform = summary.all_pages_uniform,
        "analyzed document"
    );

    Ok(Analysis {
        file_name: file_name.to_string(),
        pages,
        summary,
    })
}

/// Load a PDF file and analyze it
pub fn analyze_pdf(path: &Path, classifier: &Classifier) -> Result<Analysis> {
    let source = PdfSource::open(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    analyze_source(&file_name, &source, classifier)
}
