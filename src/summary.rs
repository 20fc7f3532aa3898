//! Aggregate statistics over the pages of one document

use serde::Serialize;
use tracing::debug;

use crate::classify::{Orientation, PageDescriptor};
use crate::error::{Error, Result};

/// Number of pages per orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationCounts {
    pub portrait: usize,
    pub landscape: usize,
    pub square: usize,
}

impl OrientationCounts {
    fn record(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Portrait => self.portrait += 1,
            Orientation::Landscape => self.landscape += 1,
            Orientation::Square => self.square += 1,
        }
    }

    pub fn get(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Portrait => self.portrait,
            Orientation::Landscape => self.landscape,
            Orientation::Square => self.square,
        }
    }
}

/// Summary of a whole document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Smallest and largest page width in millimeters
    pub width_mm_range: (f64, f64),
    /// Smallest and largest page height in millimeters
    pub height_mm_range: (f64, f64),
    pub most_common_paper: String,
    pub most_common_count: usize,
    pub orientation_counts: OrientationCounts,
    /// Every page has the same size in whole millimeters
    pub all_pages_uniform: bool,
}

/// Reduce an ordered page sequence to a [`BatchSummary`]
///
/// Ties for the most common paper go to the name seen first.
pub fn summarize(pages: &[PageDescriptor]) -> Result<BatchSummary> {
    let first = pages.first().ok_or(Error::EmptyBatch)?;
    let reference_size = first.rounded_mm();

    let mut width_range = (first.width_mm, first.width_mm);
    let mut height_range = (first.height_mm, first.height_mm);
    let mut orientation_counts = OrientationCounts::default();
    let mut all_pages_uniform = true;
    // insertion-ordered tally; catalogs are small so a linear lookup is fine
    let mut paper_counts: Vec<(&str, usize)> = Vec::new();

    for page in pages {
        width_range.0 = width_range.0.min(page.width_mm);
        width_range.1 = width_range.1.max(page.width_mm);
        height_range.0 = height_range.0.min(page.height_mm);
        height_range.1 = height_range.1.max(page.height_mm);

        orientation_counts.record(page.orientation);

        if page.rounded_mm() != reference_size {
            all_pages_uniform = false;
        }

        match paper_counts
            .iter()
            .position(|(name, _)| *name == page.matched_paper)
        {
            Some(i) => paper_counts[i].1 += 1,
            None => paper_counts.push((page.matched_paper.as_str(), 1)),
        }
    }

    let (most_common_paper, most_common_count) = paper_counts
        .iter()
        .fold(paper_counts[0], |best, &entry| {
            if entry.1 > best.1 {
                entry
            } else {
                best
            }
        });

    debug!(
        pages = pages.len(),
        paper = most_common_paper,
        count = most_common_count,
        uniform = all_pages_uniform,
        "summarized batch"
    );

    Ok(BatchSummary {
        width_mm_range: width_range,
        height_mm_range: height_range,
        most_common_paper: most_common_paper.to_string(),
        most_common_count,
        orientation_counts,
        all_pages_uniform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PaperCatalog;
    use crate::classify::{classify, Geometry};

    fn pages(sizes: &[(f64, f64)]) -> Vec<PageDescriptor> {
        let catalog = PaperCatalog::extended();
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| classify(Geometry::new(w, h), &catalog, i + 1).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(summarize(&[]), Err(Error::EmptyBatch)));
    }

    #[test]
    fn test_mixed_a4_orientations() {
        let batch = pages(&[(595.28, 841.89), (595.28, 841.89), (841.89, 595.28)]);
        let summary = summarize(&batch).unwrap();

        assert!(!summary.all_pages_uniform);
        assert_eq!(summary.most_common_paper, "A4");
        assert_eq!(summary.most_common_count, 3);
        assert_eq!(
            summary.orientation_counts,
            OrientationCounts {
                portrait: 2,
                landscape: 1,
                square: 0,
            }
        );
        assert!((summary.width_mm_range.0 - 210.0).abs() < 0.01);
        assert!((summary.width_mm_range.1 - 297.0).abs() < 0.01);
        assert!((summary.height_mm_range.0 - 210.0).abs() < 0.01);
        assert!((summary.height_mm_range.1 - 297.0).abs() < 0.01);
    }

    #[test]
    fn test_uniform_uses_whole_millimeters() {
        // 0.2mm apart, same after rounding
        let batch = pages(&[(595.28, 841.89), (595.85, 841.6)]);
        let summary = summarize(&batch).unwrap();
        assert!(summary.all_pages_uniform);

        let single = summarize(&pages(&[(612.0, 792.0)])).unwrap();
        assert!(single.all_pages_uniform);
        assert_eq!(single.most_common_paper, "Letter");
        assert_eq!(single.most_common_count, 1);
        assert_eq!(single.width_mm_range.0, single.width_mm_range.1);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let letter_first = pages(&[(612.0, 792.0), (595.28, 841.89)]);
        let a4_first = pages(&[(595.28, 841.89), (612.0, 792.0)]);

        for _ in 0..5 {
            assert_eq!(summarize(&letter_first).unwrap().most_common_paper, "Letter");
            assert_eq!(summarize(&a4_first).unwrap().most_common_paper, "A4");
        }

        let later_majority = pages(&[(612.0, 792.0), (595.28, 841.89), (595.28, 841.89)]);
        let summary = summarize(&later_majority).unwrap();
        assert_eq!(summary.most_common_paper, "A4");
        assert_eq!(summary.most_common_count, 2);
    }

    #[test]
    fn test_square_and_custom_pages() {
        let batch = pages(&[(1417.32, 1417.32), (1417.32, 1417.32), (612.0, 792.0)]);
        let summary = summarize(&batch).unwrap();
        assert_eq!(summary.most_common_paper, "Custom");
        assert_eq!(summary.most_common_count, 2);
        assert_eq!(summary.orientation_counts.get(Orientation::Square), 2);
        assert_eq!(summary.orientation_counts.get(Orientation::Portrait), 1);
    }
}
