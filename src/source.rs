//! Per-page geometry providers

use crate::classify::Geometry;
use crate::error::{Error, Result};

/// Something that can report the size of each page of a document
///
/// Pages are addressed with 1-based indices, in document order.
pub trait GeometrySource {
    /// Total number of pages
    fn page_count(&self) -> usize;

    /// Raw size of page `page_index` (1-based)
    fn page_geometry(&self, page_index: usize) -> Result<Geometry>;
}

impl GeometrySource for [Geometry] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_geometry(&self, page_index: usize) -> Result<Geometry> {
        page_index
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .copied()
            .ok_or_else(|| Error::SourceAcquisition {
                page: page_index,
                reason: format!("page out of range (document has {} pages)", self.len()),
            })
    }
}
