//! Per-page dimension classification
//!
//! Turns the raw width and height of a page (in points) into a
//! [`PageDescriptor`]: the size in every supported unit, its orientation,
//! a reduced aspect ratio and the matching paper format from a catalog.

use std::fmt;
use tracing::debug;

use crate::catalog::{PaperCatalog, DEFAULT_MATCH_TOLERANCE_MM};
use crate::error::{Error, Result};
use crate::units::{pt_to_inch, Length};

/// Pages whose sides differ by less than this many points are square
pub const DEFAULT_SQUARE_THRESHOLD_PT: f64 = 5.0;

/// Raw page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl Geometry {
    pub fn new(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }

    fn validate(&self) -> Result<()> {
        let (w, h) = (self.width_pt, self.height_pt);
        if !w.is_finite() || !h.is_finite() {
            return Err(Error::invalid_geometry(w, h, "dimensions must be finite"));
        }
        if w <= 0.0 || h <= 0.0 {
            return Err(Error::invalid_geometry(w, h, "dimensions must be positive"));
        }
        Ok(())
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    /// Classify a page from its size in points
    pub fn classify(width_pt: f64, height_pt: f64, square_threshold_pt: f64) -> Self {
        if (width_pt - height_pt).abs() < square_threshold_pt {
            Orientation::Square
        } else if width_pt > height_pt {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
            Orientation::Square => "Square",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Greatest common divisor, Euclid's algorithm as a plain loop
///
/// Both arguments must be finite, non-negative whole numbers. `%` is exact
/// on such values, so this works beyond the range of any integer type.
pub fn gcd(mut a: f64, mut b: f64) -> f64 {
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Width-to-height ratio reduced to coprime whole numbers
///
/// Both sides are whole-valued `f64`s so page sizes of any magnitude
/// reduce exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    /// Round both sides to whole points and reduce by their GCD
    ///
    /// Fails with [`Error::InvalidGeometry`] when either side rounds to zero,
    /// not only when both do, or when a side is not finite.
    pub fn from_dimensions(width: f64, height: f64) -> Result<Self> {
        let w = width.round();
        let h = height.round();
        if !w.is_finite() || !h.is_finite() {
            return Err(Error::invalid_geometry(width, height, "dimensions must be finite"));
        }
        if !(w >= 1.0 && h >= 1.0) {
            return Err(Error::invalid_geometry(
                width,
                height,
                "dimensions round to zero",
            ));
        }

        let divisor = gcd(w, h);

        Ok(Self {
            width: w / divisor,
            height: h / divisor,
        })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}:{:.0}", self.width, self.height)
    }
}

/// Full classification of one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// 1-based position in the document
    pub page_index: usize,
    pub width_pt: f64,
    pub height_pt: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub width_in: f64,
    pub height_in: f64,
    pub orientation: Orientation,
    pub aspect_ratio: AspectRatio,
    /// Catalog name, or "Custom"
    pub matched_paper: String,
}

impl PageDescriptor {
    /// Width in whole points, shown as pixels at 72 dpi
    pub fn width_px(&self) -> i64 {
        self.width_pt.round() as i64
    }

    pub fn height_px(&self) -> i64 {
        self.height_pt.round() as i64
    }

    /// Size in whole millimeters, used for uniformity checks
    pub fn rounded_mm(&self) -> (i64, i64) {
        (self.width_mm.round() as i64, self.height_mm.round() as i64)
    }
}

/// Tunable limits used during classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub square_threshold_pt: f64,
    pub match_tolerance_mm: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            square_threshold_pt: DEFAULT_SQUARE_THRESHOLD_PT,
            match_tolerance_mm: DEFAULT_MATCH_TOLERANCE_MM,
        }
    }
}

/// Page classifier bound to a catalog and a set of thresholds
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    catalog: PaperCatalog,
    thresholds: Thresholds,
}

impl Classifier {
    pub fn new(catalog: PaperCatalog, thresholds: Thresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn catalog(&self) -> &PaperCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Classify a single page
    pub fn classify(&self, geometry: Geometry, page_index: usize) -> Result<PageDescriptor> {
        classify_with(geometry, &self.catalog, self.thresholds, page_index)
    }
}

/// Classify one page against `catalog` using the default thresholds
pub fn classify(
    geometry: Geometry,
    catalog: &PaperCatalog,
    page_index: usize,
) -> Result<PageDescriptor> {
    classify_with(geometry, catalog, Thresholds::default(), page_index)
}

/// Classify one page against `catalog` with explicit thresholds
pub fn classify_with(
    geometry: Geometry,
    catalog: &PaperCatalog,
    thresholds: Thresholds,
    page_index: usize,
) -> Result<PageDescriptor> {
    geometry.validate()?;

    let Geometry {
        width_pt,
        height_pt,
    } = geometry;

    let orientation = Orientation::classify(width_pt, height_pt, thresholds.square_threshold_pt);
    let aspect_ratio = AspectRatio::from_dimensions(width_pt, height_pt)?;

    let width = Length::from_pt(width_pt);
    let height = Length::from_pt(height_pt);

    let matched_paper = catalog
        .match_paper(width.mm(), height.mm(), thresholds.match_tolerance_mm)
        .to_string();

    debug!(
        page = page_index,
        width_mm = width.mm(),
        height_mm = height.mm(),
        %orientation,
        paper = %matched_paper,
        "classified page"
    );

    Ok(PageDescriptor {
        page_index,
        width_pt,
        height_pt,
        width_mm: width.mm(),
        height_mm: height.mm(),
        width_cm: width.cm(),
        height_cm: height.cm(),
        width_in: pt_to_inch(width_pt),
        height_in: pt_to_inch(height_pt),
        orientation,
        aspect_ratio,
        matched_paper,
    })
}
