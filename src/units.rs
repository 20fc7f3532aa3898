//! Physical length units and conversions
//!
//! Everything is anchored on the exact relation 1 inch = 25.4 mm = 72 points.

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch
pub const PT_PER_INCH: f64 = 72.0;

/// Convert points to millimeters
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Convert millimeters to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Convert points to inches
pub fn pt_to_inch(pt: f64) -> f64 {
    pt / PT_PER_INCH
}

/// Simple length type stored in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt_to_mm(pt))
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in centimeters
    pub fn cm(&self) -> f64 {
        self.0 / 10.0
    }
}
