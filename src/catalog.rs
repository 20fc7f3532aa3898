//! Reference catalog of standard paper formats
//!
//! A catalog is an ordered, read-only table of named physical sizes in
//! millimeters. The order matters: when a page is within tolerance of more
//! than one entry, the earliest entry wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Name reported for pages that match no catalog entry
pub const CUSTOM_PAPER: &str = "Custom";

/// Maximum absolute difference, in millimeters, for a side to still match
pub const DEFAULT_MATCH_TOLERANCE_MM: f64 = 3.0;

/// A named physical paper size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperFormat {
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperFormat {
    pub fn new(name: impl Into<String>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            name: name.into(),
            width_mm,
            height_mm,
        }
    }

    /// Whether a page of the given size matches this format in either orientation
    pub fn matches(&self, width_mm: f64, height_mm: f64, tolerance_mm: f64) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() < tolerance_mm;

        (near(width_mm, self.width_mm) && near(height_mm, self.height_mm))
            || (near(width_mm, self.height_mm) && near(height_mm, self.width_mm))
    }
}

/// Built-in catalog variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogPreset {
    /// ISO A0-A6 plus US Letter, Legal and Tabloid
    Minimal,
    /// ISO A/B/C series, US and ANSI sizes, book trims and photo prints
    #[default]
    Extended,
}

impl FromStr for CatalogPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(CatalogPreset::Minimal),
            "extended" => Ok(CatalogPreset::Extended),
            other => Err(Error::Config(format!(
                "unknown catalog preset '{}' (expected 'minimal' or 'extended')",
                other
            ))),
        }
    }
}

impl fmt::Display for CatalogPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogPreset::Minimal => write!(f, "minimal"),
            CatalogPreset::Extended => write!(f, "extended"),
        }
    }
}

const MINIMAL: &[(&str, f64, f64)] = &[
    ("A0", 841.0, 1189.0),
    ("A1", 594.0, 841.0),
    ("A2", 420.0, 594.0),
    ("A3", 297.0, 420.0),
    ("A4", 210.0, 297.0),
    ("A5", 148.0, 210.0),
    ("A6", 105.0, 148.0),
    ("Letter", 216.0, 279.0),
    ("Legal", 216.0, 356.0),
    ("Tabloid", 279.0, 432.0),
];

// ANSI A and B are Letter and Tabloid; only the US names are listed. Photo
// 5x7 is omitted because it falls within tolerance of B6.
const EXTENDED: &[(&str, f64, f64)] = &[
    ("A0", 841.0, 1189.0),
    ("A1", 594.0, 841.0),
    ("A2", 420.0, 594.0),
    ("A3", 297.0, 420.0),
    ("A4", 210.0, 297.0),
    ("A5", 148.0, 210.0),
    ("A6", 105.0, 148.0),
    ("A7", 74.0, 105.0),
    ("B0", 1000.0, 1414.0),
    ("B1", 707.0, 1000.0),
    ("B2", 500.0, 707.0),
    ("B3", 353.0, 500.0),
    ("B4", 250.0, 353.0),
    ("B5", 176.0, 250.0),
    ("B6", 125.0, 176.0),
    ("C3", 324.0, 458.0),
    ("C4", 229.0, 324.0),
    ("C5", 162.0, 229.0),
    ("C6", 114.0, 162.0),
    ("DL", 110.0, 220.0),
    ("Letter", 216.0, 279.0),
    ("Legal", 216.0, 356.0),
    ("Tabloid", 279.0, 432.0),
    ("Executive", 184.0, 267.0),
    ("Half Letter", 140.0, 216.0),
    ("Government Letter", 203.0, 267.0),
    ("ANSI C", 432.0, 559.0),
    ("ANSI D", 559.0, 864.0),
    ("ANSI E", 864.0, 1118.0),
    ("Royal", 156.0, 234.0),
    ("Trade Paperback", 152.0, 229.0),
    ("Mass Market Paperback", 108.0, 175.0),
    ("Crown Quarto", 189.0, 246.0),
    ("Photo 4x6", 102.0, 152.0),
    ("Photo 8x10", 203.0, 254.0),
];

/// An ordered table of paper formats used for matching
#[derive(Debug, Clone, PartialEq)]
pub struct PaperCatalog {
    formats: Vec<PaperFormat>,
}

impl PaperCatalog {
    /// Build a catalog from user-supplied formats, keeping their order
    pub fn new(formats: Vec<PaperFormat>) -> Result<Self> {
        if formats.is_empty() {
            return Err(Error::Config("paper catalog has no entries".to_string()));
        }

        for format in &formats {
            if format.name.trim().is_empty() {
                return Err(Error::Config("paper format with an empty name".to_string()));
            }
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(format.width_mm) || !valid(format.height_mm) {
                return Err(Error::Config(format!(
                    "paper format '{}' has invalid size {} x {} mm",
                    format.name, format.width_mm, format.height_mm
                )));
            }
        }

        Ok(Self { formats })
    }

    /// One of the built-in catalogs
    pub fn preset(preset: CatalogPreset) -> Self {
        let table = match preset {
            CatalogPreset::Minimal => MINIMAL,
            CatalogPreset::Extended => EXTENDED,
        };

        Self {
            formats: table
                .iter()
                .map(|&(name, w, h)| PaperFormat::new(name, w, h))
                .collect(),
        }
    }

    pub fn minimal() -> Self {
        Self::preset(CatalogPreset::Minimal)
    }

    pub fn extended() -> Self {
        Self::preset(CatalogPreset::Extended)
    }

    pub fn formats(&self) -> &[PaperFormat] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Find the first format matching a page size within `tolerance_mm`
    pub fn find(&self, width_mm: f64, height_mm: f64, tolerance_mm: f64) -> Option<&PaperFormat> {
        self.formats
            .iter()
            .find(|format| format.matches(width_mm, height_mm, tolerance_mm))
    }

    /// Name of the matching format, or [`CUSTOM_PAPER`]
    pub fn match_paper(&self, width_mm: f64, height_mm: f64, tolerance_mm: f64) -> &str {
        self.find(width_mm, height_mm, tolerance_mm)
            .map(|format| format.name.as_str())
            .unwrap_or(CUSTOM_PAPER)
    }
}

impl Default for PaperCatalog {
    fn default() -> Self {
        Self::preset(CatalogPreset::default())
    }
}
