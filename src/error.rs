//! Error types for the PDF dimensions library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF dimensions library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Page dimensions that cannot be classified
    #[error("Invalid page geometry ({width} x {height} pt): {reason}")]
    InvalidGeometry {
        width: f64,
        height: f64,
        reason: &'static str,
    },

    /// Summary requested for a document without pages
    #[error("Cannot summarize an empty batch: the document has no pages")]
    EmptyBatch,

    /// The document reader could not produce geometry for a page
    #[error("Could not read page {page}: {reason}")]
    SourceAcquisition { page: usize, reason: String },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_geometry(width: f64, height: f64, reason: &'static str) -> Self {
        Error::InvalidGeometry {
            width,
            height,
            reason,
        }
    }
}
