//! PDF Dimensions Library
//!
//! A cross-platform library for measuring PDF pages and naming their paper sizes.
//! This library provides functionality to:
//! - Read per-page sizes from PDF files
//! - Convert sizes between points, inches, millimeters and centimeters
//! - Classify orientation and reduce aspect ratios
//! - Match pages against a configurable catalog of standard paper formats
//! - Summarize a whole document and export the results as CSV, JSON or text
//!
//! # Example
//!
//! ```no_run
//! use pdf_dimensions::analysis::analyze_pdf;
//! use pdf_dimensions::classify::Classifier;
//! use std::path::Path;
//!
//! let analysis = analyze_pdf(Path::new("handout.pdf"), &Classifier::default())
//!     .expect("Failed to analyze PDF");
//!
//! println!("Most common size: {}", analysis.summary.most_common_paper);
//! ```

pub mod analysis;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod pdf;
pub mod source;
pub mod summary;
pub mod units;

// Re-export commonly used items
pub use analysis::{analyze_pdf, analyze_source, Analysis};
pub use catalog::{CatalogPreset, PaperCatalog, PaperFormat};
pub use classify::{classify, Classifier, Geometry, Orientation, PageDescriptor};
pub use error::{Error, Result};
pub use summary::{summarize, BatchSummary};
