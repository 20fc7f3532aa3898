//! PDF reading module

pub mod metadata;
pub mod page_size;

// Re-export commonly used items
pub use metadata::{extract_metadata, format_file_size, PdfMetadata};
pub use page_size::PdfSource;
