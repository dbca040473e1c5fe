//! # pdfoutline
//!
//! Document outline inference for PDF files.
//!
//! PDFs rarely carry a usable table of contents. This library rebuilds one
//! from typography alone: text fragments are collected with their font size,
//! weight and position, wrapped heading lines are merged, the three largest
//! sizes become H1/H2/H3, and noise (table headers, page numbers, body text)
//! is filtered out. A title is chosen from the metadata or the first page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, to_json, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout-only**: no external table of contents or bookmarks required
//! - **Pluggable sources**: any [`DocumentSource`] can feed the pipeline
//! - **Batch mode**: whole directories processed in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{
    default_data_dirs, find_pdfs, process_directory, process_files, BatchSummary, DocumentResult,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf};
pub use error::{Error, Result};
pub use model::{Fragment, Heading, HeadingLevel, LevelMap, MergedLine, Outline};
pub use pipeline::{OutlineExtractor, OutlineOptions};
pub use render::{to_json, JsonFormat};
pub use source::{BBox, DocumentSource, LayoutSpan, MemoryDocument, PageLayout, PdfDocument};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let outline = outline_file("document.pdf").unwrap();
/// println!("{}: {} headings", outline.title, outline.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    OutlineExtractor::default().extract_file(path)
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{outline_file_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new()
///     .disallow_heading("Contents")
///     .sequential();
/// let outline = outline_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn outline_file_with_options<P: AsRef<Path>>(path: P, options: OutlineOptions) -> Result<Outline> {
    OutlineExtractor::new(options)?.extract_file(path)
}

/// Extract the outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<Outline> {
    OutlineExtractor::default().extract_bytes(data)
}

/// Extract the outline from any document source.
///
/// # Example
///
/// ```
/// use pdfoutline::{outline_source, MemoryDocument};
///
/// let doc = MemoryDocument::new().with_title("Field Guide");
/// let outline = outline_source(&doc).unwrap();
/// assert_eq!(outline.title, "Field Guide");
/// assert!(outline.is_empty());
/// ```
pub fn outline_source<S: DocumentSource + ?Sized>(source: &S) -> Result<Outline> {
    OutlineExtractor::default().extract(source)
}
