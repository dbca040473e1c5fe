//! Document source abstraction.
//!
//! The outline pipeline never touches a concrete PDF library. It reads a
//! [`DocumentSource`], which exposes a page count, a per-page
//! block → line → span layout tree, and an optional metadata title.
//! [`PdfDocument`] implements it over lopdf, [`MemoryDocument`] over
//! in-memory (or JSON-loaded) layouts.

mod memory;
mod pdf;

pub use memory::MemoryDocument;
pub use pdf::PdfDocument;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Abstract interface for reading a document's positioned text.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Layout tree of a page (1-indexed).
    fn page_layout(&self, page: u32) -> Result<PageLayout>;

    /// Title from the document metadata, if any.
    fn metadata_title(&self) -> Option<String>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        (**self).page_layout(page)
    }

    fn metadata_title(&self) -> Option<String> {
        (**self).metadata_title()
    }
}

/// Bounding box in top-down page coordinates (y grows downwards).
///
/// Serialized as a `[x0, y0, x1, y1]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y0
    }
}

impl From<[f32; 4]> for BBox {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// A run of text in a single font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    /// Raw text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Bounding box
    pub bbox: BBox,
}

impl LayoutSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            bbox,
        }
    }

    /// Whether the font name marks this span as bold.
    pub fn is_bold(&self) -> bool {
        self.font.to_lowercase().contains("bold")
    }
}

/// A line of spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    #[serde(default)]
    pub spans: Vec<LayoutSpan>,
}

impl LayoutLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<LayoutSpan>) -> Self {
        Self { spans }
    }
}

/// A block of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    #[serde(default)]
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<LayoutLine>) -> Self {
        Self { lines }
    }
}

/// Layout tree of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub blocks: Vec<LayoutBlock>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page with one block holding one line per span.
    pub fn from_spans(spans: Vec<LayoutSpan>) -> Self {
        let lines = spans.into_iter().map(|s| LayoutLine::new(vec![s])).collect();
        Self {
            blocks: vec![LayoutBlock::new(lines)],
        }
    }

    /// Add a block.
    pub fn with_block(mut self, block: LayoutBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// All spans in document order (blocks, then lines, then spans).
    pub fn spans(&self) -> impl Iterator<Item = &LayoutSpan> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans().next().is_none()
    }
}
