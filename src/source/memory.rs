//! In-memory document source.

use serde::{Deserialize, Serialize};

use super::{DocumentSource, PageLayout};
use crate::error::{Error, Result};

/// A document held entirely in memory.
///
/// Useful for tests and for layouts produced by another engine. The JSON
/// form mirrors the layout tree:
///
/// ```json
/// {
///   "title": "Annual Report",
///   "pages": [
///     {"blocks": [{"lines": [{"spans": [
///       {"text": "Overview", "font": "Arial-BoldMT", "size": 18.0, "bbox": [72, 90, 200, 108]}
///     ]}]}]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Metadata title
    #[serde(default)]
    pub title: Option<String>,

    /// Pages, first page first
    #[serde(default)]
    pub pages: Vec<PageLayout>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a page.
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.pages.push(page);
        self
    }

    /// Load a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Other(format!("Invalid layout JSON: {}", e)))
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        if page == 0 {
            return Err(Error::PageOutOfRange(page, self.page_count()));
        }
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn metadata_title(&self) -> Option<String> {
        self.title.clone()
    }
}
