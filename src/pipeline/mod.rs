//! Outline extraction pipeline.
//!
//! ```text
//! PageLayout[] -> Fragment[] -> MergedLine[] -> LevelMap -> Heading[] -> Outline
//!                 collect       merge            classify    filter       assemble
//!
//! metadata title + first PageLayout -> title ---------------------------^
//! ```
//!
//! Stages run strictly in sequence for one document: the classifier needs
//! every merged line before any line can be filtered. Nothing is shared
//! between documents, so one [`OutlineExtractor`] can serve many threads.

pub mod assembler;
pub mod classifier;
pub mod collector;
pub mod filter;
pub mod merger;
mod options;
pub mod title;

pub use filter::{HeadingFilter, Rejection, SeenHeadings};
pub use merger::MultilineMerger;
pub use options::{
    OutlineOptions, DEFAULT_DISALLOWED_HEADINGS, DEFAULT_FALLBACK_TITLE,
    DEFAULT_GENERIC_TITLE_PATTERNS,
};
pub use title::{TitleCandidate, TitleResolver};

use std::path::Path;

use crate::error::Result;
use crate::model::{Fragment, Heading, Outline};
use crate::source::{DocumentSource, PageLayout, PdfDocument};

/// Runs the full pipeline over one document at a time.
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    options: OutlineOptions,
    merger: MultilineMerger,
    filter: HeadingFilter,
    title: TitleResolver,
}

impl OutlineExtractor {
    /// Create an extractor, validating the options.
    pub fn new(options: OutlineOptions) -> Result<Self> {
        let merger = MultilineMerger::new(options.merge_size_tolerance, options.merge_y_gap);
        let filter = HeadingFilter::new(&options.disallowed_headings, options.top_of_page_y);
        let title = TitleResolver::new(
            &options.generic_title_patterns,
            options.min_title_chars,
            options.fallback_title.clone(),
        )?;

        Ok(Self {
            options,
            merger,
            filter,
            title,
        })
    }

    /// Options this extractor was built with.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Extract the outline of a document.
    ///
    /// Fails only if the source cannot produce a page layout.
    pub fn extract<S: DocumentSource + ?Sized>(&self, source: &S) -> Result<Outline> {
        let layouts = collector::read_layouts(source)?;
        let metadata_title = source.metadata_title();
        Ok(self.extract_layouts(metadata_title.as_deref(), &layouts))
    }

    /// Open a PDF file and extract its outline.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let document = PdfDocument::open(path)?;
        self.extract(&document)
    }

    /// Open a PDF from bytes and extract its outline.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        let document = PdfDocument::from_bytes(data)?;
        self.extract(&document)
    }

    /// Build an outline from already read page layouts (`layouts[0]` is page 1).
    pub fn extract_layouts(&self, metadata_title: Option<&str>, layouts: &[PageLayout]) -> Outline {
        let fragments = collector::collect_fragments(layouts, self.options.min_fragment_chars);
        let headings = self.headings(&fragments);
        let title = self.title.resolve(metadata_title, layouts.first());

        log::debug!(
            "{} pages, {} fragments, {} headings, title {:?}",
            layouts.len(),
            fragments.len(),
            headings.len(),
            title
        );
        assembler::assemble(title, headings)
    }

    /// Run merge, classify and filter over a document's fragments.
    pub fn headings(&self, fragments: &[Fragment]) -> Vec<Heading> {
        let lines = self.merger.merge(fragments);
        let levels = classifier::classify_sizes(&lines);
        log::debug!("{} merged lines, {} levels", lines.len(), levels.len());

        let (headings, _seen) = self.filter.filter(&lines, &levels, SeenHeadings::new());
        headings
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(OutlineOptions::default()).expect("default title patterns are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::source::{BBox, LayoutSpan, MemoryDocument};

    fn span(text: &str, font: &str, size: f32, y: f32) -> LayoutSpan {
        LayoutSpan::new(text, font, size, BBox::new(72.0, y, 300.0, y + size))
    }

    #[test]
    fn test_extractor_default_builds() {
        let extractor = OutlineExtractor::default();
        assert_eq!(extractor.options().min_fragment_chars, 3);
    }

    #[test]
    fn test_extractor_rejects_bad_pattern() {
        let options = OutlineOptions::new().add_generic_title_pattern("[unclosed");
        assert!(OutlineExtractor::new(options).is_err());
    }

    #[test]
    fn test_extract_memory_document() {
        let doc = MemoryDocument::new()
            .with_page(PageLayout::from_spans(vec![
                span("Annual Report", "Arial-Bold", 24.0, 60.0),
                span("Body paragraph text", "Arial", 10.0, 300.0),
            ]))
            .with_page(PageLayout::from_spans(vec![
                span("Results", "Arial-Bold", 16.0, 400.0),
                span("More body text", "Arial", 10.0, 450.0),
            ]));

        let outline = OutlineExtractor::default().extract(&doc).unwrap();
        assert_eq!(outline.title, "Annual Report");
        assert_eq!(
            outline.headings,
            vec![
                Heading::new(HeadingLevel::H1, "Annual Report", 1),
                Heading::new(HeadingLevel::H2, "Results", 2),
            ]
        );
    }

    #[test]
    fn test_extract_empty_document_uses_metadata() {
        let doc = MemoryDocument::new().with_title("Policy Handbook");
        let outline = OutlineExtractor::default().extract(&doc).unwrap();
        assert_eq!(outline.title, "Policy Handbook");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_custom_top_of_page() {
        let doc = MemoryDocument::new().with_page(PageLayout::from_spans(vec![
            span("Chapter One", "Arial", 20.0, 500.0),
            span("Running Head", "Arial", 12.0, 150.0),
        ]));

        let default = OutlineExtractor::default().extract(&doc).unwrap();
        assert_eq!(default.len(), 2);

        let strict = OutlineExtractor::new(OutlineOptions::new().with_top_of_page(100.0))
            .unwrap()
            .extract(&doc)
            .unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict.headings[0].text, "Chapter One");
    }
}
