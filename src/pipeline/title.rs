//! Title resolution from metadata or first-page typography.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::model::clean_text;
use crate::source::PageLayout;

/// A first-page span considered as a title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCandidate {
    /// Font size in points
    pub size: f32,
    /// Top edge of the span
    pub y_top: f32,
    /// Cleaned text
    pub text: String,
}

impl TitleCandidate {
    /// Larger size wins, then the span nearer the top, then the greater text.
    fn rank(&self, other: &Self) -> Ordering {
        self.size
            .total_cmp(&other.size)
            .then_with(|| other.y_top.total_cmp(&self.y_top))
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// Resolves a document title.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    generic_patterns: Vec<Regex>,
    min_chars: usize,
    fallback: String,
}

impl TitleResolver {
    /// Build a resolver, compiling the generic-title patterns case-insensitively.
    pub fn new<I, S>(patterns: I, min_chars: usize, fallback: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let generic_patterns = patterns
            .into_iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            generic_patterns,
            min_chars,
            fallback: fallback.into(),
        })
    }

    /// Check if a metadata title carries no information.
    pub fn is_generic(&self, title: &str) -> bool {
        let title = title.trim();
        title.is_empty() || self.generic_patterns.iter().any(|re| re.is_match(title))
    }

    /// First-page spans long enough to be a title. Spans are not merged.
    pub fn candidates(&self, first_page: &PageLayout) -> Vec<TitleCandidate> {
        first_page
            .spans()
            .filter_map(|span| {
                let text = clean_text(&span.text);
                (text.chars().count() >= self.min_chars).then(|| TitleCandidate {
                    size: span.size,
                    y_top: span.bbox.top(),
                    text,
                })
            })
            .collect()
    }

    /// Resolve the title.
    ///
    /// A non-generic metadata title wins; otherwise the largest, topmost
    /// first-page span; otherwise the fallback title.
    pub fn resolve(&self, metadata_title: Option<&str>, first_page: Option<&PageLayout>) -> String {
        if let Some(title) = metadata_title {
            if !self.is_generic(title) {
                return title.trim().to_string();
            }
            log::debug!("Metadata title {:?} is generic", title);
        }

        first_page
            .map(|page| self.candidates(page))
            .unwrap_or_default()
            .into_iter()
            .max_by(|a, b| a.rank(b))
            .map(|c| c.text)
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::options::{DEFAULT_FALLBACK_TITLE, DEFAULT_GENERIC_TITLE_PATTERNS};
    use crate::source::{BBox, LayoutSpan};

    fn resolver() -> TitleResolver {
        TitleResolver::new(DEFAULT_GENERIC_TITLE_PATTERNS.iter(), 4, DEFAULT_FALLBACK_TITLE)
            .unwrap()
    }

    fn span(text: &str, size: f32, y: f32) -> LayoutSpan {
        LayoutSpan::new(text, "Arial", size, BBox::new(0.0, y, 100.0, y + size))
    }

    #[test]
    fn test_generic_titles() {
        let r = resolver();
        assert!(r.is_generic("Microsoft Word - report.docx"));
        assert!(r.is_generic("microsoft word - notes"));
        assert!(r.is_generic("Document1"));
        assert!(r.is_generic("Document"));
        assert!(r.is_generic("Untitled-3"));
        assert!(r.is_generic("final.DOC"));
        assert!(r.is_generic("scan_0042.pdf"));
        assert!(r.is_generic(""));
        assert!(r.is_generic("   "));
    }

    #[test]
    fn test_informative_titles() {
        let r = resolver();
        assert!(!r.is_generic("Annual Report 2024"));
        assert!(!r.is_generic("Document Management Policy"));
        assert!(!r.is_generic("Guide to .pdf files in practice"));
    }

    #[test]
    fn test_metadata_title_trimmed() {
        let title = resolver().resolve(Some("  Quarterly Review  "), None);
        assert_eq!(title, "Quarterly Review");
    }

    #[test]
    fn test_generic_metadata_falls_back_to_first_page() {
        let page = PageLayout::from_spans(vec![
            span("Body text on the page", 11.0, 300.0),
            span("Project Plan", 24.0, 50.0),
            span("Subtitle here", 18.0, 90.0),
        ]);
        let title = resolver().resolve(Some("Microsoft Word - report.docx"), Some(&page));
        assert_eq!(title, "Project Plan");
    }

    #[test]
    fn test_blank_metadata_falls_back_to_first_page() {
        let page = PageLayout::from_spans(vec![span("Survey Results", 18.0, 70.0)]);
        assert_eq!(resolver().resolve(Some("   "), Some(&page)), "Survey Results");
        assert_eq!(resolver().resolve(Some(""), None), "Untitled Document");
    }

    #[test]
    fn test_tie_prefers_topmost() {
        let page = PageLayout::from_spans(vec![
            span("Lower Heading", 20.0, 120.0),
            span("Upper Heading", 20.0, 40.0),
        ]);
        assert_eq!(resolver().resolve(None, Some(&page)), "Upper Heading");
    }

    #[test]
    fn test_full_tie_prefers_greater_text() {
        let page = PageLayout::from_spans(vec![
            span("Alpha Section", 20.0, 40.0),
            span("Omega Section", 20.0, 40.0),
            span("Beta Section", 20.0, 40.0),
        ]);
        assert_eq!(resolver().resolve(None, Some(&page)), "Omega Section");

        let reversed = PageLayout::from_spans(vec![
            span("Omega Section", 20.0, 40.0),
            span("Alpha Section", 20.0, 40.0),
        ]);
        assert_eq!(resolver().resolve(None, Some(&reversed)), "Omega Section");
    }

    #[test]
    fn test_short_spans_are_not_candidates() {
        let page = PageLayout::from_spans(vec![
            span("ABC", 40.0, 10.0),
            span("Real Title", 20.0, 60.0),
        ]);
        assert_eq!(resolver().resolve(None, Some(&page)), "Real Title");
    }

    #[test]
    fn test_candidates_are_unmerged_spans() {
        let page = PageLayout::from_spans(vec![
            span("Intro", 24.0, 10.0),
            span("duction", 24.0, 12.0),
        ]);
        assert_eq!(resolver().candidates(&page).len(), 2);
        assert_eq!(resolver().resolve(None, Some(&page)), "Intro");
    }

    #[test]
    fn test_sentinel_without_candidates() {
        let r = resolver();
        assert_eq!(r.resolve(None, None), "Untitled Document");
        assert_eq!(r.resolve(Some("Untitled"), Some(&PageLayout::new())), "Untitled Document");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = TitleResolver::new(["(broken"], 4, "x");
        assert!(result.is_err());
    }
}
