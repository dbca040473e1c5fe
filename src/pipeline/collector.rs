//! Fragment collection: flattens page layout trees into cleaned fragments.

use crate::error::Result;
use crate::model::{clean_text, Fragment};
use crate::source::{DocumentSource, PageLayout};

/// Read the layout of every page, first page first.
///
/// Any page failure fails the whole document.
pub fn read_layouts<S: DocumentSource + ?Sized>(source: &S) -> Result<Vec<PageLayout>> {
    (1..=source.page_count())
        .map(|page| source.page_layout(page))
        .collect()
}

/// Collect fragments from one page.
///
/// Spans are visited in block → line → span order; spans whose cleaned
/// text is shorter than `min_chars` characters are dropped.
pub fn collect_page(page: u32, layout: &PageLayout, min_chars: usize) -> Vec<Fragment> {
    layout
        .spans()
        .filter_map(|span| {
            let text = clean_text(&span.text);
            if text.chars().count() < min_chars {
                return None;
            }
            Some(Fragment::new(
                page,
                text,
                span.size,
                span.is_bold(),
                span.bbox.top(),
            ))
        })
        .collect()
}

/// Collect fragments from all pages. `layouts[0]` is page 1.
pub fn collect_fragments(layouts: &[PageLayout], min_chars: usize) -> Vec<Fragment> {
    layouts
        .iter()
        .enumerate()
        .flat_map(|(idx, layout)| collect_page(idx as u32 + 1, layout, min_chars))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BBox, LayoutSpan, MemoryDocument};

    fn span(text: &str, font: &str, size: f32, y: f32) -> LayoutSpan {
        LayoutSpan::new(text, font, size, BBox::new(0.0, y, 100.0, y + size))
    }

    #[test]
    fn test_collect_cleans_and_filters() {
        let layout = PageLayout::from_spans(vec![
            span("  Intro   duction : ", "Arial-Bold", 18.0, 40.0),
            span("ab", "Arial", 12.0, 60.0),
            span(" 7 - ", "Arial", 12.0, 70.0),
            span("abc", "Arial", 12.0, 80.0),
        ]);

        let fragments = collect_page(2, &layout, 3);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Intro duction");
        assert!(fragments[0].is_bold);
        assert_eq!(fragments[0].page, 2);
        assert_eq!(fragments[0].y_top, 40.0);
        assert_eq!(fragments[1].text, "abc");
        assert!(!fragments[1].is_bold);
    }

    #[test]
    fn test_collect_assigns_pages_in_order() {
        let layouts = vec![
            PageLayout::from_spans(vec![span("First page", "F", 12.0, 10.0)]),
            PageLayout::new(),
            PageLayout::from_spans(vec![span("Third page", "F", 12.0, 10.0)]),
        ];
        let fragments = collect_fragments(&layouts, 3);
        let pages: Vec<u32> = fragments.iter().map(|f| f.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn test_read_layouts_empty_document() {
        let doc = MemoryDocument::new();
        assert!(read_layouts(&doc).unwrap().is_empty());
    }
}
