//! Fragment-level types.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One cleaned unit of text with font and position information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Page number (1-indexed)
    pub page: u32,

    /// Cleaned text content
    pub text: String,

    /// Font size in points
    pub size: f32,

    /// Whether the font name marks the run as bold
    pub is_bold: bool,

    /// Top edge of the bounding box, measured from the top of the page
    pub y_top: f32,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(page: u32, text: impl Into<String>, size: f32, is_bold: bool, y_top: f32) -> Self {
        Self {
            page,
            text: text.into(),
            size,
            is_bold,
            y_top,
        }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One or more fragments joined into a single logical line.
///
/// `page`, `size` and `y_top` come from the first contributing fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedLine {
    /// Page number (1-indexed)
    pub page: u32,

    /// Space-joined text of all contributors
    pub text: String,

    /// Font size of the first contributor
    pub size: f32,

    /// True if any contributor is bold
    pub is_bold: bool,

    /// Top edge of the first contributor
    pub y_top: f32,
}

impl MergedLine {
    /// Build a merged line from a non-empty run of fragments.
    ///
    /// Returns `None` for an empty run.
    pub fn from_fragments(fragments: &[Fragment]) -> Option<Self> {
        let first = fragments.first()?;
        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            page: first.page,
            text,
            size: first.size,
            is_bold: fragments.iter().any(|f| f.is_bold),
            y_top: first.y_top,
        })
    }
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn trailing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-:]+$").expect("valid trailing regex"))
}

/// Normalize raw span text.
///
/// Trims, collapses whitespace runs to a single space, and strips any
/// trailing run of whitespace, dashes and colons.
pub fn clean_text(raw: &str) -> String {
    let collapsed = whitespace_regex().replace_all(raw.trim(), " ");
    trailing_regex().replace(&collapsed, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello \t  World \n"), "Hello World");
    }

    #[test]
    fn test_clean_text_strips_trailing_punctuation() {
        assert_eq!(clean_text("Chapter 1:"), "Chapter 1");
        assert_eq!(clean_text("Summary - -"), "Summary");
        assert_eq!(clean_text("Overview :-"), "Overview");
    }

    #[test]
    fn test_clean_text_keeps_leading_and_inner_dashes() {
        assert_eq!(clean_text("- Self-test"), "- Self-test");
    }

    #[test]
    fn test_clean_text_only_punctuation() {
        assert_eq!(clean_text(" --: "), "");
    }

    #[test]
    fn test_fragment_char_len_counts_chars() {
        let frag = Fragment::new(1, "Été", 12.0, false, 0.0);
        assert_eq!(frag.char_len(), 3);
    }

    #[test]
    fn test_merged_line_from_fragments() {
        let fragments = vec![
            Fragment::new(2, "Intro", 18.0, false, 10.0),
            Fragment::new(2, "duction", 18.05, true, 12.0),
        ];
        let line = MergedLine::from_fragments(&fragments).unwrap();
        assert_eq!(line.text, "Intro duction");
        assert_eq!(line.page, 2);
        assert_eq!(line.size, 18.0);
        assert_eq!(line.y_top, 10.0);
        assert!(line.is_bold);
    }

    #[test]
    fn test_merged_line_from_empty() {
        assert!(MergedLine::from_fragments(&[]).is_none());
    }
}
