//! Outline extraction options and configuration.

/// Default generic-title patterns, matched case-insensitively.
pub const DEFAULT_GENERIC_TITLE_PATTERNS: &[&str] = &[
    r"^Microsoft Word",
    r"^Document[0-9]*$",
    r"^Untitled",
    r"\.docx?$",
    r"\.pdf$",
];

/// Lowercased texts that are table column headers, never headings.
pub const DEFAULT_DISALLOWED_HEADINGS: &[&str] = &["s.no", "name", "age", "relationship"];

/// Title used when neither metadata nor the first page yields one.
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled Document";

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Minimum cleaned length (in characters) for a fragment to be kept
    pub min_fragment_chars: usize,

    /// Minimum cleaned length (in characters) for a title candidate
    pub min_title_chars: usize,

    /// Maximum font size difference for fragments on the same line (exclusive)
    pub merge_size_tolerance: f32,

    /// Maximum vertical gap between consecutive fragments of a line (exclusive)
    pub merge_y_gap: f32,

    /// Lines starting above this y coordinate count as top-of-page
    pub top_of_page_y: f32,

    /// Lowercased texts rejected as headings
    pub disallowed_headings: Vec<String>,

    /// Regex patterns marking a metadata title as generic
    pub generic_title_patterns: Vec<String>,

    /// Title used when no other source yields one
    pub fallback_title: String,

    /// Whether batch processing runs documents in parallel
    pub parallel: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum fragment length.
    pub fn with_min_fragment_chars(mut self, chars: usize) -> Self {
        self.min_fragment_chars = chars;
        self
    }

    /// Set the minimum title candidate length.
    pub fn with_min_title_chars(mut self, chars: usize) -> Self {
        self.min_title_chars = chars;
        self
    }

    /// Set the merge tolerances.
    pub fn with_merge_tolerance(mut self, size: f32, y_gap: f32) -> Self {
        self.merge_size_tolerance = size;
        self.merge_y_gap = y_gap;
        self
    }

    /// Set the top-of-page threshold.
    pub fn with_top_of_page(mut self, y: f32) -> Self {
        self.top_of_page_y = y;
        self
    }

    /// Add a text that must never be a heading.
    pub fn disallow_heading(mut self, text: impl Into<String>) -> Self {
        self.disallowed_headings.push(text.into().to_lowercase());
        self
    }

    /// Replace the generic-title patterns.
    pub fn with_generic_title_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_title_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one generic-title pattern.
    pub fn add_generic_title_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.generic_title_patterns.push(pattern.into());
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_fragment_chars: 3,
            min_title_chars: 4,
            merge_size_tolerance: 0.1,
            merge_y_gap: 25.0,
            top_of_page_y: 200.0,
            disallowed_headings: DEFAULT_DISALLOWED_HEADINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            generic_title_patterns: DEFAULT_GENERIC_TITLE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert_eq!(options.min_fragment_chars, 3);
        assert_eq!(options.min_title_chars, 4);
        assert_eq!(options.merge_y_gap, 25.0);
        assert_eq!(options.top_of_page_y, 200.0);
        assert_eq!(options.disallowed_headings.len(), 4);
        assert_eq!(options.generic_title_patterns.len(), 5);
        assert_eq!(options.fallback_title, "Untitled Document");
        assert!(options.parallel);
    }

    #[test]
    fn test_options_builder() {
        let options = OutlineOptions::new()
            .with_merge_tolerance(0.5, 30.0)
            .with_top_of_page(150.0)
            .disallow_heading("Total")
            .add_generic_title_pattern(r"^Slide \d+$")
            .with_fallback_title("No Title")
            .sequential();

        assert_eq!(options.merge_size_tolerance, 0.5);
        assert_eq!(options.merge_y_gap, 30.0);
        assert_eq!(options.top_of_page_y, 150.0);
        assert!(options.disallowed_headings.contains(&"total".to_string()));
        assert_eq!(options.generic_title_patterns.len(), 6);
        assert_eq!(options.fallback_title, "No Title");
        assert!(!options.parallel);
    }

    #[test]
    fn test_replace_generic_patterns() {
        let options = OutlineOptions::new().with_generic_title_patterns(["^Draft"]);
        assert_eq!(options.generic_title_patterns, vec!["^Draft".to_string()]);
    }
}
