//! Heading heuristics: decides which merged lines become headings.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Heading, HeadingLevel, LevelMap, MergedLine};

fn number_only_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.?$").expect("valid number regex"))
}

/// Why a line was not accepted as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The font size has no level
    NoLevel,
    /// The text is a known table column header
    TableHeader,
    /// The text is a bare number such as a page or list number
    NumberOnly,
    /// Not bold, not near the top of the page, and not H1
    WeakSignal,
}

/// Document-scoped set of (level, lowercased text, page) keys already emitted.
#[derive(Debug, Clone, Default)]
pub struct SeenHeadings {
    keys: HashSet<(HeadingLevel, String, u32)>,
}

impl SeenHeadings {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading; returns false if an equivalent one was already seen.
    pub fn insert(&mut self, level: HeadingLevel, text: &str, page: u32) -> bool {
        self.keys.insert((level, text.to_lowercase(), page))
    }

    /// Number of recorded headings.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Layered heading heuristics.
#[derive(Debug, Clone)]
pub struct HeadingFilter {
    disallowed: HashSet<String>,
    top_of_page_y: f32,
}

impl HeadingFilter {
    /// Create a filter from disallowed texts and the top-of-page threshold.
    pub fn new<I, S>(disallowed: I, top_of_page_y: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            disallowed: disallowed
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            top_of_page_y,
        }
    }

    /// Decide the level of a single line, applying the rules in order.
    pub fn classify_line(
        &self,
        line: &MergedLine,
        levels: &LevelMap,
    ) -> Result<HeadingLevel, Rejection> {
        let level = levels.level_for(line.size).ok_or(Rejection::NoLevel)?;

        if self.disallowed.contains(&line.text.to_lowercase()) {
            return Err(Rejection::TableHeader);
        }
        if number_only_regex().is_match(&line.text) {
            return Err(Rejection::NumberOnly);
        }

        // H1 is trusted unconditionally.
        if line.is_bold || line.y_top < self.top_of_page_y || level == HeadingLevel::H1 {
            Ok(level)
        } else {
            Err(Rejection::WeakSignal)
        }
    }

    /// Filter lines into headings, skipping keys already present in `seen`.
    ///
    /// Returns the accepted headings in input order together with the
    /// updated set.
    pub fn filter(
        &self,
        lines: &[MergedLine],
        levels: &LevelMap,
        mut seen: SeenHeadings,
    ) -> (Vec<Heading>, SeenHeadings) {
        let mut headings = Vec::new();

        for line in lines {
            match self.classify_line(line, levels) {
                Ok(level) => {
                    if seen.insert(level, &line.text, line.page) {
                        headings.push(Heading::new(level, line.text.clone(), line.page));
                    }
                }
                Err(reason) => {
                    log::trace!("Rejected {:?} on page {}: {:?}", line.text, line.page, reason);
                }
            }
        }

        (headings, seen)
    }
}
