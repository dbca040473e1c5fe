//! Heading levels and the document-global size → level mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading tier. There are exactly three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels, largest tier first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level as a label ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from exact font size to heading level.
///
/// Built once per document from at most the three largest distinct sizes.
/// Lookups use exact float equality; sizes that are not in the map have no
/// level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelMap {
    entries: Vec<(f32, HeadingLevel)>,
}

impl LevelMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from sizes already sorted largest first.
    ///
    /// Sizes beyond the third are ignored.
    pub fn from_sorted_sizes(sizes: &[f32]) -> Self {
        let entries = sizes
            .iter()
            .zip(HeadingLevel::ALL)
            .map(|(&size, level)| (size, level))
            .collect();
        Self { entries }
    }

    /// Level for an exact font size.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        self.entries
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, level)| *level)
    }

    /// Iterate over (size, level) pairs, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (f32, HeadingLevel)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of mapped sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no size is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
