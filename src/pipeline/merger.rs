//! Multiline merging: reassembles headings emitted as several type runs.

use crate::model::{Fragment, MergedLine};

/// Joins adjacent fragments that belong to one visual line.
///
/// A fragment extends the open run iff it is on the same page, its size is
/// within `size_tolerance` of the run's first fragment, and its top edge is
/// within `max_y_gap` of the run's last fragment. Both bounds are exclusive.
#[derive(Debug, Clone, Copy)]
pub struct MultilineMerger {
    size_tolerance: f32,
    max_y_gap: f32,
}

impl MultilineMerger {
    /// Create a merger with the given tolerances.
    pub fn new(size_tolerance: f32, max_y_gap: f32) -> Self {
        Self {
            size_tolerance,
            max_y_gap,
        }
    }

    fn extends(&self, run: &[Fragment], next: &Fragment) -> bool {
        match (run.first(), run.last()) {
            (Some(first), Some(last)) => {
                next.page == first.page
                    && (next.size - first.size).abs() < self.size_tolerance
                    && (next.y_top - last.y_top).abs() < self.max_y_gap
            }
            _ => false,
        }
    }

    /// Merge fragments into lines in a single forward pass.
    pub fn merge(&self, fragments: &[Fragment]) -> Vec<MergedLine> {
        let mut lines = Vec::new();
        let mut start = 0;

        for idx in 1..fragments.len() {
            if !self.extends(&fragments[start..idx], &fragments[idx]) {
                lines.extend(MergedLine::from_fragments(&fragments[start..idx]));
                start = idx;
            }
        }
        if start < fragments.len() {
            lines.extend(MergedLine::from_fragments(&fragments[start..]));
        }

        lines
    }
}

impl Default for MultilineMerger {
    fn default() -> Self {
        Self::new(0.1, 25.0)
    }
}
