//! Outline assembly.

use crate::model::{Heading, Outline};

/// Compose a resolved title and filtered headings into an outline.
pub fn assemble(title: String, headings: Vec<Heading>) -> Outline {
    Outline::new(title, headings)
}
