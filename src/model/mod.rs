//! Typed records flowing through the outline pipeline.
//!
//! Each stage has its own record type so that stage-specific fields do not
//! leak into the final artifact: a [`Fragment`] knows about boldness and
//! vertical position, a [`Heading`] only knows its level, text, and page.

mod fragment;
mod level;
mod outline;

pub use fragment::{clean_text, Fragment, MergedLine};
pub use level::{HeadingLevel, LevelMap};
pub use outline::{Heading, Outline};
