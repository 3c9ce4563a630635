//! Reading Model - paragraphs, selections and highlights
//!
//! This crate holds the immutable reading content of a book section and the
//! values that users create on top of it: the transient text selection and
//! the session-lifetime highlights. It also splits a paragraph into styled
//! runs so a frontend can draw highlights without knowing about ranges.

mod error;
mod paragraph;
mod selection;
mod highlight;
mod render;

pub use error::*;
pub use paragraph::*;
pub use selection::*;
pub use highlight::*;
pub use render::*;
