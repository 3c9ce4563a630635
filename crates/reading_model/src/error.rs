//! Error types for the reading model

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Paragraph {index} out of range (document has {count})")]
    ParagraphOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
