//! Error types for the reading engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Reading model error: {0}")]
    Model(#[from] reading_model::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
