// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Missing local source file {path}: {hint}")]
    MissingLocalFile { path: PathBuf, hint: String },

    #[error("Malformed data in {source_id}: {message}")]
    MalformedData { source_id: String, message: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
