use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Failed to read a dictionary file.
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid JSON.
    #[error("Failed to parse dictionary JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The JSON is valid but not shaped like a dictionary.
    #[error("Unexpected dictionary layout in {origin}: {reason}")]
    Layout {
        /// File path or `<inline>` for in-memory sources.
        origin: PathBuf,
        /// What was wrong.
        reason: String,
    },
}
