use std::path::PathBuf;
use thiserror::Error;

/// Common error type shared by the Folio crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON in {path}: {source}")]
    InvalidFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}
