use thiserror::Error;

/// Failure categories of a search run. Every variant is fatal: the run is
/// aborted and the process exits with a diagnostic, never a retry.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ranges file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("address decoding failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;
