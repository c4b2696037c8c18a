//! Error types for clipmirror

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("malformed note payload: {0}")]
    MalformedNotes(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing clip property: {0}")]
    MissingProperty(&'static str),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
