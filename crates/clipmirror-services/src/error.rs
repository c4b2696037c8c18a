//! Error types for the service layer

use clipmirror_core::MirrorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no track bound")]
    NotBound,
    #[error("target not found: {0}")]
    TargetNotFound(String),
    #[error(transparent)]
    Core(#[from] MirrorError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
