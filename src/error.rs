//! Service error taxonomy shared by the article services and the HTTP layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or mismatched bearer credential.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any fault raised by SQLite.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Worker task or lock failure around the storage call.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
