//! Error types for the warden service layer

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur in the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Core validation error
    #[error("{0}")]
    Core(#[from] warden_core::CoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Restore requested with no snapshot on disk
    #[error("No backup file found")]
    NoBackup,

    /// A settings value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
