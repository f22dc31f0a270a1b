//! Unified error types for the translation store.

use thiserror::Error;

/// Process-level error for startup and CLI commands.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration is present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Store connection or bootstrap error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB driver error (connectivity, constraint violation, ...).
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A stored document could not be mapped back to a page.
    #[error("corrupt page document: {0}")]
    Corrupt(String),

    /// The store refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Translation service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Required input missing or malformed. Raised before any store access.
    #[error("{0}")]
    Validation(String),

    /// Referenced page does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Underlying store operation failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
