//! Jotter error types

use thiserror::Error;

/// Jotter error type
#[derive(Error, Debug)]
pub enum Error {
    /// The classification oracle failed or returned unparseable output.
    /// Invocation-fatal: no actions are dispatched when this occurs.
    #[error("Classification error: {0}")]
    Classification(String),

    /// A document insertion failed. Scoped to one save action.
    #[error("Write error: {0}")]
    Write(String),

    /// A semantic query failed. Scoped to one query within an ask action.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store error outside of a routed operation
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Jotter operations
pub type Result<T> = std::result::Result<T, Error>;
