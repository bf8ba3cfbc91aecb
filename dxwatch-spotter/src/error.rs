//! Error types for dxwatch-spotter
//!
//! Entity-lookup failures have their own per-spot error type
//! ([`crate::services::LookupError`]); the variants here cover the session
//! and bootstrap paths that can take the process down or force a reconnect.

use thiserror::Error;

/// Main error type for the spotter
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or client construction errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cluster session errors (connect, login, framing)
    #[error("Cluster session error: {0}")]
    Session(String),

    /// Work matrix read or parse errors
    #[error("Work matrix error: {0}")]
    Matrix(String),

    /// File I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using the spotter Error
pub type Result<T> = std::result::Result<T, Error>;
