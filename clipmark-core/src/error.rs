//! Error types for Clipmark Core

use thiserror::Error;

/// Result type alias using ClipmarkError
pub type Result<T> = std::result::Result<T, ClipmarkError>;

/// Top-level error type for all Clipmark operations
///
/// Malformed annotation *content* (unparsable dates, unmatched title
/// patterns) is never an error — those degrade to absent/fallback values.
/// Errors here are structural: unreadable sidecars, broken registries, IO.
#[derive(Debug, Error)]
pub enum ClipmarkError {
    #[error("Sidecar error: {0}")]
    Sidecar(#[from] SidecarError),

    #[error("Invalid history registry: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while loading a book's sidecar payload
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("Malformed sidecar: {0}")]
    Malformed(String),

    #[error("Empty sidecar payload")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
