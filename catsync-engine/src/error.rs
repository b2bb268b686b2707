//! Error types for catsync-engine
//!
//! Defines engine error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for the search-and-sync engine
#[derive(Error, Debug)]
pub enum Error {
    /// Search kind name not one of tracks, artists, albums
    #[error("Unknown search kind: {0}")]
    UnknownSearchKind(String),

    /// Container type not one of artist, album
    #[error("Unknown container kind: {0}")]
    UnknownContainerKind(String),

    /// Entry store errors
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Shared configuration/IO errors
    #[error(transparent)]
    Common(#[from] catsync_common::Error),
}

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;
