//! Error types for the catalog session.
//!
//! This module defines the centralized error type [`KinotekaError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Session-level failures (`UnknownMovieId`, `MediaLoad`, `MediaRelease`, ...) are
//! never fatal: the session recovers locally and forwards them to the presentation
//! layer. Only construction-time failures (catalog loading, configuration) are
//! propagated to the caller.

use crate::domain::movie::{MediaKind, MovieId};
use thiserror::Error;

/// The main error type for catalog session operations.
///
/// # Examples
///
/// ```
/// use kinoteka::domain::{KinotekaError, MovieId};
///
/// let err = KinotekaError::UnknownMovieId(MovieId(42));
/// assert_eq!(err.to_string(), "Unknown movie id: 42");
/// ```
#[derive(Debug, Error)]
pub enum KinotekaError {
    /// An intent referenced an identifier absent from the catalog.
    ///
    /// Raised by `SelectMovie`, `PlayMedia` and `ToggleFavorite`. The state is
    /// left untouched.
    #[error("Unknown movie id: {0}")]
    UnknownMovieId(MovieId),

    /// Playback was requested for a movie whose detail view is not open.
    #[error("Movie {0} is not open")]
    NotOpen(MovieId),

    /// The movie has no clip of the requested kind.
    #[error("Movie {movie_id} has no {kind} clip")]
    MediaUnavailable {
        /// Movie the playback was requested for.
        movie_id: MovieId,
        /// Requested media kind.
        kind: MediaKind,
    },

    /// Playback was requested without a kind and the movie has no clip at all.
    #[error("Movie {0} has no playable clip")]
    NoPlayableMedia(MovieId),

    /// The asynchronous resource load (or the start that follows it) failed.
    ///
    /// The session falls back to having no active resource.
    #[error("Failed to load media for movie {movie_id}: {reason}")]
    MediaLoad {
        /// Movie whose clip failed to load.
        movie_id: MovieId,
        /// Human-readable failure description.
        reason: String,
    },

    /// Releasing a resource failed.
    ///
    /// The session still treats the resource as released.
    #[error("Failed to release media resource: {0}")]
    MediaRelease(String),

    /// Two catalog records share an identifier.
    #[error("Duplicate movie id in catalog: {0}")]
    DuplicateMovieId(MovieId),

    /// A catalog file could not be parsed.
    #[error("Catalog format error: {0}")]
    CatalogFormat(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for catalog session operations.
pub type Result<T> = std::result::Result<T, KinotekaError>;
