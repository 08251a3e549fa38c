//! Unified error type for sceneseek.
//!
//! Resolution failures, profile invariant violations, and indexer failures all
//! funnel into [`Error`]. Application code wraps these in `anyhow::Error`; the
//! typed value can be recovered with `downcast_ref::<Error>()`.

use std::fmt;

/// Common error type for sceneseek.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "movie", "profile").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A quality profile breaks one of its structural invariants.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Configuration or input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An indexer call failed.
    #[error("Indexer error [{indexer}]: {message}")]
    Indexer {
        /// Name of the indexer that failed.
        indexer: String,
        /// Human-readable error description.
        message: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::InvalidProfile`].
    pub fn invalid_profile(msg: impl Into<String>) -> Self {
        Error::InvalidProfile(msg.into())
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Convenience constructor for [`Error::Indexer`].
    pub fn indexer(indexer: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Indexer {
            indexer: indexer.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
