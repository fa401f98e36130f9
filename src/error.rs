//! Unified error handling for the claim engine.
//!
//! Geometric rejections (bad fixes, overlapping claims) are typed
//! outcomes, not errors - see [`crate::FilterOutcome`] and
//! [`crate::OverlapRejection`]. The error type here covers the one
//! genuinely failing condition the crate has: addressing a tracking
//! session that does not exist.

use thiserror::Error;

/// Errors returned by engine-level session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested tracking session is not registered in the engine.
    #[error("tracking session '{session_id}' not found")]
    SessionNotFound { session_id: String },

    /// A session with this id is already being tracked.
    #[error("tracking session '{session_id}' already exists")]
    SessionExists { session_id: String },
}

/// Convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for turning missing-session lookups into errors.
pub trait OptionExt<T> {
    /// Convert `None` into [`Error::SessionNotFound`] for the given id.
    fn ok_or_session_not_found(self, session_id: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_session_not_found(self, session_id: &str) -> Result<T> {
        self.ok_or_else(|| Error::SessionNotFound {
            session_id: session_id.to_string(),
        })
    }
}
