//! Media error types.

use thiserror::Error;

use super::types::MediaSource;

/// Media acquisition and encoding errors.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The user refused access to the media source.
    #[error("permission denied for {0}")]
    PermissionDenied(MediaSource),

    /// The local resource could not be read or decoded.
    #[error("failed to read local media {handle}: {reason}")]
    ReadFailure {
        /// Handle that failed.
        handle: String,
        /// Underlying cause.
        reason: String,
    },

    /// The platform picker or camera failed.
    #[error("media platform error: {0}")]
    Platform(String),
}

impl MediaError {
    /// Create a read failure error.
    #[must_use]
    pub fn read_failure(handle: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadFailure {
            handle: handle.into(),
            reason: reason.into(),
        }
    }

    /// Create a platform error.
    #[must_use]
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }
}
