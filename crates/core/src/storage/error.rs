//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transient network or service fault.
    #[error("object storage unavailable: {0}")]
    Unavailable(String),

    /// An object already exists under the generated key.
    #[error("object key already exists: {key}")]
    NameCollision {
        /// The colliding key.
        key: String,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a name collision error.
    #[must_use]
    pub fn name_collision(key: impl Into<String>) -> Self {
        Self::NameCollision { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Classify an OpenDAL failure that happened while writing `key`.
    #[must_use]
    pub fn from_opendal(key: &str, err: &opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::ConditionNotMatch | opendal::ErrorKind::AlreadyExists => {
                Self::name_collision(key)
            }
            opendal::ErrorKind::ConfigInvalid => Self::configuration(err.to_string()),
            _ => Self::unavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opendal::{Error, ErrorKind};

    #[test]
    fn test_condition_not_match_is_collision() {
        let err = Error::new(ErrorKind::ConditionNotMatch, "precondition failed");
        let mapped = StorageError::from_opendal("a.jpg", &err);
        assert!(matches!(mapped, StorageError::NameCollision { ref key } if key == "a.jpg"));
    }

    #[test]
    fn test_already_exists_is_collision() {
        let err = Error::new(ErrorKind::AlreadyExists, "exists");
        assert!(matches!(
            StorageError::from_opendal("b.jpg", &err),
            StorageError::NameCollision { .. }
        ));
    }

    #[test]
    fn test_other_kinds_are_unavailable() {
        for kind in [
            ErrorKind::Unexpected,
            ErrorKind::RateLimited,
            ErrorKind::PermissionDenied,
        ] {
            let err = Error::new(kind, "boom");
            assert!(matches!(
                StorageError::from_opendal("c.jpg", &err),
                StorageError::Unavailable(_)
            ));
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            StorageError::name_collision("d.jpg").to_string(),
            "object key already exists: d.jpg"
        );
        assert_eq!(
            StorageError::unavailable("timeout").to_string(),
            "object storage unavailable: timeout"
        );
    }
}
