//! Ports to the device media APIs.

use std::future::Future;

use base64::{Engine as _, engine::general_purpose};

use super::error::MediaError;
use super::types::{LocalHandle, MediaSource, PermissionStatus, PickerOptions, PickerOutcome};

/// Native permission prompts, picker and camera.
pub trait MediaPlatform: Send + Sync {
    /// Ask for (or query) access to `source`.
    fn request_permission(
        &self,
        source: MediaSource,
    ) -> impl Future<Output = Result<PermissionStatus, MediaError>> + Send;

    /// Present the picker or camera for `source`.
    fn launch_picker(
        &self,
        source: MediaSource,
        options: &PickerOptions,
    ) -> impl Future<Output = Result<PickerOutcome, MediaError>> + Send;

    /// Show a user-facing advisory.
    fn advise(&self, message: &str);
}

/// Reads a local resource as a base64 string, the way device file APIs hand it over.
pub trait MediaReader: Send + Sync {
    /// Read the whole resource behind `handle`.
    fn read_base64(
        &self,
        handle: &LocalHandle,
    ) -> impl Future<Output = Result<String, MediaError>> + Send;
}

/// Reads handles that point at files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMediaReader;

impl MediaReader for FsMediaReader {
    async fn read_base64(&self, handle: &LocalHandle) -> Result<String, MediaError> {
        let bytes = tokio::fs::read(handle.to_path())
            .await
            .map_err(|e| MediaError::read_failure(handle.as_str(), e.to_string()))?;

        Ok(general_purpose::STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_fs_reader_encodes_file_contents() {
        let path = std::env::temp_dir().join(format!("recetario-{}.jpg", Uuid::new_v4()));
        tokio::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).await.unwrap();

        let handle = LocalHandle::new(format!("file://{}", path.display()));
        let encoded = FsMediaReader.read_base64(&handle).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(encoded, "/9j/4A==");
    }

    #[tokio::test]
    async fn test_fs_reader_missing_file_is_read_failure() {
        let handle = LocalHandle::new(format!("/nonexistent/{}.jpg", Uuid::new_v4()));
        let err = FsMediaReader.read_base64(&handle).await.unwrap_err();
        assert!(matches!(err, MediaError::ReadFailure { .. }));
    }
}
