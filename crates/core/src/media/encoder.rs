//! Turns a local handle into an upload payload.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};

use super::error::MediaError;
use super::platform::MediaReader;
use super::types::LocalHandle;
use crate::storage::BinaryPayload;

/// Reads a local resource fully into memory and decodes it to raw bytes.
///
/// No size cap is applied here.
pub struct MediaEncoder<R: MediaReader> {
    reader: Arc<R>,
}

impl<R: MediaReader> MediaEncoder<R> {
    /// Create an encoder over `reader`.
    #[must_use]
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// Encode the resource behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::ReadFailure`] if the resource is gone, unreadable
    /// or not valid base64. Nothing is retried.
    pub async fn encode(&self, handle: &LocalHandle) -> Result<BinaryPayload, MediaError> {
        let text = self.reader.read_base64(handle).await?;

        let bytes = general_purpose::STANDARD
            .decode(text.trim())
            .map_err(|e| MediaError::read_failure(handle.as_str(), e.to_string()))?;

        Ok(BinaryPayload::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticReader(Result<&'static str, &'static str>);

    impl MediaReader for StaticReader {
        async fn read_base64(&self, handle: &LocalHandle) -> Result<String, MediaError> {
            self.0
                .map(str::to_string)
                .map_err(|reason| MediaError::read_failure(handle.as_str(), reason))
        }
    }

    fn encoder(result: Result<&'static str, &'static str>) -> MediaEncoder<StaticReader> {
        MediaEncoder::new(Arc::new(StaticReader(result)))
    }

    #[tokio::test]
    async fn test_encode_decodes_base64() {
        let payload = encoder(Ok("aGVsbG8="))
            .encode(&LocalHandle::new("file:///photo.jpg"))
            .await
            .unwrap();
        assert_eq!(payload.as_bytes(), b"hello");
    }

    #[tokio::test]
    async fn test_encode_tolerates_trailing_newline() {
        let payload = encoder(Ok("aGVsbG8=\n"))
            .encode(&LocalHandle::new("file:///photo.jpg"))
            .await
            .unwrap();
        assert_eq!(payload.len(), 5);
    }

    #[tokio::test]
    async fn test_encode_rejects_invalid_base64() {
        let err = encoder(Ok("not base64!"))
            .encode(&LocalHandle::new("file:///photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::ReadFailure { ref handle, .. } if handle == "file:///photo.jpg"));
    }

    #[tokio::test]
    async fn test_encode_propagates_read_failure() {
        let err = encoder(Err("no such file"))
            .encode(&LocalHandle::new("file:///gone.jpg"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no such file"));
    }
}
