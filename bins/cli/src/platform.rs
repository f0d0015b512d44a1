//! Media platform for a terminal session.
//!
//! There is no camera and no interactive picker: the "picked" photo is the
//! path given on the command line, and capture is always denied.

use std::path::PathBuf;

use recetario_core::media::{
    LocalHandle, MediaError, MediaPlatform, MediaSource, PermissionStatus, PickerOptions,
    PickerOutcome,
};
use tracing::debug;

/// Picks the file given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TerminalPlatform {
    selection: Option<PathBuf>,
}

impl TerminalPlatform {
    /// Platform that will hand out `selection` when the picker opens.
    #[must_use]
    pub fn new(selection: Option<PathBuf>) -> Self {
        Self { selection }
    }
}

impl MediaPlatform for TerminalPlatform {
    async fn request_permission(
        &self,
        source: MediaSource,
    ) -> Result<PermissionStatus, MediaError> {
        Ok(match source {
            MediaSource::Library => PermissionStatus::Granted,
            MediaSource::Capture => PermissionStatus::Denied,
        })
    }

    async fn launch_picker(
        &self,
        source: MediaSource,
        options: &PickerOptions,
    ) -> Result<PickerOutcome, MediaError> {
        let Some(path) = &self.selection else {
            return Ok(PickerOutcome::Cancelled);
        };

        let path = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| MediaError::platform(format!("{}: {e}", path.display())))?;
        debug!(
            source = %source,
            path = %path.display(),
            quality = options.quality,
            "photo selected"
        );

        Ok(PickerOutcome::Picked(vec![LocalHandle::new(format!(
            "file://{}",
            path.display()
        ))]))
    }

    fn advise(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recetario_core::media::MediaAcquirer;
    use recetario_core::observability::NoopObserver;
    use std::sync::Arc;

    fn acquirer(selection: Option<PathBuf>) -> MediaAcquirer<TerminalPlatform> {
        MediaAcquirer::new(
            Arc::new(TerminalPlatform::new(selection)),
            PickerOptions::default(),
            Arc::new(NoopObserver),
        )
    }

    #[tokio::test]
    async fn test_selected_file_becomes_file_uri() {
        let path = std::env::temp_dir().join("recetario-terminal-platform.jpg");
        tokio::fs::write(&path, b"jpeg").await.unwrap();

        let handle = acquirer(Some(path.clone()))
            .acquire_from_library()
            .await
            .expect("file should be picked");

        assert!(handle.as_str().starts_with("file:///"));
        assert_eq!(handle.to_path(), tokio::fs::canonicalize(&path).await.unwrap());
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_selection_is_cancellation() {
        let outcome = acquirer(None).try_acquire(MediaSource::Library).await;
        assert!(matches!(outcome, Ok(None)));
    }

    #[tokio::test]
    async fn test_missing_file_is_platform_error() {
        let outcome = acquirer(Some(PathBuf::from("/definitely/not/here.jpg")))
            .try_acquire(MediaSource::Library)
            .await;
        assert!(matches!(outcome, Err(MediaError::Platform(_))));
    }

    #[tokio::test]
    async fn test_capture_is_denied() {
        let outcome = acquirer(Some(PathBuf::from("/tmp/x.jpg")))
            .try_acquire(MediaSource::Capture)
            .await;
        assert!(matches!(
            outcome,
            Err(MediaError::PermissionDenied(MediaSource::Capture))
        ));
    }
}
