//! Obtains a local image handle from the library or the camera.

use std::sync::Arc;

use tracing::error;

use super::error::MediaError;
use super::platform::MediaPlatform;
use super::types::{LocalHandle, MediaSource, PermissionStatus, PickerOptions, PickerOutcome};
use crate::observability::{PipelineObserver, PipelineStage, StageOutcome};

/// Drives the permission prompt and the native picker.
///
/// Acquisition never fails loudly: denial shows an advisory and yields
/// `None`, cancellation yields `None`, platform faults are logged and yield
/// `None`.
pub struct MediaAcquirer<P: MediaPlatform> {
    platform: Arc<P>,
    options: PickerOptions,
    observer: Arc<dyn PipelineObserver>,
}

impl<P: MediaPlatform> MediaAcquirer<P> {
    /// Create an acquirer with the given picker options.
    #[must_use]
    pub fn new(
        platform: Arc<P>,
        options: PickerOptions,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            platform,
            options,
            observer,
        }
    }

    /// Picker options in effect.
    #[must_use]
    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Let the user pick a photo from the library.
    pub async fn acquire_from_library(&self) -> Option<LocalHandle> {
        self.acquire(MediaSource::Library).await
    }

    /// Let the user take a photo with the camera.
    pub async fn acquire_from_capture(&self) -> Option<LocalHandle> {
        self.acquire(MediaSource::Capture).await
    }

    async fn acquire(&self, source: MediaSource) -> Option<LocalHandle> {
        self.observer
            .record(PipelineStage::Acquire, StageOutcome::Started);

        match self.try_acquire(source).await {
            Ok(Some(handle)) => {
                self.observer.record(
                    PipelineStage::Acquire,
                    StageOutcome::Completed {
                        detail: Some(handle.as_str()),
                    },
                );
                Some(handle)
            }
            Ok(None) => {
                self.observer.record(
                    PipelineStage::Acquire,
                    StageOutcome::Completed {
                        detail: Some("cancelled"),
                    },
                );
                None
            }
            Err(MediaError::PermissionDenied(denied)) => {
                self.platform.advise(denied.advisory());
                self.observer.record(
                    PipelineStage::Acquire,
                    StageOutcome::Failed {
                        reason: "permission denied",
                    },
                );
                None
            }
            Err(e) => {
                error!(error = %e, source = %source, "Failed to acquire image");
                let reason = e.to_string();
                self.observer.record(
                    PipelineStage::Acquire,
                    StageOutcome::Failed { reason: &reason },
                );
                None
            }
        }
    }

    /// Same flow as the public methods but with the failure kept.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::PermissionDenied`] when access is not granted and
    /// any platform error raised by the prompt or picker.
    pub async fn try_acquire(&self, source: MediaSource) -> Result<Option<LocalHandle>, MediaError> {
        let status = self.platform.request_permission(source).await?;
        if status != PermissionStatus::Granted {
            return Err(MediaError::PermissionDenied(source));
        }

        match self.platform.launch_picker(source, &self.options).await? {
            PickerOutcome::Cancelled => Ok(None),
            PickerOutcome::Picked(assets) => Ok(assets.into_iter().next()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::NoopObserver;
    use std::sync::Mutex;

    /// Scripted platform recording what the acquirer asked for.
    struct ScriptedPlatform {
        permission: Result<PermissionStatus, &'static str>,
        outcome: Result<PickerOutcome, &'static str>,
        advisories: Mutex<Vec<String>>,
        launches: Mutex<Vec<(MediaSource, PickerOptions)>>,
    }

    impl ScriptedPlatform {
        fn new(
            permission: Result<PermissionStatus, &'static str>,
            outcome: Result<PickerOutcome, &'static str>,
        ) -> Arc<Self> {
            Arc::new(Self {
                permission,
                outcome,
                advisories: Mutex::new(Vec::new()),
                launches: Mutex::new(Vec::new()),
            })
        }
    }

    impl MediaPlatform for ScriptedPlatform {
        async fn request_permission(
            &self,
            _source: MediaSource,
        ) -> Result<PermissionStatus, MediaError> {
            self.permission.map_err(MediaError::platform)
        }

        async fn launch_picker(
            &self,
            source: MediaSource,
            options: &PickerOptions,
        ) -> Result<PickerOutcome, MediaError> {
            self.launches.lock().unwrap().push((source, *options));
            self.outcome.clone().map_err(MediaError::platform)
        }

        fn advise(&self, message: &str) {
            self.advisories.lock().unwrap().push(message.to_string());
        }
    }

    fn acquirer(platform: &Arc<ScriptedPlatform>) -> MediaAcquirer<ScriptedPlatform> {
        MediaAcquirer::new(
            Arc::clone(platform),
            PickerOptions::default(),
            Arc::new(NoopObserver),
        )
    }

    fn picked(uris: &[&str]) -> PickerOutcome {
        PickerOutcome::Picked(uris.iter().map(|u| LocalHandle::new(*u)).collect())
    }

    #[tokio::test]
    async fn test_library_returns_first_asset() {
        let platform = ScriptedPlatform::new(
            Ok(PermissionStatus::Granted),
            Ok(picked(&["file:///a.jpg", "file:///b.jpg"])),
        );

        let handle = acquirer(&platform).acquire_from_library().await;

        assert_eq!(handle, Some(LocalHandle::new("file:///a.jpg")));
        let launches = platform.launches.lock().unwrap();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].0, MediaSource::Library);
        assert!(launches[0].1.allows_editing);
        assert_eq!(launches[0].1.aspect, (4, 3));
    }

    #[tokio::test]
    async fn test_configured_options_reach_picker() {
        let platform = ScriptedPlatform::new(
            Ok(PermissionStatus::Granted),
            Ok(picked(&["file:///a.jpg"])),
        );
        let options = PickerOptions::default()
            .with_quality(0.5)
            .with_aspect(1, 1)
            .with_editing(false);
        let acquirer = MediaAcquirer::new(Arc::clone(&platform), options, Arc::new(NoopObserver));

        assert_eq!(acquirer.options(), &options);
        acquirer.acquire_from_library().await;

        assert_eq!(platform.launches.lock().unwrap()[0].1, options);
    }

    #[tokio::test]
    async fn test_capture_uses_camera() {
        let platform = ScriptedPlatform::new(
            Ok(PermissionStatus::Granted),
            Ok(picked(&["file:///camera.jpg"])),
        );

        let handle = acquirer(&platform).acquire_from_capture().await;

        assert_eq!(handle, Some(LocalHandle::new("file:///camera.jpg")));
        assert_eq!(platform.launches.lock().unwrap()[0].0, MediaSource::Capture);
    }

    #[tokio::test]
    async fn test_cancellation_yields_none_without_advisory() {
        let platform =
            ScriptedPlatform::new(Ok(PermissionStatus::Granted), Ok(PickerOutcome::Cancelled));

        assert_eq!(acquirer(&platform).acquire_from_library().await, None);
        assert!(platform.advisories.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_asset_list_counts_as_cancellation() {
        let platform = ScriptedPlatform::new(Ok(PermissionStatus::Granted), Ok(picked(&[])));

        assert_eq!(acquirer(&platform).acquire_from_library().await, None);
    }

    #[tokio::test]
    async fn test_denied_permission_advises_and_skips_picker() {
        let platform =
            ScriptedPlatform::new(Ok(PermissionStatus::Denied), Ok(picked(&["file:///a.jpg"])));

        assert_eq!(acquirer(&platform).acquire_from_capture().await, None);
        assert_eq!(
            platform.advisories.lock().unwrap().as_slice(),
            [MediaSource::Capture.advisory().to_string()]
        );
        assert!(platform.launches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undetermined_permission_is_denial() {
        let platform = ScriptedPlatform::new(
            Ok(PermissionStatus::Undetermined),
            Ok(picked(&["file:///a.jpg"])),
        );

        let err = acquirer(&platform)
            .try_acquire(MediaSource::Library)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::PermissionDenied(MediaSource::Library)));
    }

    #[tokio::test]
    async fn test_platform_fault_yields_none_without_advisory() {
        let platform = ScriptedPlatform::new(Ok(PermissionStatus::Granted), Err("picker crashed"));

        assert_eq!(acquirer(&platform).acquire_from_library().await, None);
        assert!(platform.advisories.lock().unwrap().is_empty());
    }
}
