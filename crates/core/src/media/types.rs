//! Media types.

use std::fmt;
use std::path::PathBuf;

use recetario_shared::config::MediaSettings;
use serde::{Deserialize, Serialize};

/// Where a picture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaSource {
    /// The device photo library.
    Library,
    /// The device camera.
    Capture,
}

impl MediaSource {
    /// Message shown to the user when access is refused.
    #[must_use]
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Library => "Photo library access is needed to choose a recipe picture",
            Self::Capture => "Camera access is needed to take a recipe picture",
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Library => "photo library",
            Self::Capture => "camera",
        })
    }
}

/// Result of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Access granted.
    Granted,
    /// Access refused.
    Denied,
    /// The user has not decided yet and the prompt was dismissed.
    Undetermined,
}

/// Opaque reference to an image available only on this device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalHandle(String);

impl LocalHandle {
    /// Wrap a platform URI such as `file:///…/photo.jpg`.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Borrow the URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path the URI points to.
    #[must_use]
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0))
    }
}

impl fmt::Display for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the native picker or camera returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The user backed out.
    Cancelled,
    /// One or more assets were chosen, first one wins.
    Picked(Vec<LocalHandle>),
}

/// Options handed to the native picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    /// Offer the interactive crop step.
    pub allows_editing: bool,
    /// Crop aspect ratio as `(width, height)`.
    pub aspect: (u32, u32),
    /// Compression quality in `0.0..=1.0`.
    pub quality: f32,
}

impl PickerOptions {
    /// Default compression quality.
    pub const DEFAULT_QUALITY: f32 = 0.8;
    /// Default crop aspect ratio.
    pub const DEFAULT_ASPECT: (u32, u32) = (4, 3);

    /// Set the compression quality, clamped to `0.0..=1.0`.
    ///
    /// NaN and infinities fall back to [`Self::DEFAULT_QUALITY`].
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = if quality.is_finite() {
            quality.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_QUALITY
        };
        self
    }

    /// Set the crop aspect ratio.
    #[must_use]
    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        self.aspect = (width, height);
        self
    }

    /// Enable or disable the crop step.
    #[must_use]
    pub fn with_editing(mut self, allows_editing: bool) -> Self {
        self.allows_editing = allows_editing;
        self
    }
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: Self::DEFAULT_ASPECT,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

impl From<&MediaSettings> for PickerOptions {
    fn from(settings: &MediaSettings) -> Self {
        Self::default()
            .with_quality(settings.quality)
            .with_aspect(settings.aspect_width, settings.aspect_height)
            .with_editing(settings.allows_editing)
    }
}
