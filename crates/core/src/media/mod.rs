//! Local media acquisition and encoding.
//!
//! This module covers the device side of the image pipeline:
//! - Permission checks and picker/camera launch (`MediaAcquirer`)
//! - Reading a picked resource and decoding it for upload (`MediaEncoder`)
//! - The platform ports both rely on (`MediaPlatform`, `MediaReader`)

mod acquirer;
mod encoder;
mod error;
mod platform;
mod types;

pub use acquirer::MediaAcquirer;
pub use encoder::MediaEncoder;
pub use error::MediaError;
pub use platform::{FsMediaReader, MediaPlatform, MediaReader};
pub use types::{LocalHandle, MediaSource, PermissionStatus, PickerOptions, PickerOutcome};
