//! Storage configuration types.

use recetario_shared::config::{StorageBackend, StorageSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Supabase Storage, Cloudflare R2, AWS S3
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory (tests only)
    Memory,
}

impl StorageProvider {
    /// Create S3-compatible provider (Supabase Storage, Cloudflare R2, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Create in-memory provider.
    #[must_use]
    pub const fn memory() -> Self {
        Self::Memory
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Where objects land: the bucket name, the root directory, or `memory`.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL that public locators are built from.
    pub public_base_url: String,
    /// Content type stamped on every upload.
    pub content_type: String,
    /// Cache lifetime in seconds advertised for uploaded objects.
    pub cache_max_age_secs: u64,
}

impl StorageConfig {
    /// Default content type: recipe photos are JPEG.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "image/jpeg";
    /// Default cache lifetime: 1 hour.
    pub const DEFAULT_CACHE_MAX_AGE: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider, public_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.into(),
            content_type: Self::DEFAULT_CONTENT_TYPE.to_string(),
            cache_max_age_secs: Self::DEFAULT_CACHE_MAX_AGE,
        }
    }

    /// Build the storage config from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting the selected backend needs is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.backend {
            StorageBackend::S3 => StorageProvider::s3(
                required(settings.endpoint.as_ref(), "storage.endpoint")?,
                &settings.bucket,
                required(settings.access_key_id.as_ref(), "storage.access_key_id")?,
                required(settings.secret_access_key.as_ref(), "storage.secret_access_key")?,
                &settings.region,
            ),
            StorageBackend::Fs => {
                StorageProvider::local_fs(required(settings.root.as_ref(), "storage.root")?)
            }
            StorageBackend::Memory => StorageProvider::memory(),
        };

        Ok(Self::new(provider, &settings.public_base_url)
            .with_content_type(&settings.content_type)
            .with_cache_max_age(settings.cache_max_age_secs))
    }

    /// Set the upload content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the cache lifetime.
    #[must_use]
    pub fn with_cache_max_age(mut self, secs: u64) -> Self {
        self.cache_max_age_secs = secs;
        self
    }

    /// Cache-Control header value sent with uploads.
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("max-age={}", self.cache_max_age_secs)
    }

    /// Public URL of the object stored under `key`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

fn required<'a>(value: Option<&'a String>, name: &str) -> Result<&'a str, StorageError> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorageError::configuration(format!("{name} is required")))
}
