//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Structured store configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Media picker configuration.
    #[serde(default)]
    pub media: MediaSettings,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

/// Object storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// S3-compatible service (Supabase Storage, Cloudflare R2, AWS S3).
    S3,
    /// Local filesystem directory.
    Fs,
    /// Process-local memory, contents vanish on exit.
    Memory,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Which backend to talk to.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Bucket that receives recipe photos.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// S3 endpoint URL.
    pub endpoint: Option<String>,
    /// S3 access key ID.
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    pub secret_access_key: Option<String>,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Root directory for the filesystem backend.
    pub root: Option<String>,
    /// Base URL under which uploaded objects are publicly readable.
    pub public_base_url: String,
    /// Content type stamped on every upload.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Cache lifetime advertised for uploaded objects.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
}

fn default_backend() -> StorageBackend {
    StorageBackend::S3
}

fn default_bucket() -> String {
    "recetas-fotos".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_content_type() -> String {
    "image/jpeg".to_string()
}

fn default_cache_max_age_secs() -> u64 {
    3600 // 1 hour
}

/// Media picker configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Compression quality handed to the platform picker, in `0.0..=1.0`.
    #[serde(default = "default_quality")]
    pub quality: f32,
    /// Crop aspect ratio width.
    #[serde(default = "default_aspect_width")]
    pub aspect_width: u32,
    /// Crop aspect ratio height.
    #[serde(default = "default_aspect_height")]
    pub aspect_height: u32,
    /// Whether the picker offers the interactive crop step.
    #[serde(default = "default_allows_editing")]
    pub allows_editing: bool,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            aspect_width: default_aspect_width(),
            aspect_height: default_aspect_height(),
            allows_editing: default_allows_editing(),
        }
    }
}

fn default_quality() -> f32 {
    0.8
}

fn default_aspect_width() -> u32 {
    4
}

fn default_aspect_height() -> u32 {
    3
}

fn default_allows_editing() -> bool {
    true
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RECETARIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        temp_env::with_vars(
            [
                ("RECETARIO__DATABASE__URL", Some("postgres://localhost/recetario")),
                (
                    "RECETARIO__STORAGE__PUBLIC_BASE_URL",
                    Some("https://cdn.example.com/recetas-fotos"),
                ),
                ("RUN_MODE", Some("test-defaults")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");

                assert_eq!(config.database.url, "postgres://localhost/recetario");
                assert_eq!(config.database.max_connections, 5);
                assert_eq!(config.storage.backend, StorageBackend::S3);
                assert_eq!(config.storage.bucket, "recetas-fotos");
                assert_eq!(config.storage.content_type, "image/jpeg");
                assert_eq!(config.storage.cache_max_age_secs, 3600);
                assert!((config.media.quality - 0.8).abs() < f32::EPSILON);
                assert_eq!(
                    (config.media.aspect_width, config.media.aspect_height),
                    (4, 3)
                );
                assert!(config.media.allows_editing);
            },
        );
    }

    #[test]
    fn test_load_reads_backend_override() {
        temp_env::with_vars(
            [
                ("RECETARIO__DATABASE__URL", Some("postgres://localhost/recetario")),
                ("RECETARIO__STORAGE__PUBLIC_BASE_URL", Some("file:///tmp/fotos")),
                ("RECETARIO__STORAGE__BACKEND", Some("fs")),
                ("RECETARIO__STORAGE__ROOT", Some("/tmp/fotos")),
                ("RUN_MODE", Some("test-override")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");

                assert_eq!(config.storage.backend, StorageBackend::Fs);
                assert_eq!(config.storage.root.as_deref(), Some("/tmp/fotos"));
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("RECETARIO__DATABASE__URL", None::<&str>),
                ("RECETARIO__STORAGE__PUBLIC_BASE_URL", Some("https://cdn.example.com")),
                ("RUN_MODE", Some("test-missing")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
