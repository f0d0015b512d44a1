//! Object store implementation using Apache OpenDAL.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use opendal::{Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use super::key::{ObjectKeyGenerator, TimestampKeyGenerator};

/// Raw bytes ready for network transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload(Bytes);

impl BinaryPayload {
    /// Wrap raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the underlying buffer.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Publicly resolvable URL of an uploaded object.
///
/// Issued once by the store and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicLocator(String);

impl PublicLocator {
    /// Wrap a URL the caller already holds.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Borrow the URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PublicLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uploads payloads to a namespaced bucket.
pub trait ObjectStore: Send + Sync {
    /// Store `payload` under a fresh key and return its public locator.
    ///
    /// Never overwrites: if the generated key is taken the upload fails
    /// with [`StorageError::NameCollision`].
    fn upload(
        &self,
        payload: BinaryPayload,
    ) -> impl Future<Output = Result<PublicLocator, StorageError>> + Send;
}

/// Object store backed by an OpenDAL operator.
pub struct OpendalObjectStore {
    operator: Operator,
    config: StorageConfig,
    keys: Arc<dyn ObjectKeyGenerator>,
}

impl OpendalObjectStore {
    /// Create a new object store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self {
            operator,
            config,
            keys: Arc::new(TimestampKeyGenerator::default()),
        })
    }

    /// Replace the object key generator.
    #[must_use]
    pub fn with_key_generator(mut self, keys: Arc<dyn ObjectKeyGenerator>) -> Self {
        self.keys = keys;
        self
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };

        Ok(operator)
    }

    /// Write `payload` under `key`, refusing to replace an existing object.
    ///
    /// Backends without conditional writes get an existence check first.
    async fn write_new(&self, key: &str, payload: BinaryPayload) -> Result<(), StorageError> {
        let capability = self.operator.info().full_capability();

        if !capability.write_with_if_not_exists {
            let taken = self
                .operator
                .exists(key)
                .await
                .map_err(|e| StorageError::from_opendal(key, &e))?;
            if taken {
                return Err(StorageError::name_collision(key));
            }
        }

        let mut write = self.operator.write_with(key, payload.into_bytes());
        if capability.write_with_content_type {
            write = write.content_type(&self.config.content_type);
        }
        if capability.write_with_cache_control {
            write = write.cache_control(&self.config.cache_control());
        }
        if capability.write_with_if_not_exists {
            write = write.if_not_exists(true);
        }

        write
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))?;

        Ok(())
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name, root directory or `memory`.
    #[must_use]
    pub fn location(&self) -> &str {
        self.config.provider.location()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl ObjectStore for OpendalObjectStore {
    async fn upload(&self, payload: BinaryPayload) -> Result<PublicLocator, StorageError> {
        let key = self.keys.generate();
        let size = payload.len();

        self.write_new(&key, payload).await?;
        debug!(key = %key, size, location = self.location(), "object uploaded");

        Ok(PublicLocator::new(self.config.public_url(&key)))
    }
}
