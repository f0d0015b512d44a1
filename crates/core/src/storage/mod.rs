//! Object storage for recipe photos using Apache OpenDAL.
//!
//! Payloads are written once under a freshly generated key and never
//! overwritten. Every stored object is addressed by a public locator derived
//! from the configured base URL.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       ObjectStore trait                      │
//! │           upload(BinaryPayload) -> PublicLocator             │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      OpendalObjectStore                      │
//! │  ObjectKeyGenerator ─► op.write_with(key).if_not_exists()    │
//! ├──────────────────────────────────────────────────────────────┤
//! │           S3-compatible  │  Local filesystem  │  Memory      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod key;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use key::{ObjectKeyGenerator, TimestampKeyGenerator};
pub use service::{BinaryPayload, ObjectStore, OpendalObjectStore, PublicLocator};
