//! Core recipe pipeline for Recetario.
//!
//! This crate turns a locally picked photo into durably stored, publicly
//! addressable media and coordinates it with the recipe metadata write.
//! The structured store, the object bucket and the device media APIs are
//! reached only through the traits defined here.
//!
//! # Modules
//!
//! - `media` - Acquiring local image handles and encoding them for transfer
//! - `storage` - Uploading payloads to an object bucket under unique keys
//! - `recipe` - Recipe CRUD orchestrating the media pipeline
//! - `observability` - Pipeline checkpoint reporting

pub mod media;
pub mod observability;
pub mod recipe;
pub mod storage;
