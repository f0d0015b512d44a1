//! Shared identifiers and configuration for Recetario.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
