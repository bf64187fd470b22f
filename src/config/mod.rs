//! Configuration module for Link Vault
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
