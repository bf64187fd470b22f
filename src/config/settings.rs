//! User settings for Link Vault
//!
//! Holds the server bind address, the URL clients talk to, the request body
//! limit and whether the audit log is written.

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::error::VaultError;
use crate::storage::write_json_atomic;

/// Settings shared by the `serve` side and the client side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Address the link store listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Base URL clients use to reach the link store
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Whether mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            bind_address: default_bind_address(),
            server_url: default_server_url(),
            max_body_bytes: default_max_body_bytes(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| VaultError::Config(format!("Failed to save settings: {}", e)))
    }
}
