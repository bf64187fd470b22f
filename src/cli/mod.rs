//! CLI command handlers
//!
//! Bridges the clap argument parsing with the vault controller. The binary
//! picks a [`LinkApi`] (a remote server or the local data directory) and
//! hands it to the handlers here.

pub mod links;
pub mod shell;

pub use links::{handle_link_command, LinkCommands};
pub use shell::run_shell;

use std::sync::Arc;

use crate::client::{HttpLinkApi, LinkApi, LocalLinkApi, VaultController};
use crate::config::{paths::VaultPaths, settings::Settings};
use crate::crypto::MasterPassword;
use crate::display::format_notification;
use crate::error::{VaultError, VaultResult};
use crate::storage::Storage;

/// Environment variable holding the master password for non-interactive use
pub const PASSWORD_ENV: &str = "LINK_VAULT_PASSWORD";

/// Where the client sends its requests
#[derive(Debug, Clone)]
pub enum Target {
    /// A running link store server
    Remote(String),
    /// The local data directory, without a server
    Local,
}

impl Target {
    /// Resolve the target from CLI flags and settings
    pub fn resolve(local: bool, server: Option<String>, settings: &Settings) -> Self {
        if local {
            Self::Local
        } else {
            Self::Remote(server.unwrap_or_else(|| settings.server_url.clone()))
        }
    }

    /// Build the matching transport
    pub fn connect(
        &self,
        paths: &VaultPaths,
        settings: &Settings,
    ) -> VaultResult<Box<dyn LinkApi>> {
        match self {
            Self::Remote(url) => Ok(Box::new(HttpLinkApi::new(url.as_str())?)),
            Self::Local => {
                let storage = Storage::with_audit(paths.clone(), settings.audit_enabled)?;
                storage.load_all()?;
                Ok(Box::new(LocalLinkApi::new(Arc::new(storage))))
            }
        }
    }
}

/// Read the master password from the environment or prompt for it
pub fn read_password() -> VaultResult<MasterPassword> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(MasterPassword::from(password));
    }
    prompt_password("Master password: ")
}

/// Prompt for a password (hidden input)
pub fn prompt_password(prompt: &str) -> VaultResult<MasterPassword> {
    rpassword::prompt_password(prompt)
        .map(MasterPassword::from)
        .map_err(|e| VaultError::Io(format!("Failed to read password: {}", e)))
}

/// Print and clear pending notifications
///
/// Errors go to stderr. Returns the first error message, if any.
pub fn flush_notifications<A: LinkApi>(vault: &mut VaultController<A>) -> Option<String> {
    let mut first_error = None;
    for notification in vault.drain_notifications() {
        if notification.is_error() {
            eprintln!("{}", format_notification(&notification));
            first_error.get_or_insert(notification.message);
        } else {
            println!("{}", format_notification(&notification));
        }
    }
    first_error
}
