//! Storage layer for Link Vault
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit trail of link mutations.

pub mod file_io;
pub mod links;

pub use file_io::{read_json, write_json_atomic};
pub use links::{LinkRepository, LinkTable};

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::VaultPaths;
use crate::error::VaultError;

/// Main storage coordinator
pub struct Storage {
    paths: VaultPaths,
    pub links: LinkRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with auditing enabled
    pub fn new(paths: VaultPaths) -> Result<Self, VaultError> {
        Self::with_audit(paths, true)
    }

    /// Create a new Storage instance, optionally writing the audit log
    pub fn with_audit(paths: VaultPaths, audit_enabled: bool) -> Result<Self, VaultError> {
        paths.ensure_directories()?;

        Ok(Self {
            links: LinkRepository::new(paths.links_file()),
            audit: audit_enabled.then(|| AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), VaultError> {
        self.links.load()
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append an audit entry
    ///
    /// The mutation has already been persisted at this point, so a failed
    /// audit write is logged rather than returned.
    pub fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, operation = %entry.operation, "failed to write audit entry");
            }
        }
    }
}
