//! Link store service
//!
//! Server-side business logic over encrypted rows: validation, per-user
//! scoping, persistence and auditing. The service never sees plaintext.

use std::sync::Arc;

use tracing::{debug, info};

use crate::audit::AuditEntry;
use crate::error::{VaultError, VaultResult};
use crate::models::{EncryptedLink, LinkId, UserId};
use crate::storage::Storage;

/// Service for the per-user link store
pub struct LinkStoreService<'a> {
    storage: &'a Storage,
}

fn require(value: &str, field: &str) -> VaultResult<()> {
    if value.trim().is_empty() {
        return Err(VaultError::missing_field(field));
    }
    Ok(())
}

/// Run `f` against the store on the blocking thread pool
///
/// Storage calls take a std lock and do synchronous file I/O, so async
/// callers go through here instead of calling the service inline.
pub async fn with_store<T, F>(storage: Arc<Storage>, f: F) -> VaultResult<T>
where
    T: Send + 'static,
    F: FnOnce(&LinkStoreService<'_>) -> VaultResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&LinkStoreService::new(&storage)))
        .await
        .map_err(|e| VaultError::Storage(format!("Store task failed: {}", e)))?
}

impl<'a> LinkStoreService<'a> {
    /// Create a new link store service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All rows for `user_id`, newest first
    pub fn list(&self, user_id: &UserId) -> VaultResult<Vec<EncryptedLink>> {
        require(user_id.as_str(), "userId")?;

        let links = self.storage.links.list_for_user(user_id)?;
        debug!(user = user_id.short(), count = links.len(), "listed links");
        Ok(links)
    }

    /// Store a new encrypted row and return it with its assigned id
    pub fn add(
        &self,
        user_id: UserId,
        encrypted_title: String,
        encrypted_url: String,
    ) -> VaultResult<EncryptedLink> {
        require(user_id.as_str(), "userId")?;
        require(&encrypted_title, "encryptedTitle")?;
        require(&encrypted_url, "encryptedUrl")?;

        let link = self
            .storage
            .links
            .insert(user_id, encrypted_title, encrypted_url)?;

        self.storage.record(AuditEntry::create(link.id, &link.user_id));
        info!(id = %link.id, user = link.user_id.short(), "link added");

        Ok(link)
    }

    /// Delete the row matching both `id` and `user_id`
    ///
    /// A missing or foreign row is not an error; the return value only says
    /// whether something was removed.
    pub fn delete(&self, id: LinkId, user_id: &UserId) -> VaultResult<bool> {
        require(user_id.as_str(), "userId")?;

        let removed = self.storage.links.delete(id, user_id)?;
        if removed {
            self.storage.record(AuditEntry::delete(id, user_id));
            info!(id = %id, user = user_id.short(), "link deleted");
        } else {
            debug!(id = %id, user = user_id.short(), "delete matched no row");
        }

        Ok(removed)
    }

    /// Every row of every user
    pub fn list_all(&self) -> VaultResult<Vec<EncryptedLink>> {
        self.storage.links.list_all()
    }

    /// Replace the whole collection in one atomic write
    pub fn replace_all(&self, links: Vec<EncryptedLink>) -> VaultResult<()> {
        let current = links.len();
        let previous = self.storage.links.replace_all(links)?;

        self.storage.record(AuditEntry::replace(previous, current));
        info!(previous, current, "link collection replaced");

        Ok(())
    }
}
