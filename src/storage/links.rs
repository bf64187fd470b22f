//! Link repository for JSON storage
//!
//! Keeps the link table in memory and persists it to links.json. Every
//! mutation builds the new table, writes it atomically, and only then swaps
//! it into memory, so a failed write leaves both copies unchanged.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::models::{EncryptedLink, LinkId, LinkValidationError, UserId, MAX_LINK_ID};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of links.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTable {
    /// Next id to hand out
    #[serde(default = "default_next_id")]
    pub next_id: i64,
    /// All rows in insertion order
    #[serde(default)]
    pub links: Vec<EncryptedLink>,
}

fn default_next_id() -> i64 {
    1
}

impl Default for LinkTable {
    fn default() -> Self {
        Self {
            next_id: default_next_id(),
            links: Vec::new(),
        }
    }
}

impl LinkTable {
    /// Smallest id that is above every stored row and the current counter
    fn next_free_id(&self) -> Result<i64, VaultError> {
        Ok(self.next_id.max(id_after(&self.links)?))
    }
}

/// One past the highest id in `links`, or 1 for an empty slice
fn id_after(links: &[EncryptedLink]) -> Result<i64, VaultError> {
    let max_id = links.iter().map(|l| l.id.value()).max().unwrap_or(0);
    max_id.checked_add(1).ok_or_else(id_space_exhausted)
}

fn id_space_exhausted() -> VaultError {
    VaultError::Storage("Link id space exhausted".into())
}

/// Repository for encrypted link persistence
pub struct LinkRepository {
    path: PathBuf,
    data: RwLock<LinkTable>,
}

impl LinkRepository {
    /// Create a new link repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(LinkTable::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LinkTable>, VaultError> {
        self.data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LinkTable>, VaultError> {
        self.data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load links from disk, replacing the in-memory table
    pub fn load(&self) -> Result<(), VaultError> {
        let mut table: LinkTable = read_json(&self.path)?;
        table.next_id = table.next_free_id()?;

        let mut data = self.write()?;
        *data = table;
        Ok(())
    }

    /// All rows for one user, newest id first
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<EncryptedLink>, VaultError> {
        let data = self.read()?;
        let mut links: Vec<_> = data
            .links
            .iter()
            .filter(|l| l.is_owned_by(user_id))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    /// Every row, in insertion order
    pub fn list_all(&self) -> Result<Vec<EncryptedLink>, VaultError> {
        Ok(self.read()?.links.clone())
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<usize, VaultError> {
        Ok(self.read()?.links.len())
    }

    /// Insert a new row and return it with its assigned id
    pub fn insert(
        &self,
        user_id: UserId,
        encrypted_title: String,
        encrypted_url: String,
    ) -> Result<EncryptedLink, VaultError> {
        let mut data = self.write()?;

        let id = data.next_free_id()?;
        if id > MAX_LINK_ID {
            return Err(id_space_exhausted());
        }
        let link = EncryptedLink {
            id: LinkId::new(id),
            user_id,
            encrypted_title,
            encrypted_url,
        };

        let mut updated = data.clone();
        updated.links.push(link.clone());
        updated.next_id = id.checked_add(1).ok_or_else(id_space_exhausted)?;

        write_json_atomic(&self.path, &updated)?;
        *data = updated;

        Ok(link)
    }

    /// Delete the row matching both `id` and `user_id`
    ///
    /// Returns whether a row was removed. A miss writes nothing.
    pub fn delete(&self, id: LinkId, user_id: &UserId) -> Result<bool, VaultError> {
        let mut data = self.write()?;

        let Some(pos) = data
            .links
            .iter()
            .position(|l| l.id == id && l.is_owned_by(user_id))
        else {
            return Ok(false);
        };

        let mut updated = data.clone();
        updated.links.remove(pos);

        write_json_atomic(&self.path, &updated)?;
        *data = updated;

        Ok(true)
    }

    /// Replace the whole table with `links`
    ///
    /// Rows are validated before anything is written; the counter never moves
    /// backwards so ids are not reused. Returns the previous row count.
    pub fn replace_all(&self, links: Vec<EncryptedLink>) -> Result<usize, VaultError> {
        validate_table(&links).map_err(|e| VaultError::Validation(e.to_string()))?;
        let candidate = id_after(&links)?;

        let mut data = self.write()?;
        let previous = data.links.len();

        let updated = LinkTable {
            next_id: data.next_id.max(candidate),
            links,
        };

        write_json_atomic(&self.path, &updated)?;
        *data = updated;

        Ok(previous)
    }
}

fn validate_table(links: &[EncryptedLink]) -> Result<(), LinkValidationError> {
    let mut seen = std::collections::HashSet::new();
    for link in links {
        link.validate()?;
        if !seen.insert(link.id) {
            return Err(LinkValidationError::DuplicateId(link.id));
        }
    }
    Ok(())
}
