//! Session context for an unlocked vault
//!
//! A [`Session`] exists only between setting a master password and logging
//! out. It owns the field key and the derived user identifier; dropping it
//! wipes the key.

use std::fmt;

use tracing::debug;

use crate::crypto::{
    decrypt_field, derive_field_key, derive_user_id, encrypt_field, FieldKey, MasterPassword,
};
use crate::error::{VaultError, VaultResult};
use crate::models::{DisplayLink, EncryptedLink, UserId};

/// Key material and identity of the current vault session
pub struct Session {
    key: FieldKey,
    user_id: UserId,
}

impl Session {
    /// Start a session from a master password
    ///
    /// Rejects an empty password. No strength rules apply.
    pub fn new(password: MasterPassword) -> VaultResult<Self> {
        if password.is_empty() {
            return Err(VaultError::Validation("Master password cannot be empty".into()));
        }

        Ok(Self {
            key: derive_field_key(&password),
            user_id: derive_user_id(&password),
        })
    }

    /// Identifier scoping this session's rows
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Seal one field
    pub fn encrypt(&self, plaintext: &str) -> VaultResult<String> {
        encrypt_field(plaintext, &self.key)
    }

    /// Open one field
    pub fn decrypt(&self, token: &str) -> VaultResult<String> {
        decrypt_field(token, &self.key)
    }

    /// Decrypt a row for display
    ///
    /// If either field fails, both are replaced by the sentinel.
    pub fn decrypt_link(&self, link: &EncryptedLink) -> DisplayLink {
        let title = self.decrypt(&link.encrypted_title);
        let url = self.decrypt(&link.encrypted_url);

        match (title, url) {
            (Ok(title), Ok(url)) => DisplayLink::new(link.id, title, url),
            (Err(e), _) | (_, Err(e)) => {
                debug!(id = %link.id, error = %e, "link did not decrypt");
                DisplayLink::decryption_failed(link.id)
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user_id.short())
            .finish_non_exhaustive()
    }
}
