//! Link models
//!
//! [`EncryptedLink`] is the persisted row; [`DisplayLink`] is its decrypted,
//! client-only counterpart.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{LinkId, UserId};

/// Largest id a row may carry (largest integer a JSON number holds exactly)
pub const MAX_LINK_ID: i64 = (1 << 53) - 1;

/// Text shown in place of a field that could not be decrypted
pub const DECRYPTION_FAILED: &str = "Decryption failed";

/// A persisted link: ciphertext only, scoped by user identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedLink {
    /// Server-assigned id
    pub id: LinkId,
    /// Identifier of the owning password
    pub user_id: UserId,
    /// Sealed title token
    pub encrypted_title: String,
    /// Sealed URL token
    pub encrypted_url: String,
}

impl EncryptedLink {
    /// Validate that every field is present
    pub fn validate(&self) -> Result<(), LinkValidationError> {
        if !(1..=MAX_LINK_ID).contains(&self.id.value()) {
            return Err(LinkValidationError::IdOutOfRange(self.id));
        }
        if self.user_id.is_empty() {
            return Err(LinkValidationError::MissingUserId);
        }
        if self.encrypted_title.trim().is_empty() {
            return Err(LinkValidationError::MissingTitle);
        }
        if self.encrypted_url.trim().is_empty() {
            return Err(LinkValidationError::MissingUrl);
        }
        Ok(())
    }

    /// Check whether this row belongs to a user
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// A decrypted link held only in client memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLink {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    /// True when the row could not be decrypted with the session password
    pub failed: bool,
}

impl DisplayLink {
    /// A successfully decrypted link
    pub fn new(id: LinkId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            failed: false,
        }
    }

    /// Placeholder for a row that did not decrypt
    pub fn decryption_failed(id: LinkId) -> Self {
        Self {
            id,
            title: DECRYPTION_FAILED.to_string(),
            url: DECRYPTION_FAILED.to_string(),
            failed: true,
        }
    }
}

/// Validation errors for encrypted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValidationError {
    MissingUserId,
    MissingTitle,
    MissingUrl,
    DuplicateId(LinkId),
    IdOutOfRange(LinkId),
}

impl fmt::Display for LinkValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUserId => write!(f, "userId is required"),
            Self::MissingTitle => write!(f, "encryptedTitle is required"),
            Self::MissingUrl => write!(f, "encryptedUrl is required"),
            Self::DuplicateId(id) => write!(f, "duplicate link id {}", id),
            Self::IdOutOfRange(id) => {
                write!(f, "link id {} is outside 1..={}", id, MAX_LINK_ID)
            }
        }
    }
}

impl std::error::Error for LinkValidationError {}
