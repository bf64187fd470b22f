//! Custom error types for Link Vault
//!
//! This module defines the error hierarchy for the vault using thiserror.
//! Callers branch on [`ErrorKind`] rather than on message text.

use thiserror::Error;

/// Broad classification of a [`VaultError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input (400-equivalent)
    Validation,
    /// Persistence fault (500-equivalent)
    Storage,
    /// Encryption or decryption failure
    Crypto,
    /// The request never produced a usable response
    Transport,
    /// No master password has been set for this session
    Session,
    /// Configuration or local environment problem
    Config,
}

/// The main error type for Link Vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for requests and models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encryption errors
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Network errors talking to the link store
    #[error("Transport error: {0}")]
    Transport(String),

    /// The link store answered with a non-success status
    #[error("Link store returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Operation requires a master password
    #[error("Vault is locked: {0}")]
    Locked(String),
}

impl VaultError {
    /// Error for an operation attempted before a password was set
    pub fn locked() -> Self {
        Self::Locked("set a master password first".into())
    }

    /// Error for a required field that is absent or blank
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{} is required", field))
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Api { status, .. } if (400..500).contains(status) => ErrorKind::Validation,
            Self::Api { .. } | Self::Storage(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Storage,
            Self::Crypto(_) => ErrorKind::Crypto,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Locked(_) => ErrorKind::Session,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias for Link Vault operations
pub type VaultResult<T> = Result<T, VaultError>;
