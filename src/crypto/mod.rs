//! Cryptographic functions for Link Vault
//!
//! Provides per-field AES-256-GCM encryption keyed from the master password,
//! and derivation of the row-scoping user identifier.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt_field, encrypt_field};
pub use key_derivation::{derive_field_key, derive_user_id, FieldKey};
pub use secure_memory::MasterPassword;
