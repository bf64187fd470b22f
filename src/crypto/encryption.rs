//! AES-256-GCM field encryption/decryption
//!
//! Every link field is sealed on its own with a fresh random nonce and stored
//! as one base64 token: `version (1 byte) || nonce (12 bytes) || ciphertext+tag`.
//! Opening a token with a key from another password fails the GCM tag check.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{VaultError, VaultResult};

use super::key_derivation::FieldKey;

/// Current token format version
const FORMAT_VERSION: u8 = 1;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

/// Encrypt a single field into a base64 token
pub fn encrypt_field(plaintext: &str, key: &FieldKey) -> VaultResult<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Encryption failed: {}", e)))?;

    let mut token = Vec::with_capacity(1 + NONCE_SIZE + ciphertext.len());
    token.push(FORMAT_VERSION);
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(token))
}

/// Decrypt a base64 token produced by [`encrypt_field`]
///
/// Fails for a different key, a tampered token or a malformed encoding.
pub fn decrypt_field(token: &str, key: &FieldKey) -> VaultResult<String> {
    let raw = STANDARD
        .decode(token.trim())
        .map_err(|e| VaultError::Crypto(format!("Invalid ciphertext encoding: {}", e)))?;

    if raw.len() < 1 + NONCE_SIZE + TAG_SIZE {
        return Err(VaultError::Crypto(format!(
            "Ciphertext too short: {} bytes",
            raw.len()
        )));
    }

    let (version, rest) = raw.split_at(1);
    if version[0] != FORMAT_VERSION {
        return Err(VaultError::Crypto(format!(
            "Unsupported encryption version: {}",
            version[0]
        )));
    }

    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| {
            VaultError::Crypto("Decryption failed: invalid key or corrupted data".to_string())
        })?;

    String::from_utf8(plaintext)
        .map_err(|e| VaultError::Crypto(format!("Invalid UTF-8 in decrypted data: {}", e)))
}
