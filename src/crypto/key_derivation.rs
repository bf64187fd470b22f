//! Key and identifier derivation from the master password
//!
//! Both values come from a single SHA-256 pass over the password, each with
//! its own domain label. No salt and no work factor: a password yields the
//! same identifier on every device.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::secure_memory::MasterPassword;
use crate::models::UserId;

const CIPHER_KEY_LABEL: &[u8] = b"link-vault/cipher-key/v1\0";
const USER_ID_LABEL: &[u8] = b"link-vault/user-id/v1\0";

/// A 256-bit field encryption key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct FieldKey {
    key: [u8; 32],
}

impl FieldKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

fn labelled_digest(label: &[u8], password: &MasterPassword) -> [u8; 32] {
    Sha256::new()
        .chain_update(label)
        .chain_update(password.as_bytes())
        .finalize()
        .into()
}

/// Derive the AES-256 key used for every field of this password's links
pub fn derive_field_key(password: &MasterPassword) -> FieldKey {
    FieldKey {
        key: labelled_digest(CIPHER_KEY_LABEL, password),
    }
}

/// Derive the row-scoping user identifier (64 lowercase hex characters)
pub fn derive_user_id(password: &MasterPassword) -> UserId {
    let mut digest = labelled_digest(USER_ID_LABEL, password);
    let id = UserId::new(hex::encode(digest));
    digest.zeroize();
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_stable() {
        let p = MasterPassword::new("abc123");
        assert_eq!(derive_user_id(&p), derive_user_id(&p));
        assert_eq!(derive_user_id(&p).as_str().len(), 64);
    }

    #[test]
    fn test_different_passwords_different_ids() {
        let a = derive_user_id(&MasterPassword::new("abc123"));
        let b = derive_user_id(&MasterPassword::new("wrong"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_password_same_key() {
        let p = MasterPassword::new("abc123");
        assert_eq!(derive_field_key(&p).as_bytes(), derive_field_key(&p).as_bytes());
    }

    #[test]
    fn test_user_id_never_reveals_key() {
        let p = MasterPassword::new("abc123");
        let key_hex = hex::encode(derive_field_key(&p).as_bytes());
        assert_ne!(derive_user_id(&p).as_str(), key_hex);
    }
}
