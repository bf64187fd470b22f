//! Secure memory handling for the master password
//!
//! The password lives only inside a [`MasterPassword`], which zeroizes its
//! buffer on drop and never prints its contents.

use std::fmt;

use zeroize::Zeroizing;

/// The session's master password
///
/// Contents are wiped when the value is dropped. `Debug` and `Display` only
/// reveal the length.
pub struct MasterPassword {
    inner: Zeroizing<String>,
}

impl MasterPassword {
    /// Wrap a password string
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Get the password contents
    pub fn expose(&self) -> &str {
        self.inner.as_str()
    }

    /// Get the password bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for MasterPassword {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MasterPassword {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterPassword")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
