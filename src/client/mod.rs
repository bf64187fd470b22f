//! Client side of the vault
//!
//! Everything that touches plaintext lives here. The store and the server
//! only handle ciphertext and derived user identifiers.

pub mod api;
pub mod controller;
pub mod notification;
pub mod session;

pub use api::{HttpLinkApi, LinkApi, LocalLinkApi};
pub use controller::VaultController;
pub use notification::{Notification, NotificationQueue, NotificationType};
pub use session::Session;
