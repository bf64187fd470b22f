//! Vault controller
//!
//! Owns the state behind a vault front end: the session, the fetched
//! ciphertext rows, their decrypted form and which row is revealed. Every
//! field is encrypted here before it reaches a [`LinkApi`]; the store only
//! ever sees ciphertext and the derived user identifier.
//!
//! Store failures become an error notification as well as an error result,
//! and leave the current state untouched.

use tracing::{debug, info, warn};

use super::api::LinkApi;
use super::notification::{Notification, NotificationQueue};
use super::session::Session;
use crate::crypto::MasterPassword;
use crate::error::{VaultError, VaultResult};
use crate::models::{DisplayLink, EncryptedLink, LinkId, UserId};

pub const FETCH_FAILED: &str = "Failed to fetch links from server.";
pub const ADD_FAILED: &str = "Failed to add link.";
pub const DELETE_FAILED: &str = "Failed to delete link.";

/// State and operations of one vault front end
pub struct VaultController<A: LinkApi> {
    api: A,
    session: Option<Session>,
    encrypted: Vec<EncryptedLink>,
    decrypted: Vec<DisplayLink>,
    visible: Option<LinkId>,
    notifications: NotificationQueue,
}

impl<A: LinkApi> VaultController<A> {
    /// Create a locked controller
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: None,
            encrypted: Vec::new(),
            decrypted: Vec::new(),
            visible: None,
            notifications: NotificationQueue::new(),
        }
    }

    /// Unlock with `password` and fetch its links
    ///
    /// Replaces any previous session. A failed fetch is reported through
    /// notifications only; the vault stays unlocked and empty.
    pub async fn set_password(&mut self, password: MasterPassword) -> VaultResult<()> {
        let session = Session::new(password)?;
        info!(user = %session.user_id().short(), "vault unlocked");

        self.clear();
        self.session = Some(session);
        // fetch_links already logged the failure and queued a notification
        if let Err(e) = self.fetch_links().await {
            debug!(error = %e, "unlocked with an empty vault");
        }
        Ok(())
    }

    /// Reload rows from the store and decrypt them
    ///
    /// On failure the previous rows stay.
    pub async fn fetch_links(&mut self) -> VaultResult<()> {
        let session = self.session.as_ref().ok_or_else(VaultError::locked)?;

        match self.api.list(session.user_id()).await {
            Ok(rows) => {
                let decrypted = rows.iter().map(|row| session.decrypt_link(row)).collect();
                debug!(count = rows.len(), "links refreshed");
                self.encrypted = rows;
                self.decrypted = decrypted;
                if let Some(id) = self.visible {
                    if !self.decrypted.iter().any(|l| l.id == id) {
                        self.visible = None;
                    }
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch links");
                self.notifications.push(Notification::error(FETCH_FAILED));
                Err(e)
            }
        }
    }

    /// Encrypt and store a new link
    ///
    /// Both fields are trimmed and must be non-empty. The new link goes to
    /// the front of the list.
    pub async fn add_link(&mut self, title: &str, url: &str) -> VaultResult<LinkId> {
        let session = self.session.as_ref().ok_or_else(VaultError::locked)?;

        let title = title.trim();
        let url = url.trim();
        if title.is_empty() {
            return Err(VaultError::Validation("Title is required".into()));
        }
        if url.is_empty() {
            return Err(VaultError::Validation("URL is required".into()));
        }

        let encrypted_title = session.encrypt(title)?;
        let encrypted_url = session.encrypt(url)?;

        let id = match self
            .api
            .add(session.user_id(), &encrypted_title, &encrypted_url)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "failed to add link");
                self.notifications.push(Notification::error(ADD_FAILED));
                return Err(e);
            }
        };

        self.encrypted.insert(
            0,
            EncryptedLink {
                id,
                user_id: session.user_id().clone(),
                encrypted_title,
                encrypted_url,
            },
        );
        self.decrypted.insert(0, DisplayLink::new(id, title, url));
        self.notifications
            .push(Notification::success(format!("Added \"{}\"", title)));

        Ok(id)
    }

    /// Delete a link of the current user
    ///
    /// The local lists only change once the store has accepted the delete.
    pub async fn delete_link(&mut self, id: LinkId) -> VaultResult<()> {
        let session = self.session.as_ref().ok_or_else(VaultError::locked)?;

        if let Err(e) = self.api.delete(id, session.user_id()).await {
            warn!(error = %e, %id, "failed to delete link");
            self.notifications.push(Notification::error(DELETE_FAILED));
            return Err(e);
        }

        self.encrypted.retain(|l| l.id != id);
        self.decrypted.retain(|l| l.id != id);
        if self.visible == Some(id) {
            self.visible = None;
        }
        self.notifications.push(Notification::success("Link deleted"));
        Ok(())
    }

    /// Reveal `id`, or hide it if it is already revealed
    ///
    /// Only one link is revealed at a time.
    pub fn toggle_visibility(&mut self, id: LinkId) {
        self.visible = if self.visible == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Lock the vault and forget every row
    pub fn logout(&mut self) {
        if self.session.is_some() {
            info!("vault locked");
        }
        self.session = None;
        self.clear();
    }

    fn clear(&mut self) {
        self.encrypted.clear();
        self.decrypted.clear();
        self.visible = None;
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_some()
    }

    /// True while no password has been set
    pub fn needs_password(&self) -> bool {
        !self.is_unlocked()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.session.as_ref().map(Session::user_id)
    }

    /// Decrypted links, newest first
    pub fn links(&self) -> &[DisplayLink] {
        &self.decrypted
    }

    /// Ciphertext rows as last fetched
    pub fn encrypted_links(&self) -> &[EncryptedLink] {
        &self.encrypted
    }

    pub fn link(&self, id: LinkId) -> Option<&DisplayLink> {
        self.decrypted.iter().find(|l| l.id == id)
    }

    /// Currently revealed link
    pub fn visible_link(&self) -> Option<LinkId> {
        self.visible
    }

    pub fn is_visible(&self, id: LinkId) -> bool {
        self.visible == Some(id)
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Take pending notifications, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
