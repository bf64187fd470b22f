//! Core data models for Link Vault
//!
//! This module contains the persisted ciphertext rows, their decrypted
//! display form, identifiers and the HTTP wire bodies.

pub mod api;
pub mod ids;
pub mod link;

pub use api::{
    AddLinkRequest, AddLinkResponse, DeleteLinkQuery, ErrorResponse, ListLinksQuery,
    MessageResponse,
};
pub use ids::{LinkId, UserId};
pub use link::{
    DisplayLink, EncryptedLink, LinkValidationError, DECRYPTION_FAILED, MAX_LINK_ID,
};
