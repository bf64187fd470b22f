//! Business logic layer for Link Vault
//!
//! Services sit between the HTTP boundary and storage, enforcing validation
//! and per-user scoping.

pub mod link_store;

pub use link_store::{with_store, LinkStoreService};
