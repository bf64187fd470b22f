//! Link Vault - client-side encrypted link storage
//!
//! Titles and URLs are encrypted on the client with a key derived from a
//! master password. The store only keeps ciphertext rows, scoped by a user
//! identifier derived from the same password with a different label.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Rows, identifiers and API bodies
//! - `crypto`: Key and identifier derivation, field encryption
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging of store mutations
//! - `services`: Link store business logic
//! - `server`: HTTP API over the link store
//! - `client`: Vault controller and transports
//! - `cli`, `display`: Command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use link_vault::client::{HttpLinkApi, VaultController};
//! use link_vault::crypto::MasterPassword;
//!
//! let mut vault = VaultController::new(HttpLinkApi::new("http://127.0.0.1:3000")?);
//! vault.set_password(MasterPassword::new("abc123")).await?;
//! vault.add_link("Bank", "https://bank.example").await?;
//! ```

pub mod audit;
pub mod cli;
pub mod client;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{ErrorKind, VaultError, VaultResult};
