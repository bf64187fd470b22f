//! Audit logging for the link store
//!
//! Records every add, delete and whole-collection replacement in an
//! append-only JSONL file next to the link data.
//!
//! - `AuditEntry`: one operation with timestamp, link id and abbreviated user
//!   identifier.
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
