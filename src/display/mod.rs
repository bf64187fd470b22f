//! Display formatting for terminal output

pub mod links;

pub use links::{format_audit_log, format_link_details, format_link_list, format_notification};
