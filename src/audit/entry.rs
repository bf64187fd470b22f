//! Audit entry data structures
//!
//! An entry records what happened to which link and for which (abbreviated)
//! user identifier. Ciphertext is never recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LinkId, UserId};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A link was added
    Create,
    /// A link was deleted
    Delete,
    /// The whole collection was replaced
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Affected link, absent for whole-collection operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<LinkId>,

    /// First characters of the owning user identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Human-readable summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    /// Entry for an added link
    pub fn create(link_id: LinkId, user_id: &UserId) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            link_id: Some(link_id),
            user: Some(user_id.short().to_string()),
            summary: None,
        }
    }

    /// Entry for a deleted link
    pub fn delete(link_id: LinkId, user_id: &UserId) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            link_id: Some(link_id),
            user: Some(user_id.short().to_string()),
            summary: None,
        }
    }

    /// Entry for a whole-collection replacement
    pub fn replace(previous: usize, current: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Replace,
            link_id: None,
            user: None,
            summary: Some(format!("{} rows replaced by {}", previous, current)),
        }
    }

    /// Format this entry as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation
        );
        if let Some(id) = self.link_id {
            line.push_str(&format!(" link {}", id));
        }
        if let Some(user) = &self.user {
            line.push_str(&format!(" user {}", user));
        }
        if let Some(summary) = &self.summary {
            line.push_str(&format!(" ({})", summary));
        }
        line
    }
}
