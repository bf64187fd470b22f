//! Append-only JSONL audit log

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{VaultError, VaultResult};

use super::entry::AuditEntry;

/// Appends [`AuditEntry`] lines to a file and reads them back
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a JSON line
    pub fn log(&self, entry: &AuditEntry) -> VaultResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| VaultError::Io(format!("Failed to open audit log: {}", e)))?;

        // One write call per entry keeps concurrent appends line-atomic
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| VaultError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every entry, oldest first
    ///
    /// A missing file is an empty log. Lines that do not parse are skipped
    /// with a warning.
    pub fn read_all(&self) -> VaultResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> VaultResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count.min(1024));
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn for_each_entry(&self, mut f: impl FnMut(AuditEntry)) -> VaultResult<()> {
        let file = match fs::File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(VaultError::Io(format!("Failed to open audit log: {}", e))),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.map_err(|e| VaultError::Io(format!("Failed to read audit log: {}", e)))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => f(entry),
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable audit entry"),
            }
        }
        Ok(())
    }
}
