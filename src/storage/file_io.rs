//! JSON persistence helpers
//!
//! A write either fully replaces the target file or leaves it untouched: the
//! data goes to a sibling temp file, is synced, then renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::VaultError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> VaultError {
    VaultError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Sibling temp path for `path`, e.g. `links.json` -> `links.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read a JSON document, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<T, VaultError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the JSON form of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), VaultError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let tmp = temp_path(path);
    let result = write_synced(&tmp, data).and_then(|()| {
        fs::rename(&tmp, path).map_err(|e| storage_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_synced<T: Serialize>(tmp: &Path, data: &T) -> Result<(), VaultError> {
    let file = File::create(tmp).map_err(|e| storage_error("create", tmp, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", tmp, e))?;
    writer.flush().map_err(|e| storage_error("flush", tmp, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", tmp, e))
}
