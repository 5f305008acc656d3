//! Snapshot persisted as one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, warn};

use super::Persistence;
use crate::error::StorageError;
use crate::snapshot::Snapshot;

/// Whole-snapshot JSON file.
///
/// Every save rewrites the file. The new content goes to a sibling temp
/// file first and is renamed over the old one, so a crash mid-write leaves
/// the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), habits = snapshot.habits.len(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    /// Rename the file to `<name>.corrupt-<UTC timestamp>` next to it.
    fn quarantine(&mut self, at: DateTime<FixedOffset>) -> Result<Option<PathBuf>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let stamp = at.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ");
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{stamp}"));
        let backup = self.path.with_file_name(name);

        fs::rename(&self.path, &backup).map_err(|e| self.io_error(e))?;
        warn!(path = %self.path.display(), backup = %backup.display(), "unreadable snapshot moved aside");
        Ok(Some(backup))
    }
}
