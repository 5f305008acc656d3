mod config;
mod json_file;

pub use config::{Config, NotificationsConfig, ReportsConfig, StorageConfig};
pub use json_file::JsonFileStore;

use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

use crate::error::StorageError;
use crate::snapshot::Snapshot;

/// Durable home of the snapshot.
pub trait Persistence {
    /// Read the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;

    /// Overwrite the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError>;

    /// Move an unreadable snapshot out of the way so the next save cannot
    /// overwrite it. Returns where it was moved, if anywhere.
    fn quarantine(&mut self, _at: DateTime<FixedOffset>) -> Result<Option<PathBuf>, StorageError> {
        Ok(None)
    }
}

/// In-memory persistence, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub snapshot: Option<Snapshot>,
    pub saves: usize,
    /// When set, every save fails.
    pub fail_saves: bool,
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "save disabled"),
            });
        }
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `HABITS_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/habits`, or `~/.config/habits-dev` with `HABITS_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HABITS_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habits-dev")
            } else {
                base_dir.join("habits")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert!(store.load().unwrap().is_none());

        let snapshot = Snapshot {
            points: 30,
            ..Snapshot::default()
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn memory_store_can_fail() {
        let mut store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };
        assert!(store.save(&Snapshot::default()).is_err());
        assert!(store.snapshot.is_none());
    }
}
