//! Session record storage
//!
//! One JSON document, read and written whole:
//! - Primary file: <data_dir>/pomodoro_data.json
//! - Backup:       <data_dir>/pomodoro_data.json.bak
//!
//! Every save first copies the current primary to the backup path, so the
//! backup always holds the second-most-recent save. Loading never fails
//! the application: an unreadable primary falls back to the backup, and an
//! unreadable backup falls back to a zero-valued default record.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::record::SessionRecord;

const DATA_FILE: &str = "pomodoro_data.json";

/// Errors surfaced to the user when a save fails. In-memory state is
/// untouched; the next save trigger retries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write session data: {0}")]
    Unwritable(#[from] std::io::Error),

    #[error("failed to encode session data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Session record store
pub struct SessionStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let path = data_dir.join(DATA_FILE);
        let backup_path = data_dir.join(format!("{}.bak", DATA_FILE));
        Ok(Self { path, backup_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Load the persisted record. Recovery order: primary, then backup,
    /// then defaults. Never fails.
    pub fn load(&self) -> SessionRecord {
        let mut record = match self.read_record(&self.path) {
            Some(record) => record,
            None => match self.read_record(&self.backup_path) {
                Some(record) => {
                    warn!(
                        "recovered session data from backup {}",
                        self.backup_path.display()
                    );
                    record
                }
                None => SessionRecord::default(),
            },
        };

        // Persisted settings may predate validation; never start with a
        // configuration the settings-change path would reject.
        if record.settings.validate().is_err() {
            warn!("persisted settings are invalid, using defaults");
            record.settings = Default::default();
        }

        record
    }

    fn read_record(&self, path: &Path) -> Option<SessionRecord> {
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("could not read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("could not parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist the record, rotating the previous file to the backup path
    /// first. The write goes through a temp file and rename so a crash
    /// mid-save cannot truncate the primary.
    pub fn save(&self, record: &SessionRecord) -> std::result::Result<(), StoreError> {
        if self.path.exists() {
            // A stale backup is better than a failed save
            if let Err(e) = fs::copy(&self.path, &self.backup_path) {
                warn!(
                    "could not refresh backup {}: {}",
                    self.backup_path.display(),
                    e
                );
            }
        }

        let content = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;
    use chrono::Utc;
    use std::env;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store(test_name: &str) -> (SessionStore, PathBuf) {
        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = env::temp_dir().join(format!(
            "pomodoro_test_{}_{}_{}",
            std::process::id(),
            test_name,
            counter
        ));
        let _ = fs::remove_dir_all(&temp_dir);
        let store = SessionStore::new(&temp_dir).unwrap();
        (store, temp_dir)
    }

    fn sample_record(total_sessions: u32) -> SessionRecord {
        let mut record = SessionRecord::default();
        for _ in 0..total_sessions {
            record.log_completion(Phase::Work, 25);
        }
        record.last_saved = Some(Utc::now());
        record
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let (store, temp_dir) = temp_store("missing");
        assert_eq!(store.load(), SessionRecord::default());
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, temp_dir) = temp_store("round_trip");

        let record = sample_record(3);
        store.save(&record).unwrap();

        assert_eq!(store.load(), record);
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_backup_holds_previous_save() {
        let (store, temp_dir) = temp_store("backup");

        let r1 = sample_record(1);
        let r2 = sample_record(2);
        store.save(&r1).unwrap();
        let r1_bytes = fs::read(store.path()).unwrap();
        store.save(&r2).unwrap();

        // Primary is R2, backup is a byte-identical copy of the R1 file
        assert_eq!(store.load(), r2);
        assert_eq!(fs::read(store.backup_path()).unwrap(), r1_bytes);
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_corrupt_primary_recovers_from_backup() {
        let (store, temp_dir) = temp_store("corrupt_primary");

        let r1 = sample_record(1);
        let r2 = sample_record(2);
        store.save(&r1).unwrap();
        store.save(&r2).unwrap();

        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), r1);
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_corrupt_primary_and_backup_fall_back_to_default() {
        let (store, temp_dir) = temp_store("corrupt_both");

        let r1 = sample_record(1);
        store.save(&r1).unwrap();
        store.save(&r1).unwrap();
        fs::write(store.path(), "garbage").unwrap();
        fs::write(store.backup_path(), "garbage").unwrap();

        assert_eq!(store.load(), SessionRecord::default());
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_invalid_persisted_settings_replaced_with_defaults() {
        let (store, temp_dir) = temp_store("bad_settings");

        let mut record = sample_record(2);
        record.settings.work_minutes = 0;
        store.save(&record).unwrap();

        let loaded = store.load();
        assert!(loaded.settings.validate().is_ok());
        // Statistics survive even when the settings do not
        assert_eq!(loaded.total_sessions, 2);
        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_first_save_creates_no_backup() {
        let (store, temp_dir) = temp_store("first_save");

        store.save(&sample_record(1)).unwrap();
        assert!(!store.backup_path().exists());
        let _ = fs::remove_dir_all(&temp_dir);
    }
}
