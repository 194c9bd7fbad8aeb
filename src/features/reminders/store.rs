//! Durable reminder store
//!
//! One JSON file holding the full reminder set, rewritten on every append.
//! Reminder counts are small, so the full-snapshot write is the crash
//! consistency mechanism: a reader only ever sees the previous complete set
//! or the new complete set, never a partial append.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info};

use super::model::Reminder;
use crate::core::ChimeError;

/// Append-only collection of reminder records backed by a JSON snapshot file.
#[derive(Debug)]
pub struct ReminderStore {
    path: PathBuf,
    records: Mutex<Vec<Reminder>>,
}

impl ReminderStore {
    /// Opens the store at `path`, reading any previously persisted records.
    ///
    /// A missing file means no prior state and yields an empty store. A file
    /// that exists but cannot be parsed is [`ChimeError::StorageCorrupt`];
    /// callers must treat that as fatal rather than proceed with an empty
    /// reminder set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ChimeError> {
        let path = path.into();
        let records = read_snapshot(&path)?;
        if !records.is_empty() {
            info!(
                "Loaded {} reminders from {}",
                records.len(),
                path.display()
            );
        }
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Returns all records in append order.
    pub fn load_all(&self) -> Vec<Reminder> {
        self.lock().clone()
    }

    /// Appends one record, durably persisting the full updated set before
    /// returning. Concurrent appends are serialized by the internal lock so
    /// the snapshot rewrite never loses an update.
    pub fn append(&self, reminder: &Reminder) -> Result<(), ChimeError> {
        let mut records = self.lock();
        records.push(reminder.clone());
        write_snapshot(&self.path, &records)?;
        debug!(
            "Persisted reminder {} ({} records total)",
            reminder.id,
            records.len()
        );
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Reminder>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_snapshot(path: &Path) -> Result<Vec<Reminder>, ChimeError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| ChimeError::StorageCorrupt(format!("{}: {e}", path.display())))
}

/// Write-to-temp, fsync, then atomic rename. A crash mid-write leaves the
/// previous snapshot intact.
fn write_snapshot(path: &Path, records: &[Reminder]) -> Result<(), ChimeError> {
    let json = serde_json::to_vec_pretty(records)?;
    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(&json)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
