//! File-backed state store.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use larder_core::LineItem;

use crate::error::StoreError;
use crate::schema::{self, PersistedState};
use crate::state_store::{StateSnapshot, StateStore};

/// Default state file location: `<platform data dir>/larder/state.json`.
pub fn default_state_path() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("larder").join("state.json")
}

fn lock_path_for(path: &Path) -> PathBuf {
    path.with_extension("lock")
}

/// Durable, file-backed state store.
///
/// `open` creates the document if it is absent and takes an OS-level
/// exclusive lock on a sidecar file for the lifetime of the handle; a second
/// open of the same path fails with [`StoreError::Locked`] immediately. The
/// lock is released on drop. Saves replace the document atomically (temp
/// file, flush, rename).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Option<File>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories and an initial
    /// empty document as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path_for(&path))?;
        match lock_file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                return Err(StoreError::Locked);
            }
            Err(e) => return Err(StoreError::Io(e)),
        }

        let store = Self {
            path,
            lock: Some(lock_file),
        };
        if !store.path.exists() {
            debug!(path = %store.path.display(), "initializing empty state document");
            store.write_document(&PersistedState::empty())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock early. Also happens on drop.
    pub fn release(&mut self) -> Result<(), StoreError> {
        if let Some(lock) = self.lock.take() {
            lock.unlock()?;
        }
        Ok(())
    }

    fn write_document(&self, state: &PersistedState) -> Result<(), StoreError> {
        let encoded = state.to_json()?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<StateSnapshot, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        let state = schema::parse_document(&text)?;

        let purchases = schema::decode_records(&state.purchases, "purchases");
        let submitted = schema::decode_records(&state.submitted, "submittedData");
        let mut rejected = purchases.rejected;
        rejected.extend(submitted.rejected);
        for record in &rejected {
            warn!(
                section = record.section,
                index = record.index,
                name = ?record.name,
                reason = %record.reason,
                "excluding malformed record"
            );
        }

        Ok(StateSnapshot {
            purchases: purchases.items,
            submitted: submitted.items,
            rejected,
        })
    }

    fn save(&mut self, purchases: &[LineItem], submitted: &[LineItem]) -> Result<(), StoreError> {
        self.write_document(&PersistedState::from_parts(purchases, submitted))?;
        debug!(
            purchases = purchases.len(),
            submitted = submitted.len(),
            "state saved"
        );
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Some(lock) = self.lock.take() {
            let _ = lock.unlock();
        }
    }
}
