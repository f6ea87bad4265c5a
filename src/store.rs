//! Draft store with a durable shadow copy.
//!
//! The flow owns exactly one in-progress draft at a time. Every change is
//! mirrored to a JSON snapshot on disk so a reload picks up where the user
//! left off; a missing or garbled snapshot silently degrades to an empty
//! draft and is never surfaced to the caller.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::draft::{DraftFields, RegistrationDraft};
use crate::error::Result;

/// Storage key of the in-progress draft snapshot.
pub const DRAFT_KEY: &str = "registration_draft";
/// Storage key of the post-submit result snapshot, independent of the draft's.
pub const RESULT_KEY: &str = "registration_result";

/// One durable JSON snapshot of a single record, stored under a fixed key.
pub struct ShadowSlot<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> ShadowSlot<T> {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
            _record: PhantomData,
        }
    }

    /// Serializes the record to its snapshot file. The write completes before
    /// this returns, so a navigation right after a save cannot lose state.
    pub fn save(&self, record: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(record)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "shadow copy saved");
        Ok(())
    }

    /// Reads the snapshot back. Missing or unreadable snapshots yield `None`;
    /// there is no schema versioning, so garbled data is discarded, not fixed.
    pub fn load(&self) -> Option<T> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "shadow copy unreadable, discarding");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "shadow copy corrupt, discarding");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), %err, "could not clear shadow copy");
        }
    }
}

/// Single-slot store for the registration draft, backed by a shadow copy.
pub struct DraftStore {
    slot: Option<DraftFields>,
    shadow: ShadowSlot<DraftFields>,
}

impl DraftStore {
    pub fn new(storage_dir: &Path) -> Self {
        Self {
            slot: None,
            shadow: ShadowSlot::new(storage_dir, DRAFT_KEY),
        }
    }

    /// Replaces the draft and flushes the shadow copy before returning.
    pub fn set_draft(&mut self, fields: DraftFields) -> Result<()> {
        self.shadow.save(&fields)?;
        self.slot = Some(fields);
        Ok(())
    }

    /// Current draft; rehydrates from the shadow copy when the in-memory slot
    /// is empty (fresh process after a reload).
    pub fn get_draft(&mut self) -> Option<&DraftFields> {
        if self.slot.is_none() {
            self.slot = self.shadow.load();
        }
        self.slot.as_ref()
    }

    /// Frozen view of the stored draft, for the summary stage. `None` when
    /// there is no draft or the stored state no longer validates.
    pub fn frozen_draft(&mut self) -> Option<RegistrationDraft> {
        self.get_draft().and_then(|fields| fields.freeze().ok())
    }

    /// Drops the draft and its shadow copy, once the registration went through.
    pub fn clear(&mut self) {
        self.slot = None;
        self.shadow.clear();
    }
}
