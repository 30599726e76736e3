//! Snapshot encoding and the single save slot.

use tracing::{info, warn};

use super::snapshot::Snapshot;
use super::store::{MemoryStore, SnapshotStore};
use crate::core::SnapshotFormat;
use crate::error::{LoadFailure, PersistError};

/// Encodes snapshots and keeps the one save slot.
#[derive(Debug)]
pub struct PersistenceCodec {
    format: SnapshotFormat,
    store: Box<dyn SnapshotStore>,
}

impl Default for PersistenceCodec {
    fn default() -> Self {
        Self::new(SnapshotFormat::Json)
    }
}

impl PersistenceCodec {
    /// Codec backed by an in-memory slot.
    pub fn new(format: SnapshotFormat) -> Self {
        Self::with_store(format, MemoryStore::new())
    }

    pub fn with_store(format: SnapshotFormat, store: impl SnapshotStore + 'static) -> Self {
        Self {
            format,
            store: Box::new(store),
        }
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    /// Encode a snapshot in this codec's format.
    pub fn encode(&self, snapshot: &Snapshot) -> Result<Vec<u8>, PersistError> {
        Ok(match self.format {
            SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)?,
            SnapshotFormat::Binary => bincode::serialize(snapshot)?,
        })
    }

    /// Parse and validate raw bytes.
    pub fn decode(&self, raw: &[u8]) -> Result<Snapshot, LoadFailure> {
        let snapshot: Snapshot = match self.format {
            SnapshotFormat::Json => serde_json::from_slice(raw)?,
            SnapshotFormat::Binary => bincode::deserialize(raw)?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write `snapshot` to the slot, replacing what was there.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let bytes = self.encode(snapshot)?;
        self.store.write(&bytes)?;
        info!(
            score = snapshot.score,
            moves = snapshot.move_count,
            timestamp = %snapshot.timestamp,
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the slot back.
    pub fn load(&self) -> Result<Snapshot, LoadFailure> {
        let raw = self.store.read()?.ok_or(LoadFailure::Missing)?;
        self.decode(&raw).map_err(|e| {
            warn!(error = %e, "stored snapshot rejected");
            e
        })
    }
}
