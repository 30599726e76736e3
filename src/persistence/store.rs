//! Single-slot snapshot storage.

use std::fmt::Debug;
use std::io;
use std::path::PathBuf;

/// Where encoded snapshots live. One slot; every write replaces it.
pub trait SnapshotStore: Debug + Send {
    /// The stored bytes, or `None` if nothing was ever written.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored bytes.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// In-memory slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled slot (for loading bytes obtained elsewhere).
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Some(bytes.into()),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.slot = Some(bytes.to_vec());
        Ok(())
    }
}

/// A single file on disk. A missing file reads as an empty slot.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(&self.path, bytes)
    }
}
