//! Save and restore.
//!
//! A [`Snapshot`] captures the counters and the row-major grid; a
//! [`PersistenceCodec`] encodes it (JSON or bincode) into a single
//! overwrite-only slot held by a [`SnapshotStore`].
//!
//! Loading never panics: missing, unreadable, corrupt and inconsistent
//! snapshots all come back as a [`LoadFailure`](crate::error::LoadFailure).
//!
//! ```
//! use memory_match::core::SnapshotFormat;
//! use memory_match::persistence::{PersistenceCodec, Snapshot};
//!
//! let mut codec = PersistenceCodec::new(SnapshotFormat::Json);
//! assert!(codec.load().is_err());
//!
//! let snapshot = Snapshot {
//!     score: 150,
//!     move_count: 1,
//!     total_matches: 1,
//!     rows: 1,
//!     columns: 2,
//!     pair_key: vec![0, 0],
//!     matched: vec![true, true],
//!     timestamp: "2024-01-01 09:30:00".into(),
//! };
//! codec.save(&snapshot).unwrap();
//! assert_eq!(codec.load().unwrap(), snapshot);
//! ```

mod codec;
mod snapshot;
mod store;

pub use codec::PersistenceCodec;
pub use snapshot::{Snapshot, TIMESTAMP_FORMAT};
pub use store::{FileStore, MemoryStore, SnapshotStore};
