//! # memory-match
//!
//! Match-resolution engine for a tile-matching (memory) game.
//!
//! Players reveal tiles two at a time. A correct pair scores with an
//! escalating combo bonus; a wrong pair costs a life and resets the combo.
//! The game is won when every pair is found and lost when lives run out.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: Animation, audio, layout and text rendering
//!    are collaborators. The engine emits [`GameEvent`]s and waits for
//!    `on_animation_complete` callbacks; it never draws or plays anything.
//!
//! 2. **Explicit Time**: No blocking and no hidden timers. Delays are
//!    continuations on the session clock, run by [`GameSession::advance`].
//!
//! 3. **Robust Input**: Invalid player actions are silent no-ops. Only
//!    configuration and persistence report errors.
//!
//! ## Modules
//!
//! - `core`: Cards and their state machine, the grid arena, RNG, configuration
//! - `scoring`: Score, combo and lives arithmetic
//! - `matching`: Pending-pair queue and scheduled continuations
//! - `persistence`: Snapshots, codecs and the save slot
//! - `session`: The orchestrator collaborators talk to
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod matching;
pub mod persistence;
pub mod scoring;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Card, CardEvent, CardId, CardState, Face, FaceId, PairKey,
    Grid, GridDiagnostic, PairLayout,
    GameRng,
    RestorePolicy, SessionConfig, SnapshotFormat,
};

pub use crate::error::{ConfigError, LoadFailure, PersistError};

pub use crate::scoring::{ScoreBoard, ScoreKeeper, ScoreRules};

pub use crate::matching::{Continuation, Evaluation, MatchQueue, Scheduler};

pub use crate::persistence::{FileStore, MemoryStore, PersistenceCodec, Snapshot, SnapshotStore};

pub use crate::session::{GameEvent, GameSession, Outcome};
