//! Core engine types: cards, the grid, RNG, configuration.
//!
//! Nothing in here knows about timing or scoring. Cards are plain state
//! machines and the grid is an index-addressed arena that owns them.

pub mod card;
pub mod config;
pub mod grid;
pub mod rng;

pub use card::{Card, CardEvent, CardId, CardState, Face, FaceId, PairKey};
pub use config::{RestorePolicy, SessionConfig, SnapshotFormat};
pub use grid::{Grid, GridDiagnostic, PairLayout};
pub use rng::GameRng;
