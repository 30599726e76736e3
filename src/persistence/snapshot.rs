//! The persisted snapshot.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::core::grid::{validate_matched, validate_pairs};
use crate::core::{Grid, PairKey};
use crate::error::LoadFailure;

/// `YYYY-MM-DD HH:MM:SS`, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Saved game state.
///
/// Field names in the JSON form are camelCase (`moveCount`, `pairKey`, ...).
/// Per-cell arrays are row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub score: u32,
    pub move_count: u32,
    pub total_matches: u32,
    pub rows: u32,
    pub columns: u32,
    pub pair_key: Vec<u32>,
    pub matched: Vec<bool>,
    pub timestamp: String,
}

impl Snapshot {
    /// Capture a grid and counters, stamped with the current local time.
    #[must_use]
    pub fn capture(grid: &Grid, score: u32, move_count: u32, total_matches: u32) -> Self {
        Self {
            score,
            move_count,
            total_matches,
            rows: grid.rows() as u32,
            columns: grid.columns() as u32,
            pair_key: grid.pair_keys().into_iter().map(PairKey::raw).collect(),
            matched: grid.matched_flags(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Pair keys as typed values.
    #[must_use]
    pub fn pair_keys(&self) -> Vec<PairKey> {
        self.pair_key.iter().copied().map(PairKey).collect()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Check that the snapshot describes a playable grid.
    ///
    /// The per-cell arrays must match the dimensions, the keys must form a
    /// valid pairing, both cards of a pair must share a matched flag and
    /// `total_matches` must equal the number of matched pairs.
    pub fn validate(&self) -> Result<(), LoadFailure> {
        if self.rows == 0 || self.columns == 0 {
            return Err(LoadFailure::Inconsistent(format!(
                "empty grid {}x{}",
                self.rows, self.columns
            )));
        }
        let cells = self.cell_count();
        if self.pair_key.len() != cells {
            return Err(LoadFailure::Inconsistent(format!(
                "{} pair keys for {} cells",
                self.pair_key.len(),
                cells
            )));
        }
        if self.matched.len() != cells {
            return Err(LoadFailure::Inconsistent(format!(
                "{} matched flags for {} cells",
                self.matched.len(),
                cells
            )));
        }
        if cells % 2 != 0 {
            return Err(LoadFailure::Inconsistent(format!("odd cell count {}", cells)));
        }

        let keys = self.pair_keys();
        validate_pairs(&keys, cells).map_err(|e| LoadFailure::Inconsistent(e.to_string()))?;
        let matched_pairs = validate_matched(&keys, &self.matched)
            .map_err(|e| LoadFailure::Inconsistent(e.to_string()))?;
        if self.total_matches as usize != matched_pairs {
            return Err(LoadFailure::Inconsistent(format!(
                "totalMatches {} but {} pairs matched",
                self.total_matches, matched_pairs
            )));
        }
        Ok(())
    }
}
