//! The card grid.
//!
//! Cards live in a flat arena indexed by [`CardId`]; `(row, col)` is only a
//! lookup onto that arena. The arena is an `im::Vector`, so cloning a grid
//! (and therefore a whole session) is O(1).
//!
//! ## Invariants
//!
//! - `rows * columns` is even
//! - each pair key in `0..rows*columns/2` appears in exactly two cells

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardState, FaceId, PairKey};
use super::rng::GameRng;
use crate::error::ConfigError;

/// How pair keys are assigned to cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairLayout {
    /// Deal every pair twice and shuffle.
    Shuffled,
    /// Caller-supplied row-major assignment.
    Explicit(Vec<PairKey>),
}

impl PairLayout {
    /// Explicit layout from raw key values.
    pub fn explicit(keys: impl IntoIterator<Item = u32>) -> Self {
        Self::Explicit(keys.into_iter().map(PairKey).collect())
    }
}

/// Non-fatal problems found while building a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridDiagnostic {
    /// The requested grid had an odd cell count; one column was added.
    WidenedColumns { from: usize, to: usize },
    /// Fewer face images than pairs; some different pairs look identical.
    InsufficientFaces { needed: usize, available: usize },
}

impl std::fmt::Display for GridDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WidenedColumns { from, to } => {
                write!(f, "odd card count, widened columns from {} to {}", from, to)
            }
            Self::InsufficientFaces { needed, available } => write!(
                f,
                "need {} distinct faces but only {} available",
                needed, available
            ),
        }
    }
}

/// A `rows x columns` arrangement of cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cards: Vector<Card>,
}

impl Grid {
    /// Build a grid, widening odd sizes and checking face supply.
    ///
    /// Returns the grid and any diagnostics. Only empty dimensions or a bad
    /// explicit layout are errors.
    pub fn build(
        rows: usize,
        columns: usize,
        layout: &PairLayout,
        face_count: Option<usize>,
        rng: &mut GameRng,
    ) -> Result<(Self, Vec<GridDiagnostic>), ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }

        let mut diagnostics = Vec::new();
        let mut columns = columns;
        if cell_count(rows, columns)? % 2 != 0 {
            let widened = columns
                .checked_add(1)
                .ok_or_else(|| too_large(rows, columns))?;
            diagnostics.push(GridDiagnostic::WidenedColumns {
                from: columns,
                to: widened,
            });
            columns = widened;
        }

        let cell_count = cell_count(rows, columns)?;
        let pairs = cell_count / 2;
        let pair_limit = u32::try_from(pairs).map_err(|_| too_large(rows, columns))?;
        if let Some(available) = face_count {
            if available < pairs {
                diagnostics.push(GridDiagnostic::InsufficientFaces {
                    needed: pairs,
                    available,
                });
            }
        }

        let keys = match layout {
            PairLayout::Shuffled => {
                let mut keys: Vec<PairKey> = (0..pair_limit)
                    .flat_map(|k| [PairKey(k), PairKey(k)])
                    .collect();
                rng.fork().shuffle(&mut keys);
                keys
            }
            PairLayout::Explicit(keys) => {
                validate_pairs(keys, cell_count)?;
                keys.clone()
            }
        };

        let grid = Self::from_keys(rows, columns, &keys, face_count);
        Ok((grid, diagnostics))
    }

    /// Rebuild a grid from persisted keys and matched flags.
    ///
    /// The dimensions must already be even and the keys a valid pairing.
    pub fn restore(
        rows: usize,
        columns: usize,
        keys: &[PairKey],
        matched: &[bool],
        face_count: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }
        let cell_count = cell_count(rows, columns)?;
        if cell_count % 2 != 0 {
            return Err(ConfigError::InvalidLayout(format!(
                "odd cell count {}",
                cell_count
            )));
        }
        validate_pairs(keys, cell_count)?;
        validate_matched(keys, matched)?;

        let mut grid = Self::from_keys(rows, columns, keys, face_count);
        for (card, &is_matched) in grid.cards.iter_mut().zip(matched) {
            if is_matched {
                card.state = CardState::Matched;
            }
        }
        Ok(grid)
    }

    fn from_keys(rows: usize, columns: usize, keys: &[PairKey], face_count: Option<usize>) -> Self {
        let cards = keys
            .iter()
            .enumerate()
            .map(|(index, &key)| {
                let face = match face_count {
                    Some(n) if n > 0 => FaceId(key.0 % n as u32),
                    _ => FaceId(key.0),
                };
                Card::new(CardId(index as u32), key).with_face(face)
            })
            .collect();
        Self { rows, columns, cards }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Cards in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Card at a grid cell.
    #[must_use]
    pub fn card_at(&self, row: usize, col: usize) -> Option<CardId> {
        if row < self.rows && col < self.columns {
            Some(CardId((row * self.columns + col) as u32))
        } else {
            None
        }
    }

    /// Grid cell of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<(usize, usize)> {
        if id.index() < self.cards.len() {
            Some((id.index() / self.columns, id.index() % self.columns))
        } else {
            None
        }
    }

    /// Row-major pair keys.
    #[must_use]
    pub fn pair_keys(&self) -> Vec<PairKey> {
        self.cards.iter().map(|c| c.pair_key).collect()
    }

    /// Row-major matched flags.
    #[must_use]
    pub fn matched_flags(&self) -> Vec<bool> {
        self.cards.iter().map(Card::is_matched).collect()
    }
}

/// Check that `keys` pairs up `0..cell_count/2`, each exactly twice.
/// Cell count, or an error when the dimensions do not fit card ids.
fn cell_count(rows: usize, columns: usize) -> Result<usize, ConfigError> {
    rows.checked_mul(columns)
        .filter(|&cells| u32::try_from(cells).is_ok())
        .ok_or_else(|| too_large(rows, columns))
}

fn too_large(rows: usize, columns: usize) -> ConfigError {
    ConfigError::InvalidLayout(format!("grid {}x{} is too large", rows, columns))
}

/// Each key in `0..cell_count/2` must appear exactly twice.
pub(crate) fn validate_pairs(keys: &[PairKey], cell_count: usize) -> Result<(), ConfigError> {
    if keys.len() != cell_count {
        return Err(ConfigError::InvalidLayout(format!(
            "expected {} pair keys, got {}",
            cell_count,
            keys.len()
        )));
    }

    let pairs = u32::try_from(cell_count / 2).unwrap_or(u32::MAX);
    let mut counts: FxHashMap<PairKey, usize> = FxHashMap::default();
    for &key in keys {
        if key.0 >= pairs {
            return Err(ConfigError::InvalidLayout(format!(
                "{} out of range 0..{}",
                key, pairs
            )));
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    if let Some((key, count)) = counts.iter().find(|&(_, &n)| n != 2) {
        return Err(ConfigError::InvalidLayout(format!(
            "{} appears {} times",
            key, count
        )));
    }
    Ok(())
}

/// Both cards of a pair must agree on `matched`.
///
/// Expects a valid pairing. Returns the number of matched pairs.
pub(crate) fn validate_matched(keys: &[PairKey], matched: &[bool]) -> Result<usize, ConfigError> {
    if matched.len() != keys.len() {
        return Err(ConfigError::InvalidLayout(format!(
            "expected {} matched flags, got {}",
            keys.len(),
            matched.len()
        )));
    }

    let mut first_seen: FxHashMap<PairKey, bool> = FxHashMap::default();
    let mut matched_pairs = 0;
    for (&key, &is_matched) in keys.iter().zip(matched) {
        match first_seen.insert(key, is_matched) {
            Some(partner) if partner != is_matched => {
                return Err(ConfigError::InvalidLayout(format!(
                    "{} is matched on one card only",
                    key
                )));
            }
            Some(_) if is_matched => matched_pairs += 1,
            _ => {}
        }
    }
    Ok(matched_pairs)
}
