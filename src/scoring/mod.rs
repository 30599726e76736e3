//! Score, combo and lives bookkeeping.
//!
//! Pure arithmetic with no timing. Every counter is unsigned and the two
//! subtracting operations saturate, so neither score nor lives can go
//! negative.
//!
//! ```
//! use memory_match::scoring::{ScoreKeeper, ScoreRules};
//!
//! let mut keeper = ScoreKeeper::new(ScoreRules::default());
//! keeper.apply_match();
//! keeper.apply_match();
//! assert_eq!(keeper.combo(), 2);
//! assert_eq!(keeper.score(), 150 + 200);
//! ```

use serde::{Deserialize, Serialize};

/// Scoring parameters, fixed at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub base_match_score: u32,
    pub base_mismatch_penalty: u32,
    pub combo_bonus: u32,
    pub initial_lives: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            base_match_score: 100,
            base_mismatch_penalty: 10,
            combo_bonus: 50,
            initial_lives: 10,
        }
    }
}

/// Read-only view of the counters, for the text renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u32,
    pub combo: u32,
    pub lives: u32,
    pub moves: u32,
    pub matches: u32,
    pub total_pairs: u32,
}

/// Running score state for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    rules: ScoreRules,
    score: u32,
    combo: u32,
    moves: u32,
    matches: u32,
    lives: u32,
}

impl ScoreKeeper {
    /// Fresh counters with `rules.initial_lives` lives.
    #[must_use]
    pub fn new(rules: ScoreRules) -> Self {
        Self {
            rules,
            score: 0,
            combo: 0,
            moves: 0,
            matches: 0,
            lives: rules.initial_lives,
        }
    }

    /// Reset every counter for a new session.
    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
    }

    /// A correct pair: extend the combo and award base plus combo bonus.
    pub fn apply_match(&mut self) {
        self.combo = self.combo.saturating_add(1);
        let award = self
            .rules
            .base_match_score
            .saturating_add(self.combo.saturating_mul(self.rules.combo_bonus));
        self.score = self.score.saturating_add(award);
        self.matches = self.matches.saturating_add(1);
    }

    /// A wrong pair: break the combo, take the penalty and a life.
    pub fn apply_mismatch(&mut self) {
        self.combo = 0;
        self.score = self.score.saturating_sub(self.rules.base_mismatch_penalty);
        self.lives = self.lives.saturating_sub(1);
    }

    /// Count one evaluated pair, whatever its result.
    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    /// Overwrite the score (restoring a snapshot).
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Overwrite moves and matches (full snapshot restore).
    pub fn set_progress(&mut self, moves: u32, matches: u32) {
        self.moves = moves;
        self.matches = matches;
    }

    #[must_use]
    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Snapshot of the counters for display.
    #[must_use]
    pub fn board(&self, total_pairs: usize) -> ScoreBoard {
        ScoreBoard {
            score: self.score,
            combo: self.combo,
            lives: self.lives,
            moves: self.moves,
            matches: self.matches,
            total_pairs: total_pairs as u32,
        }
    }
}
