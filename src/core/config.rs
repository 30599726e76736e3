//! Session configuration.
//!
//! Everything a session needs is fixed at start: grid size, scoring
//! parameters, timing and persistence behavior. Configs can be built in code
//! with the `with_*` builders or loaded from JSON, where any missing key
//! takes its default.
//!
//! ```
//! use memory_match::core::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "rows": 4, "columns": 4 }"#).unwrap();
//! assert_eq!(config.rows, 4);
//! assert_eq!(config.initial_lives, 10);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::ScoreRules;

/// What `load()` copies from a snapshot into the live session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestorePolicy {
    /// Only the score is restored; moves, matches and the grid are left as they are.
    #[default]
    ScoreOnly,
    /// Grid, matched cards, score, moves and matches are all restored.
    Full,
}

/// Encoding of the persisted snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    /// Human-readable JSON with the documented field names.
    #[default]
    Json,
    /// Compact bincode encoding.
    Binary,
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: usize,
    pub columns: usize,

    pub initial_lives: u32,
    pub base_match_score: u32,
    pub base_mismatch_penalty: u32,
    pub combo_bonus: u32,

    /// Global debounce between accepted activations.
    pub activation_cooldown_ms: u64,

    /// How long a revealed pair stays visible before it is evaluated.
    pub viewing_delay_ms: u64,

    /// Extra wait after a mismatch before both cards turn back.
    /// Zero turns them back as part of the evaluation.
    pub flip_back_delay_ms: u64,

    /// Distinct front images available. `None` for unlimited.
    pub face_count: Option<usize>,

    /// Reject activations while a pair is waiting to be evaluated.
    ///
    /// Off by default: a third card may be revealed while the previous pair
    /// is still on screen.
    pub lock_during_evaluation: bool,

    pub restore_policy: RestorePolicy,
    pub snapshot_format: SnapshotFormat,

    /// Seed for shuffled deals.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 4,
            initial_lives: 10,
            base_match_score: 100,
            base_mismatch_penalty: 10,
            combo_bonus: 50,
            activation_cooldown_ms: 200,
            viewing_delay_ms: 500,
            flip_back_delay_ms: 500,
            face_count: None,
            lock_during_evaluation: false,
            restore_policy: RestorePolicy::ScoreOnly,
            snapshot_format: SnapshotFormat::Json,
            seed: 42,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    #[must_use]
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.initial_lives = lives;
        self
    }

    /// Set match score, mismatch penalty and combo bonus together.
    #[must_use]
    pub fn with_scoring(mut self, base_match: u32, mismatch_penalty: u32, combo_bonus: u32) -> Self {
        self.base_match_score = base_match;
        self.base_mismatch_penalty = mismatch_penalty;
        self.combo_bonus = combo_bonus;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.activation_cooldown_ms = duration_ms(cooldown);
        self
    }

    #[must_use]
    pub fn with_viewing_delay(mut self, delay: Duration) -> Self {
        self.viewing_delay_ms = duration_ms(delay);
        self
    }

    #[must_use]
    pub fn with_flip_back_delay(mut self, delay: Duration) -> Self {
        self.flip_back_delay_ms = duration_ms(delay);
        self
    }

    #[must_use]
    pub fn with_face_count(mut self, faces: usize) -> Self {
        self.face_count = Some(faces);
        self
    }

    #[must_use]
    pub fn lock_during_evaluation(mut self) -> Self {
        self.lock_during_evaluation = true;
        self
    }

    #[must_use]
    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }

    #[must_use]
    pub fn with_snapshot_format(mut self, format: SnapshotFormat) -> Self {
        self.snapshot_format = format;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn activation_cooldown(&self) -> Duration {
        Duration::from_millis(self.activation_cooldown_ms)
    }

    #[must_use]
    pub fn viewing_delay(&self) -> Duration {
        Duration::from_millis(self.viewing_delay_ms)
    }

    #[must_use]
    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }

    /// Scoring parameters for the score keeper.
    #[must_use]
    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            base_match_score: self.base_match_score,
            base_mismatch_penalty: self.base_mismatch_penalty,
            combo_bonus: self.combo_bonus,
            initial_lives: self.initial_lives,
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
