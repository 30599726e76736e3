//! Session bindings for Python.

use std::time::Duration;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{CardId, CardState, PairLayout, SessionConfig};
use crate::session::{GameEvent, GameSession, Outcome};

use super::py_core::{PyGameEvent, PyScoreBoard};

fn wrap(events: Vec<GameEvent>) -> Vec<PyGameEvent> {
    events.into_iter().map(PyGameEvent).collect()
}

/// Python wrapper for GameSession.
///
/// Scripted play-testing: drive the session by hand and inspect events.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    session: GameSession,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a session with a shuffled deal.
    ///
    /// # Arguments
    /// - rows, columns: Grid size (odd sizes get an extra column)
    /// - lives: Starting lives
    /// - cooldown_ms: Activation debounce
    /// - viewing_delay_ms: Delay before a revealed pair is evaluated
    /// - seed: RNG seed for deterministic deals
    #[new]
    #[pyo3(signature = (
        rows = 3,
        columns = 4,
        lives = 10,
        cooldown_ms = 200,
        viewing_delay_ms = 500,
        seed = 42
    ))]
    fn new(
        rows: usize,
        columns: usize,
        lives: u32,
        cooldown_ms: u64,
        viewing_delay_ms: u64,
        seed: u64,
    ) -> PyResult<Self> {
        let config = SessionConfig::new()
            .with_grid(rows, columns)
            .with_lives(lives)
            .with_cooldown(Duration::from_millis(cooldown_ms))
            .with_viewing_delay(Duration::from_millis(viewing_delay_ms))
            .with_seed(seed);
        let session = GameSession::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { session })
    }

    /// Restart on an explicit row-major pair assignment.
    fn start(&mut self, rows: usize, columns: usize, pair_keys: Vec<u32>) -> PyResult<()> {
        self.session
            .start(rows, columns, PairLayout::explicit(pair_keys))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Restart with a fresh shuffled deal.
    fn regenerate(&mut self, rows: usize, columns: usize) -> PyResult<()> {
        self.session
            .regenerate(rows, columns)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn activate(&mut self, card: u32) -> Vec<PyGameEvent> {
        wrap(self.session.activate(CardId(card)))
    }

    fn on_animation_complete(&mut self, card: u32) -> Vec<PyGameEvent> {
        wrap(self.session.on_animation_complete(CardId(card)))
    }

    fn advance(&mut self, ms: u64) -> Vec<PyGameEvent> {
        wrap(self.session.advance(Duration::from_millis(ms)))
    }

    /// Save to the in-memory slot; returns the snapshot as JSON.
    fn save(&mut self) -> PyResult<String> {
        let snapshot = self.session.save();
        serde_json::to_string(&snapshot).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn load(&mut self) -> bool {
        self.session.load()
    }

    /// Row-major pair keys.
    fn pair_keys(&self) -> Vec<u32> {
        self.session.grid().cards().map(|c| c.pair_key.0).collect()
    }

    /// Row-major card states as strings.
    fn card_states(&self) -> Vec<&'static str> {
        self.session
            .grid()
            .cards()
            .map(|c| match c.state {
                CardState::FaceDown => "face_down",
                CardState::Flipping(_) => "flipping",
                CardState::FaceUp => "face_up",
                CardState::Matched => "matched",
            })
            .collect()
    }

    #[getter]
    fn scoreboard(&self) -> PyScoreBoard {
        PyScoreBoard(self.session.scoreboard())
    }

    /// "in_progress", "won" or "lost".
    #[getter]
    fn outcome(&self) -> &'static str {
        match self.session.outcome() {
            Outcome::InProgress => "in_progress",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }

    /// Independent copy to try moves from the current position.
    fn copy(&self) -> Self {
        Self {
            session: self.session.fork(),
        }
    }

    fn __repr__(&self) -> String {
        let board = self.session.scoreboard();
        format!(
            "MemoryGame({}x{}, score={}, lives={}, status={})",
            self.session.grid().rows(),
            self.session.grid().columns(),
            board.score,
            board.lives,
            self.outcome()
        )
    }
}
