//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::Face;
use crate::scoring::ScoreBoard;
use crate::session::GameEvent;

/// Python wrapper for GameEvent.
#[pyclass(name = "GameEvent")]
#[derive(Clone, Debug)]
pub struct PyGameEvent(pub GameEvent);

#[pymethods]
impl PyGameEvent {
    /// Event name, e.g. "FlipRequested".
    #[getter]
    fn kind(&self) -> &'static str {
        match self.0 {
            GameEvent::CardActivated(_) => "CardActivated",
            GameEvent::FlipRequested { .. } => "FlipRequested",
            GameEvent::FlipCompleted { .. } => "FlipCompleted",
            GameEvent::MatchFound { .. } => "MatchFound",
            GameEvent::MismatchFound { .. } => "MismatchFound",
            GameEvent::Victory => "Victory",
            GameEvent::GameOver => "GameOver",
        }
    }

    /// Card IDs the event refers to (empty for Victory/GameOver).
    #[getter]
    fn cards(&self) -> Vec<u32> {
        match self.0 {
            GameEvent::CardActivated(card)
            | GameEvent::FlipRequested { card, .. }
            | GameEvent::FlipCompleted { card, .. } => vec![card.0],
            GameEvent::MatchFound { first, second } | GameEvent::MismatchFound { first, second } => {
                vec![first.0, second.0]
            }
            GameEvent::Victory | GameEvent::GameOver => Vec::new(),
        }
    }

    /// "front" or "back" for flip events.
    #[getter]
    fn face(&self) -> Option<&'static str> {
        match self.0 {
            GameEvent::FlipRequested { face, .. } | GameEvent::FlipCompleted { face, .. } => {
                Some(match face {
                    Face::Front => "front",
                    Face::Back => "back",
                })
            }
            _ => None,
        }
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Python wrapper for ScoreBoard.
#[pyclass(name = "ScoreBoard")]
#[derive(Clone, Debug)]
pub struct PyScoreBoard(pub ScoreBoard);

#[pymethods]
impl PyScoreBoard {
    #[getter]
    fn score(&self) -> u32 {
        self.0.score
    }

    #[getter]
    fn combo(&self) -> u32 {
        self.0.combo
    }

    #[getter]
    fn lives(&self) -> u32 {
        self.0.lives
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.0.moves
    }

    #[getter]
    fn matches(&self) -> u32 {
        self.0.matches
    }

    #[getter]
    fn total_pairs(&self) -> u32 {
        self.0.total_pairs
    }

    fn __repr__(&self) -> String {
        format!(
            "ScoreBoard(score={}, combo={}, lives={}, moves={}, matches={}/{})",
            self.0.score, self.0.combo, self.0.lives, self.0.moves, self.0.matches, self.0.total_pairs
        )
    }
}
