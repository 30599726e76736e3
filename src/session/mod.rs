//! The game session: the only thing collaborators talk to.
//!
//! Presentation, audio and UI layers drive a [`GameSession`] with two calls,
//! [`activate`](GameSession::activate) and
//! [`on_animation_complete`](GameSession::on_animation_complete), plus
//! [`advance`](GameSession::advance) from the game loop. Every call returns
//! the [`GameEvent`]s it produced, in order. A rejected call returns none.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::{CardId, PairLayout, SessionConfig};
//! use memory_match::session::{GameEvent, GameSession, Outcome};
//!
//! let config = SessionConfig::new().with_grid(1, 2);
//! let mut session = GameSession::new(config).unwrap();
//! session.start(1, 2, PairLayout::explicit([0, 0])).unwrap();
//!
//! session.activate(CardId(0));
//! session.on_animation_complete(CardId(0));
//! session.advance(Duration::from_millis(200));
//! session.activate(CardId(1));
//! session.on_animation_complete(CardId(1));
//!
//! let events = session.advance(Duration::from_millis(500));
//! assert!(events.contains(&GameEvent::Victory));
//! assert_eq!(session.outcome(), Outcome::Won);
//! ```

mod game;

pub use game::GameSession;

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Face};

/// Session status. `Won` and `Lost` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Notifications for presentation and audio collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An activation was accepted (play the flip sound).
    CardActivated(CardId),
    /// Animate `card` turning to `face`, then call `on_animation_complete`.
    FlipRequested { card: CardId, face: Face },
    /// A flip animation finished and the card now shows `face`.
    FlipCompleted { card: CardId, face: Face },
    MatchFound { first: CardId, second: CardId },
    MismatchFound { first: CardId, second: CardId },
    Victory,
    GameOver,
}
