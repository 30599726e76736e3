//! Cards and the per-card reveal state machine.
//!
//! ## Transitions
//!
//! ```text
//! FaceDown --begin_flip(Front)--> Flipping(Front) --complete_flip--> FaceUp
//! FaceUp   --begin_flip(Back)---> Flipping(Back)  --complete_flip--> FaceDown
//! FaceUp   --mark_matched-------> Matched (terminal)
//! ```
//!
//! Every transition is instantaneous and returns the [`CardEvent`] it
//! produced. An invalid request returns `None` and leaves the card alone, so
//! stray or repeated input can never corrupt a card.
//!
//! ```
//! use memory_match::core::{Card, CardEvent, CardId, CardState, Face, PairKey};
//!
//! let mut card = Card::new(CardId(0), PairKey(3));
//! assert_eq!(card.begin_flip(Face::Front), Some(CardEvent::FlipStarted { face: Face::Front }));
//!
//! // Already flipping: ignored
//! assert_eq!(card.begin_flip(Face::Front), None);
//!
//! assert_eq!(card.complete_flip(), Some(CardEvent::FlipCompleted { face: Face::Front }));
//! assert_eq!(card.state, CardState::FaceUp);
//! ```

use serde::{Deserialize, Serialize};

/// Card identity: the row-major grid cell index (`0..rows*columns`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a cell index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifies which two cards form a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(pub u32);

impl PairKey {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Which front image the presentation layer draws for a card.
///
/// Normally equal to the pair key. When fewer distinct images exist than
/// pairs, faces wrap around and two different pairs can look alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

/// The side of a card that is showing (or being turned to).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
}

/// Reveal state of a single card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Back showing, can be activated.
    #[default]
    FaceDown,
    /// Animation in progress towards the given face.
    Flipping(Face),
    /// Front showing, waiting to be paired.
    FaceUp,
    /// Part of a found pair. Terminal.
    Matched,
}

/// Observable result of a card transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEvent {
    FlipStarted { face: Face },
    FlipCompleted { face: Face },
    Matched,
}

/// A card in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub pair_key: PairKey,
    pub face: FaceId,
    pub state: CardState,
}

impl Card {
    /// Create a face-down card whose face image equals its pair key.
    #[must_use]
    pub fn new(id: CardId, pair_key: PairKey) -> Self {
        Self {
            id,
            pair_key,
            face: FaceId(pair_key.0),
            state: CardState::FaceDown,
        }
    }

    /// Set the face image (builder pattern).
    #[must_use]
    pub fn with_face(mut self, face: FaceId) -> Self {
        self.face = face;
        self
    }

    /// Start turning the card towards `face`.
    ///
    /// Ignored while flipping, once matched, or when the card already shows
    /// `face`.
    pub fn begin_flip(&mut self, face: Face) -> Option<CardEvent> {
        let allowed = matches!(
            (self.state, face),
            (CardState::FaceDown, Face::Front) | (CardState::FaceUp, Face::Back)
        );
        if !allowed {
            return None;
        }
        self.state = CardState::Flipping(face);
        Some(CardEvent::FlipStarted { face })
    }

    /// Finish the flip that is in progress. No-op unless flipping.
    pub fn complete_flip(&mut self) -> Option<CardEvent> {
        let CardState::Flipping(face) = self.state else {
            return None;
        };
        self.state = match face {
            Face::Front => CardState::FaceUp,
            Face::Back => CardState::FaceDown,
        };
        Some(CardEvent::FlipCompleted { face })
    }

    /// Lock the card as part of a found pair. Only valid from `FaceUp`.
    pub fn mark_matched(&mut self) -> Option<CardEvent> {
        if self.state != CardState::FaceUp {
            return None;
        }
        self.state = CardState::Matched;
        Some(CardEvent::Matched)
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    #[must_use]
    pub fn is_flipping(&self) -> bool {
        matches!(self.state, CardState::Flipping(_))
    }

    /// Can a player activate this card right now?
    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.state == CardState::FaceDown
    }
}
