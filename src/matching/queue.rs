//! Pending-pair coordination.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, error};

use super::scheduler::Scheduler;
use crate::core::{CardId, Grid};
use crate::scoring::ScoreKeeper;

/// Work the match queue schedules on the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Compare two revealed cards.
    Evaluate(CardId, CardId),
    /// Turn a mismatched pair face down again.
    FlipBack(CardId, CardId),
}

/// Result of evaluating a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Match,
    Mismatch,
    /// The pair broke an internal contract and was dropped.
    Rejected,
}

/// Collects face-up cards into pairs and schedules their evaluation.
///
/// At most two cards are pending. As soon as the second arrives both are
/// handed to the scheduler and the pending list is empty again, so a third
/// card can be revealed while the first pair is still on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchQueue {
    pending: SmallVec<[CardId; 2]>,
    scheduler: Scheduler<Continuation>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A card finished turning face up.
    ///
    /// Returns the pair if this completed one; its evaluation is then due
    /// `viewing_delay` after `now`. A card that is already pending is ignored.
    pub fn on_face_up(
        &mut self,
        card: CardId,
        now: Duration,
        viewing_delay: Duration,
    ) -> Option<(CardId, CardId)> {
        if self.pending.contains(&card) {
            return None;
        }
        self.pending.push(card);
        if self.pending.len() < 2 {
            return None;
        }

        let first = self.pending[0];
        let second = self.pending[1];
        self.pending.clear();
        self.scheduler
            .schedule(now, viewing_delay, Continuation::Evaluate(first, second));
        debug!(%first, %second, ?viewing_delay, "pair queued for evaluation");
        Some((first, second))
    }

    /// Turn a mismatched pair back after `delay`.
    pub fn schedule_flip_back(&mut self, first: CardId, second: CardId, now: Duration, delay: Duration) {
        self.scheduler
            .schedule(now, delay, Continuation::FlipBack(first, second));
    }

    /// Next continuation due at `now`, if any.
    pub fn pop_due(&mut self, now: Duration) -> Option<Continuation> {
        self.scheduler.pop_due(now)
    }

    /// Score a pair and lock it if it matches.
    ///
    /// Records a move, then either applies a match and marks both cards
    /// matched, or applies a mismatch. Turning mismatched cards back is left
    /// to the caller, which owns the flip events.
    pub fn evaluate(
        &self,
        first: CardId,
        second: CardId,
        grid: &mut Grid,
        keeper: &mut ScoreKeeper,
    ) -> Evaluation {
        debug_assert_ne!(first, second, "evaluation pair contains {} twice", first);
        if first == second {
            error!(card = %first, "evaluation pair contains the same card twice");
            return Evaluation::Rejected;
        }
        let (Some(a), Some(b)) = (grid.card(first), grid.card(second)) else {
            debug_assert!(false, "evaluation pair {} / {} outside grid", first, second);
            error!(%first, %second, "evaluation pair outside grid");
            return Evaluation::Rejected;
        };
        let is_match = a.pair_key == b.pair_key;

        keeper.record_move();
        if is_match {
            keeper.apply_match();
            for id in [first, second] {
                if let Some(card) = grid.card_mut(id) {
                    card.mark_matched();
                }
            }
            Evaluation::Match
        } else {
            keeper.apply_mismatch();
            Evaluation::Mismatch
        }
    }

    /// Cards waiting for a partner.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Pairs revealed but not yet evaluated.
    #[must_use]
    pub fn evaluations_in_flight(&self) -> usize {
        self.scheduler
            .iter()
            .filter(|c| matches!(c, Continuation::Evaluate(..)))
            .count()
    }

    /// Scheduled continuations of any kind.
    #[must_use]
    pub fn scheduled(&self) -> usize {
        self.scheduler.len()
    }

    /// When the next continuation becomes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Forget pending cards and scheduled work.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.scheduler.clear();
    }
}
