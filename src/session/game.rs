//! Session orchestration.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{GameEvent, Outcome};
use crate::core::{
    Card, CardEvent, CardId, Face, GameRng, Grid, GridDiagnostic, PairLayout, RestorePolicy,
    SessionConfig,
};
use crate::error::{ConfigError, LoadFailure};
use crate::matching::{Continuation, Evaluation, MatchQueue};
use crate::persistence::{PersistenceCodec, Snapshot};
use crate::scoring::{ScoreBoard, ScoreKeeper};

/// One play-through of the memory game.
///
/// Owns the grid, the match queue, the score keeper and the save slot.
/// Time only moves through [`advance`](Self::advance).
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    rng: GameRng,
    grid: Grid,
    diagnostics: Vec<GridDiagnostic>,
    queue: MatchQueue,
    keeper: ScoreKeeper,
    codec: PersistenceCodec,
    outcome: Outcome,
    clock: Duration,
    last_activation: Option<Duration>,
}

impl GameSession {
    /// Start a session with a shuffled deal and an in-memory save slot.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let codec = PersistenceCodec::new(config.snapshot_format);
        Self::with_codec(config, codec)
    }

    /// Start a session that saves through `codec`.
    pub fn with_codec(config: SessionConfig, codec: PersistenceCodec) -> Result<Self, ConfigError> {
        let mut rng = GameRng::new(config.seed);
        let (grid, diagnostics) = Grid::build(
            config.rows,
            config.columns,
            &PairLayout::Shuffled,
            config.face_count,
            &mut rng,
        )?;
        let session = Self {
            keeper: ScoreKeeper::new(config.score_rules()),
            config,
            rng,
            grid,
            diagnostics,
            queue: MatchQueue::new(),
            codec,
            outcome: Outcome::InProgress,
            clock: Duration::ZERO,
            last_activation: None,
        };
        session.announce_start();
        Ok(session)
    }

    /// (Re)start on a new grid.
    ///
    /// An odd cell count gets one extra column. Scores, lives, pending pairs
    /// and scheduled work are reset.
    pub fn start(&mut self, rows: usize, columns: usize, layout: PairLayout) -> Result<(), ConfigError> {
        let (grid, diagnostics) =
            Grid::build(rows, columns, &layout, self.config.face_count, &mut self.rng)?;
        self.grid = grid;
        self.diagnostics = diagnostics;
        self.queue.clear();
        self.keeper.reset();
        self.outcome = Outcome::InProgress;
        self.last_activation = None;
        self.announce_start();
        Ok(())
    }

    /// Restart with a fresh shuffled deal of the given size.
    pub fn regenerate(&mut self, rows: usize, columns: usize) -> Result<(), ConfigError> {
        self.start(rows, columns, PairLayout::Shuffled)
    }

    fn announce_start(&self) {
        for diagnostic in &self.diagnostics {
            warn!(%diagnostic, "grid configuration adjusted");
        }
        info!(
            rows = self.grid.rows(),
            columns = self.grid.columns(),
            pairs = self.grid.total_pairs(),
            "session started"
        );
    }

    /// A player picked a card.
    ///
    /// Ignored once the game is over, inside the activation cooldown, for
    /// unknown cards and for cards that are not face down.
    pub fn activate(&mut self, id: CardId) -> Vec<GameEvent> {
        if let Some(reason) = self.activation_blocker(id) {
            debug!(card = %id, reason, "activation rejected");
            return Vec::new();
        }
        let Some(card) = self.grid.card_mut(id) else {
            return Vec::new();
        };
        let Some(CardEvent::FlipStarted { face }) = card.begin_flip(Face::Front) else {
            return Vec::new();
        };

        self.last_activation = Some(self.clock);
        debug!(card = %id, "activation accepted");
        vec![
            GameEvent::CardActivated(id),
            GameEvent::FlipRequested { card: id, face },
        ]
    }

    fn activation_blocker(&self, id: CardId) -> Option<&'static str> {
        if self.outcome.is_terminal() {
            return Some("game over");
        }
        if let Some(last) = self.last_activation {
            if self.clock.saturating_sub(last) < self.config.activation_cooldown() {
                return Some("cooldown");
            }
        }
        if self.config.lock_during_evaluation && self.queue.evaluations_in_flight() > 0 {
            return Some("evaluation pending");
        }
        match self.grid.card(id) {
            None => Some("unknown card"),
            Some(card) if !card.is_face_down() => Some("card not face down"),
            Some(_) => None,
        }
    }

    /// The presentation layer finished animating a card.
    pub fn on_animation_complete(&mut self, id: CardId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(card) = self.grid.card_mut(id) else {
            return events;
        };
        let Some(CardEvent::FlipCompleted { face }) = card.complete_flip() else {
            return events;
        };

        events.push(GameEvent::FlipCompleted { card: id, face });
        if face == Face::Front {
            self.queue
                .on_face_up(id, self.clock, self.config.viewing_delay());
            self.run_due(&mut events);
        }
        events
    }

    /// Move the session clock forward, running everything that comes due.
    ///
    /// Continuations run at their own due time, so work they schedule is
    /// timed from that instant rather than from the end of the step.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let target = self.clock.saturating_add(elapsed);
        let mut events = Vec::new();
        while let Some(due) = self.queue.next_due().filter(|&due| due <= target) {
            self.clock = self.clock.max(due);
            self.run_due(&mut events);
        }
        self.clock = target;
        events
    }

    fn run_due(&mut self, events: &mut Vec<GameEvent>) {
        while let Some(task) = self.queue.pop_due(self.clock) {
            match task {
                Continuation::Evaluate(first, second) => self.resolve_pair(first, second, events),
                Continuation::FlipBack(first, second) => self.flip_back(first, second, events),
            }
        }
    }

    fn resolve_pair(&mut self, first: CardId, second: CardId, events: &mut Vec<GameEvent>) {
        match self
            .queue
            .evaluate(first, second, &mut self.grid, &mut self.keeper)
        {
            Evaluation::Match => {
                debug!(%first, %second, combo = self.keeper.combo(), "match");
                events.push(GameEvent::MatchFound { first, second });
                self.check_victory(events);
            }
            Evaluation::Mismatch => {
                debug!(%first, %second, lives = self.keeper.lives(), "mismatch");
                events.push(GameEvent::MismatchFound { first, second });

                let delay = self.config.flip_back_delay();
                if delay.is_zero() {
                    self.flip_back(first, second, events);
                } else {
                    self.queue.schedule_flip_back(first, second, self.clock, delay);
                }

                if self.keeper.is_out_of_lives() && self.outcome == Outcome::InProgress {
                    self.outcome = Outcome::Lost;
                    info!(score = self.keeper.score(), "game over");
                    events.push(GameEvent::GameOver);
                }
            }
            Evaluation::Rejected => {}
        }
    }

    fn flip_back(&mut self, first: CardId, second: CardId, events: &mut Vec<GameEvent>) {
        for id in [first, second] {
            let Some(card) = self.grid.card_mut(id) else {
                continue;
            };
            if let Some(CardEvent::FlipStarted { face }) = card.begin_flip(Face::Back) {
                events.push(GameEvent::FlipRequested { card: id, face });
            }
        }
    }

    fn check_victory(&mut self, events: &mut Vec<GameEvent>) {
        if self.outcome != Outcome::InProgress {
            return;
        }
        if self.keeper.matches() as usize >= self.grid.total_pairs() {
            self.outcome = Outcome::Won;
            info!(
                score = self.keeper.score(),
                moves = self.keeper.moves(),
                "victory"
            );
            events.push(GameEvent::Victory);
            self.save();
        }
    }

    /// Capture a snapshot and write it to the save slot.
    ///
    /// A failed write is logged; the snapshot is returned either way.
    pub fn save(&mut self) -> Snapshot {
        let snapshot = Snapshot::capture(
            &self.grid,
            self.keeper.score(),
            self.keeper.moves(),
            self.keeper.matches(),
        );
        if let Err(e) = self.codec.save(&snapshot) {
            warn!(error = %e, "failed to save snapshot");
        }
        snapshot
    }

    /// Restore from the save slot according to the configured policy.
    ///
    /// Returns `false` (and leaves the session untouched) when nothing
    /// usable is stored.
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "load failed, keeping current session");
                false
            }
        }
    }

    fn try_load(&mut self) -> Result<(), LoadFailure> {
        let snapshot = self.codec.load()?;
        match self.config.restore_policy {
            RestorePolicy::ScoreOnly => {
                self.keeper.set_score(snapshot.score);
            }
            RestorePolicy::Full => {
                let grid = Grid::restore(
                    snapshot.rows as usize,
                    snapshot.columns as usize,
                    &snapshot.pair_keys(),
                    &snapshot.matched,
                    self.config.face_count,
                )
                .map_err(|e| LoadFailure::Inconsistent(e.to_string()))?;

                self.grid = grid;
                self.diagnostics.clear();
                self.queue.clear();
                self.keeper.reset();
                self.keeper.set_score(snapshot.score);
                self.keeper.set_progress(snapshot.move_count, snapshot.total_matches);
                self.outcome = if self.grid.cards().all(Card::is_matched) {
                    Outcome::Won
                } else {
                    Outcome::InProgress
                };
                self.last_activation = None;
            }
        }
        info!(
            score = snapshot.score,
            policy = ?self.config.restore_policy,
            saved_at = %snapshot.timestamp,
            "snapshot loaded"
        );
        Ok(())
    }

    /// Independent copy for trying moves from the current position, with its
    /// own empty save slot.
    ///
    /// The grid is shared structurally, so this is cheap.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            config: self.config.clone(),
            rng: self.rng.clone(),
            grid: self.grid.clone(),
            diagnostics: self.diagnostics.clone(),
            queue: self.queue.clone(),
            keeper: self.keeper.clone(),
            codec: PersistenceCodec::new(self.config.snapshot_format),
            outcome: self.outcome,
            clock: self.clock,
            last_activation: self.last_activation,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.grid.card(id)
    }

    /// Counters for the score/combo/lives display.
    #[must_use]
    pub fn scoreboard(&self) -> ScoreBoard {
        self.keeper.board(self.grid.total_pairs())
    }

    /// Adjustments made while building the current grid.
    #[must_use]
    pub fn diagnostics(&self) -> &[GridDiagnostic] {
        &self.diagnostics
    }

    /// Session clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Revealed cards still waiting for a partner.
    #[must_use]
    pub fn pending_cards(&self) -> &[CardId] {
        self.queue.pending()
    }

    /// Pairs revealed but not yet evaluated.
    #[must_use]
    pub fn pending_evaluations(&self) -> usize {
        self.queue.evaluations_in_flight()
    }

    #[must_use]
    pub fn codec(&self) -> &PersistenceCodec {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardState;

    const STEP: Duration = Duration::from_millis(200);

    fn session(config: SessionConfig, keys: &[u32]) -> GameSession {
        let mut s = GameSession::new(config).unwrap();
        let columns = keys.len() / 2;
        s.start(2, columns, PairLayout::explicit(keys.iter().copied()))
            .unwrap();
        s
    }

    /// Activate, finish the animation and wait out the cooldown.
    fn reveal(s: &mut GameSession, id: u32) -> Vec<GameEvent> {
        let mut events = s.activate(CardId(id));
        events.extend(s.on_animation_complete(CardId(id)));
        events.extend(s.advance(STEP));
        events
    }

    #[test]
    fn test_new_session_is_shuffled_and_in_progress() {
        let s = GameSession::new(SessionConfig::default()).unwrap();
        assert_eq!(s.grid().len(), 12);
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.scoreboard().lives, 10);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn test_odd_config_widened() {
        let s = GameSession::new(SessionConfig::new().with_grid(3, 3)).unwrap();
        assert_eq!(s.grid().columns(), 4);
        assert_eq!(
            s.diagnostics(),
            &[GridDiagnostic::WidenedColumns { from: 3, to: 4 }]
        );
    }

    #[test]
    fn test_activate_emits_events() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        let events = s.activate(CardId(2));
        assert_eq!(
            events,
            vec![
                GameEvent::CardActivated(CardId(2)),
                GameEvent::FlipRequested { card: CardId(2), face: Face::Front },
            ]
        );
        assert_eq!(s.card(CardId(2)).unwrap().state, CardState::Flipping(Face::Front));
    }

    #[test]
    fn test_activate_rejections() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        s.activate(CardId(0));

        // Cooldown
        assert!(s.activate(CardId(1)).is_empty());
        s.advance(STEP);

        // Flipping
        assert!(s.activate(CardId(0)).is_empty());

        // Face up
        s.on_animation_complete(CardId(0));
        assert!(s.activate(CardId(0)).is_empty());

        // Unknown
        assert!(s.activate(CardId(99)).is_empty());
    }

    #[test]
    fn test_zero_cooldown_allows_back_to_back() {
        let config = SessionConfig::default().with_cooldown(Duration::ZERO);
        let mut s = session(config, &[0, 0, 1, 1]);
        assert!(!s.activate(CardId(0)).is_empty());
        assert!(!s.activate(CardId(1)).is_empty());
    }

    #[test]
    fn test_evaluation_waits_for_viewing_delay() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        s.activate(CardId(1));
        s.on_animation_complete(CardId(1));
        assert_eq!(s.pending_evaluations(), 1);

        assert!(s.advance(Duration::from_millis(499)).is_empty());
        let events = s.advance(Duration::from_millis(1));
        assert_eq!(
            events,
            vec![GameEvent::MatchFound { first: CardId(0), second: CardId(1) }]
        );
        assert_eq!(s.pending_evaluations(), 0);
    }

    #[test]
    fn test_mismatch_flip_back_after_delay() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        s.activate(CardId(2));
        s.on_animation_complete(CardId(2));

        let events = s.advance(Duration::from_millis(500));
        assert_eq!(
            events,
            vec![GameEvent::MismatchFound { first: CardId(0), second: CardId(2) }]
        );
        assert_eq!(s.card(CardId(0)).unwrap().state, CardState::FaceUp);

        let events = s.advance(Duration::from_millis(500));
        assert_eq!(
            events,
            vec![
                GameEvent::FlipRequested { card: CardId(0), face: Face::Back },
                GameEvent::FlipRequested { card: CardId(2), face: Face::Back },
            ]
        );

        let done = s.on_animation_complete(CardId(0));
        assert_eq!(done, vec![GameEvent::FlipCompleted { card: CardId(0), face: Face::Back }]);
        assert_eq!(s.card(CardId(0)).unwrap().state, CardState::FaceDown);
        assert!(s.pending_cards().is_empty());
    }

    #[test]
    fn test_single_advance_times_flip_back_from_evaluation() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        s.activate(CardId(2));
        s.on_animation_complete(CardId(2));

        // Evaluation at +500, flip back at +1000, both inside one step
        let events = s.advance(Duration::from_millis(2000));
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], GameEvent::MismatchFound { .. }));
    }

    #[test]
    fn test_zero_viewing_delay_evaluates_on_completion() {
        let config = SessionConfig::default()
            .with_viewing_delay(Duration::ZERO)
            .with_flip_back_delay(Duration::ZERO);
        let mut s = session(config, &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        s.activate(CardId(3));
        let events = s.on_animation_complete(CardId(3));

        assert_eq!(
            events,
            vec![
                GameEvent::FlipCompleted { card: CardId(3), face: Face::Front },
                GameEvent::MismatchFound { first: CardId(0), second: CardId(3) },
                GameEvent::FlipRequested { card: CardId(0), face: Face::Back },
                GameEvent::FlipRequested { card: CardId(3), face: Face::Back },
            ]
        );
    }

    #[test]
    fn test_lock_during_evaluation() {
        let config = SessionConfig::default().lock_during_evaluation();
        let mut s = session(config, &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        reveal(&mut s, 2);

        assert_eq!(s.pending_evaluations(), 1);
        assert!(s.activate(CardId(1)).is_empty());

        s.advance(Duration::from_millis(300));
        assert!(!s.activate(CardId(1)).is_empty());
    }

    #[test]
    fn test_regenerate_resets() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        reveal(&mut s, 0);
        reveal(&mut s, 2);
        s.advance(Duration::from_millis(500));
        assert_eq!(s.scoreboard().lives, 9);

        s.regenerate(4, 4).unwrap();
        assert_eq!(s.grid().len(), 16);
        assert_eq!(s.scoreboard().lives, 10);
        assert_eq!(s.scoreboard().moves, 0);
        assert_eq!(s.pending_evaluations(), 0);
        assert!(s.grid().cards().all(|c| c.state == CardState::FaceDown));
    }

    #[test]
    fn test_start_rejects_bad_layout() {
        let mut s = GameSession::new(SessionConfig::default()).unwrap();
        let err = s.start(2, 2, PairLayout::explicit([0, 1, 2, 3])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLayout(_)));
        // Previous grid stays in place
        assert_eq!(s.grid().len(), 12);
    }

    #[test]
    fn test_fork_is_independent() {
        let mut s = session(SessionConfig::default(), &[0, 0, 1, 1]);
        reveal(&mut s, 0);

        let mut f = s.fork();
        reveal(&mut f, 1);
        f.advance(Duration::from_millis(500));

        assert_eq!(f.scoreboard().matches, 1);
        assert_eq!(s.scoreboard().matches, 0);
        assert_eq!(s.card(CardId(1)).unwrap().state, CardState::FaceDown);
    }
}
