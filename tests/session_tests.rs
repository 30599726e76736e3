//! Session integration tests.
//!
//! These drive a `GameSession` the way a presentation layer would:
//! activate, report animation completion, and advance the clock.

use std::time::Duration;

use memory_match::core::{CardId, CardState, Face, PairLayout, SessionConfig};
use memory_match::session::{GameEvent, GameSession, Outcome};

const COOLDOWN: Duration = Duration::from_millis(200);
const VIEWING: Duration = Duration::from_millis(500);
const FLIP_BACK: Duration = Duration::from_millis(500);

fn config() -> SessionConfig {
    SessionConfig::new()
        .with_grid(2, 2)
        .with_scoring(100, 10, 50)
        .with_lives(10)
}

fn two_by_two(config: SessionConfig) -> GameSession {
    let mut session = GameSession::new(config).unwrap();
    session.start(2, 2, PairLayout::explicit([0, 0, 1, 1])).unwrap();
    session
}

/// Reveal two cards and let the evaluation run.
fn play_pair(session: &mut GameSession, a: u32, b: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for id in [a, b] {
        events.extend(session.activate(CardId(id)));
        events.extend(session.on_animation_complete(CardId(id)));
        events.extend(session.advance(COOLDOWN));
    }
    events.extend(session.advance(VIEWING));
    events
}

/// Finish every flip-back the session asked for.
fn settle(session: &mut GameSession, events: &[GameEvent]) {
    for event in events {
        if let GameEvent::FlipRequested { card, face: Face::Back } = event {
            session.on_animation_complete(*card);
        }
    }
}

// =============================================================================
// Scoring Scenarios
// =============================================================================

/// Two matches in a row: combo escalates and the game is won.
#[test]
fn test_two_matches_win() {
    let mut session = two_by_two(config());

    let events = play_pair(&mut session, 0, 1);
    assert!(events.contains(&GameEvent::MatchFound { first: CardId(0), second: CardId(1) }));

    let board = session.scoreboard();
    assert_eq!((board.combo, board.score, board.matches), (1, 150, 1));
    assert_eq!(session.outcome(), Outcome::InProgress);

    let events = play_pair(&mut session, 2, 3);
    assert!(events.contains(&GameEvent::Victory));

    let board = session.scoreboard();
    assert_eq!((board.combo, board.score, board.matches), (2, 350, 2));
    assert_eq!(board.moves, 2);
    assert_eq!(session.outcome(), Outcome::Won);

    // Victory saved a snapshot
    let saved = session.codec().load().unwrap();
    assert_eq!(saved.score, 350);
    assert_eq!(saved.total_matches, 2);
    assert_eq!(saved.matched, vec![true; 4]);
}

/// A wrong pair costs a life, breaks the combo and flips both cards back.
#[test]
fn test_mismatch() {
    let mut session = two_by_two(config());

    let events = play_pair(&mut session, 0, 2);
    assert!(events.contains(&GameEvent::MismatchFound { first: CardId(0), second: CardId(2) }));

    let board = session.scoreboard();
    assert_eq!(board.combo, 0);
    assert_eq!(board.score, 0);
    assert_eq!(board.lives, 9);
    assert_eq!(board.moves, 1);

    let events = session.advance(FLIP_BACK);
    assert_eq!(
        events,
        vec![
            GameEvent::FlipRequested { card: CardId(0), face: Face::Back },
            GameEvent::FlipRequested { card: CardId(2), face: Face::Back },
        ]
    );
    settle(&mut session, &events);
    assert_eq!(session.card(CardId(0)).unwrap().state, CardState::FaceDown);
    assert_eq!(session.card(CardId(2)).unwrap().state, CardState::FaceDown);
}

/// The penalty comes off an existing score and the combo restarts.
#[test]
fn test_mismatch_after_match() {
    let mut session = GameSession::new(config().with_grid(2, 3)).unwrap();
    session
        .start(2, 3, PairLayout::explicit([0, 0, 1, 1, 2, 2]))
        .unwrap();

    play_pair(&mut session, 0, 1);
    let events = play_pair(&mut session, 2, 4);
    assert!(events.contains(&GameEvent::MismatchFound { first: CardId(2), second: CardId(4) }));

    let board = session.scoreboard();
    assert_eq!((board.score, board.combo, board.lives), (140, 0, 9));
}

// =============================================================================
// Loss and Terminal State
// =============================================================================

/// Running out of lives ends the game; further activations do nothing.
#[test]
fn test_loss() {
    let mut session = two_by_two(config().with_lives(2));

    let events = play_pair(&mut session, 0, 2);
    assert!(!events.contains(&GameEvent::GameOver));
    let flip_back = session.advance(FLIP_BACK);
    settle(&mut session, &flip_back);

    let events = play_pair(&mut session, 1, 3);
    assert!(events.contains(&GameEvent::GameOver));
    assert_eq!(session.outcome(), Outcome::Lost);
    assert_eq!(session.scoreboard().lives, 0);

    // Mismatched cards still go back
    let flip_back = session.advance(FLIP_BACK);
    assert_eq!(flip_back.len(), 2);
    settle(&mut session, &flip_back);

    session.advance(COOLDOWN);
    for id in 0..4 {
        assert!(session.activate(CardId(id)).is_empty());
    }
}

/// A won game accepts nothing until it is restarted.
#[test]
fn test_restart_after_victory() {
    let mut session = two_by_two(config());
    play_pair(&mut session, 0, 1);
    play_pair(&mut session, 2, 3);
    assert_eq!(session.outcome(), Outcome::Won);
    assert!(session.activate(CardId(0)).is_empty());

    session.start(2, 2, PairLayout::explicit([0, 1, 0, 1])).unwrap();
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert!(!session.activate(CardId(0)).is_empty());
}

/// Time passing after victory changes nothing.
#[test]
fn test_outcome_is_terminal() {
    let mut session = two_by_two(config().with_lives(1));
    play_pair(&mut session, 0, 1);
    let events = play_pair(&mut session, 2, 3);
    assert!(events.contains(&GameEvent::Victory));

    session.advance(Duration::from_secs(10));
    assert!(session.activate(CardId(0)).is_empty());
    assert_eq!(session.outcome(), Outcome::Won);
}

// =============================================================================
// Activation Rules
// =============================================================================

#[test]
fn test_activate_matched_card_is_noop() {
    let mut session = two_by_two(config());
    play_pair(&mut session, 0, 1);

    assert_eq!(session.card(CardId(0)).unwrap().state, CardState::Matched);
    assert!(session.activate(CardId(0)).is_empty());
    assert!(session.activate(CardId(1)).is_empty());
}

#[test]
fn test_activate_flipping_card_is_noop() {
    let mut session = two_by_two(config());
    session.activate(CardId(0));
    session.advance(COOLDOWN);

    assert!(session.activate(CardId(0)).is_empty());
    assert_eq!(session.card(CardId(0)).unwrap().state, CardState::Flipping(Face::Front));
}

/// Rapid input inside the cooldown counts as one activation.
#[test]
fn test_cooldown_debounces_bursts() {
    let mut session = two_by_two(config());

    assert!(!session.activate(CardId(0)).is_empty());
    session.advance(Duration::from_millis(50));
    assert!(session.activate(CardId(1)).is_empty());
    session.advance(Duration::from_millis(149));
    assert!(session.activate(CardId(1)).is_empty());
    session.advance(Duration::from_millis(1));
    assert!(!session.activate(CardId(1)).is_empty());
}

/// Completing an animation that was never started does nothing.
#[test]
fn test_stray_animation_complete() {
    let mut session = two_by_two(config());
    assert!(session.on_animation_complete(CardId(0)).is_empty());
    assert!(session.on_animation_complete(CardId(42)).is_empty());
    assert_eq!(session.card(CardId(0)).unwrap().state, CardState::FaceDown);
    assert!(session.pending_cards().is_empty());
}

// =============================================================================
// Pending Queue Overlap
// =============================================================================

/// A third card can be revealed while the first pair is still waiting.
#[test]
fn test_third_card_during_viewing_delay() {
    let mut session = GameSession::new(config().with_grid(2, 3)).unwrap();
    session
        .start(2, 3, PairLayout::explicit([0, 0, 1, 1, 2, 2]))
        .unwrap();

    for id in [0, 2] {
        session.activate(CardId(id));
        session.on_animation_complete(CardId(id));
        session.advance(COOLDOWN);
    }
    assert_eq!(session.pending_evaluations(), 1);

    let events = session.activate(CardId(4));
    assert!(!events.is_empty());
    session.on_animation_complete(CardId(4));
    assert_eq!(session.pending_cards(), &[CardId(4)]);

    let face_up = session
        .grid()
        .cards()
        .filter(|c| c.state == CardState::FaceUp)
        .count();
    assert_eq!(face_up, 3);

    // First pair still resolves on schedule
    let events = session.advance(Duration::from_millis(300));
    assert!(events.contains(&GameEvent::MismatchFound { first: CardId(0), second: CardId(2) }));
    assert_eq!(session.pending_cards(), &[CardId(4)]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_insufficient_faces_still_starts() {
    let config = SessionConfig::new().with_grid(4, 4).with_face_count(3);
    let session = GameSession::new(config).unwrap();

    assert_eq!(session.grid().len(), 16);
    assert_eq!(session.diagnostics().len(), 1);
    assert!(session.grid().cards().all(|c| c.face.0 < 3));
}

#[test]
fn test_same_seed_same_deal() {
    let a = GameSession::new(SessionConfig::new().with_grid(4, 5).with_seed(9)).unwrap();
    let b = GameSession::new(SessionConfig::new().with_grid(4, 5).with_seed(9)).unwrap();
    assert_eq!(a.grid().pair_keys(), b.grid().pair_keys());
}
