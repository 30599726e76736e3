//! Pair matching: the pending-pair queue and its scheduled continuations.
//!
//! ## Flow
//!
//! 1. A card finishes turning face up and is handed to [`MatchQueue::on_face_up`]
//! 2. The second card of a pair empties the pending list and schedules an
//!    evaluation after the viewing delay
//! 3. When the evaluation comes due, [`MatchQueue::evaluate`] scores the pair
//!    and locks matched cards; mismatched cards are turned back, optionally
//!    after a second delay
//!
//! The session clock drives everything; see [`Scheduler`].

mod queue;
mod scheduler;

pub use queue::{Continuation, Evaluation, MatchQueue};
pub use scheduler::Scheduler;
