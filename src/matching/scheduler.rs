//! Timer-scheduled continuations.
//!
//! The engine never sleeps. Work that must happen "after D" is stored here
//! with its due time on the session clock, and the clock owner pulls due
//! work out with [`Scheduler::pop_due`]. Each scheduled task runs exactly
//! once; there is no cancellation.

use std::time::Duration;

use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Scheduled<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Ordered set of pending continuations.
///
/// Tasks come out by due time; tasks due at the same instant come out in
/// the order they were scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduler<T> {
    tasks: SmallVec<[Scheduled<T>; 4]>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            tasks: SmallVec::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has passed after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(Scheduled {
            due: now.saturating_add(delay),
            seq,
            task,
        });
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        Some(self.tasks.remove(index).task)
    }

    /// When the next task becomes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|s| s.due).min()
    }

    /// Iterate over pending tasks (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tasks.iter().map(|s| &s.task)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
