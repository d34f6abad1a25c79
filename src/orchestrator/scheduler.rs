//! Virtual-clock scheduler for deferred transitions.
//!
//! Pauses ("opponent is thinking", "lines about to clear") are deferred
//! tasks, not sleeps. The clock only moves when the owner advances it, so
//! correctness depends on ordering alone: tasks run by due time, and tasks
//! due at the same time run in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

/// Milliseconds on the scheduler's clock.
pub type Millis = u64;

#[derive(Debug)]
struct Scheduled<T> {
    due: Millis,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed so the max-heap pops the earliest task first
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// Deferred task queue with a manually advanced clock.
///
/// ```
/// use gridlock::orchestrator::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(500, "opponent moves");
/// scheduler.schedule(0, "now");
///
/// assert_eq!(scheduler.pop_due(), Some("now"));
/// assert_eq!(scheduler.pop_due(), None);
///
/// scheduler.advance(500);
/// assert_eq!(scheduler.pop_due(), Some("opponent moves"));
/// ```
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` milliseconds have passed.
    pub fn schedule(&mut self, delay: Millis, task: T) {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(due, seq, "task scheduled");
        self.queue.push(Scheduled { due, seq, task });
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Millis) {
        self.now = self.now.saturating_add(elapsed);
    }

    /// Remove the earliest task that is due now.
    pub fn pop_due(&mut self) -> Option<T> {
        if self.queue.peek()?.due > self.now {
            return None;
        }
        self.queue.pop().map(|s| s.task)
    }

    /// Remove the earliest task due at or before `deadline`, moving the
    /// clock to its due time. Tasks it schedules are timed from there.
    pub fn pop_due_by(&mut self, deadline: Millis) -> Option<T> {
        if self.queue.peek()?.due > deadline {
            return None;
        }
        self.pop_next()
    }

    /// Jump the clock to the earliest pending task and remove it.
    pub fn pop_next(&mut self) -> Option<T> {
        let next = self.queue.pop()?;
        self.now = self.now.max(next.due);
        Some(next.task)
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            trace!(dropped, "pending tasks cancelled");
        }
        dropped
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
