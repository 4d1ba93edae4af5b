//! Deferred work owned by a session.
//!
//! Instead of free-running interval and timeout callbacks, every delayed
//! action is a [`Task`] in a queue the session owns. Nothing runs except
//! inside [`GameSession::advance`](crate::GameSession::advance), so a
//! cancelled task can never fire. `submit_move` and `reset` call `advance`
//! with their own `now` before touching the queue, so hosts may deliver
//! input before they get around to an overdue deadline.

use super::types::PlayerId;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Work the session defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    /// One-second game clock tick.
    ClockTick,
    /// Refresh of the quick-move countdown display.
    TurnTick,
    /// The computer plays its move.
    ComputerMove,
    /// A player's "bonus earned" flag expires.
    ClearBonusFlag(PlayerId),
}

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: Duration,
    id: TaskId,
    task: Task,
}

/// Queue of tasks ordered by deadline.
///
/// Tasks with the same deadline pop in the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_id: u64,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` to run at `due`.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, due: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry { due, id, task }));
        id
    }

    /// Drops one task. Unknown or already-run ids are ignored.
    pub fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|Reverse(entry)| entry.id != id);
    }

    /// Drops every task matching `predicate`.
    pub fn cancel_where(&mut self, predicate: impl Fn(&Task) -> bool) {
        self.queue.retain(|Reverse(entry)| !predicate(&entry.task));
    }

    /// Drops every pending task.
    #[instrument(skip(self), fields(pending = self.queue.len()))]
    pub fn cancel_all(&mut self) {
        debug!("Cancelling all scheduled tasks");
        self.queue.clear();
    }

    /// Deadline of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due <= now => self
                .queue
                .pop()
                .map(|Reverse(entry)| (entry.due, entry.task)),
            _ => None,
        }
    }

    /// True if a task of this kind is pending.
    pub fn is_pending(&self, task: Task) -> bool {
        self.queue.iter().any(|Reverse(entry)| entry.task == task)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
