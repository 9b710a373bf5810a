//! Cancellable single-shot delayed tasks on a caller-driven clock.
//!
//! The menu never reads wall-clock time. The host advances the queue with the
//! time elapsed since the previous call, and due payloads are returned in
//! deadline order.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire after `delay`
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            deadline: self.now + delay,
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance the clock and return the payloads that came due, earliest first
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.deadline <= now);
        self.pending = pending;

        due.sort_by_key(|t| (t.deadline, t.id));
        due.into_iter().map(|t| t.payload).collect()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}
