//! Deferred completions: scheduled work with no wall-clock dependency.
//!
//! The UI this domain backs simulates "thinking", walking directions, and
//! payment processing with cosmetic delays. Logic never reads the clock;
//! a completion fires when the owner explicitly asks for it, so tests run
//! fully synchronously. The recorded delay is advisory presentation
//! metadata only.

use std::collections::VecDeque;
use std::time::Duration;

/// A completion that has been scheduled but not yet delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<T> {
    payload: T,
    delay: Duration,
}

impl<T> Deferred<T> {
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Advisory delay; nothing in the domain waits on it.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// FIFO queue of pending completions.
///
/// Completion order is schedule order. Cancelling drops the pending payloads
/// and nothing else — a cancelled completion has no observable effect.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    pending: VecDeque<Deferred<T>>,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn schedule(&mut self, payload: T, delay: Duration) {
        self.pending.push_back(Deferred { payload, delay });
    }

    /// Deliver the oldest pending completion, if any.
    pub fn complete_next(&mut self) -> Option<T> {
        self.pending.pop_front().map(Deferred::into_payload)
    }

    /// Deliver everything pending, oldest first.
    pub fn complete_all(&mut self) -> Vec<T> {
        self.pending.drain(..).map(Deferred::into_payload).collect()
    }

    /// Drop everything pending without delivering it.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_in_schedule_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule("first", Duration::from_secs(3));
        queue.schedule("second", Duration::from_millis(1));
        // A shorter advisory delay does not jump the queue.
        assert_eq!(queue.complete_next(), Some("first"));
        assert_eq!(queue.complete_next(), Some("second"));
        assert_eq!(queue.complete_next(), None);
    }

    #[test]
    fn cancel_drops_pending_payloads() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1, Duration::ZERO);
        queue.schedule(2, Duration::ZERO);
        queue.cancel_all();
        assert!(queue.is_empty());
        assert_eq!(queue.complete_next(), None);
    }

    #[test]
    fn complete_all_drains_everything() {
        let mut queue = DeferredQueue::new();
        queue.schedule('a', Duration::ZERO);
        queue.schedule('b', Duration::ZERO);
        assert_eq!(queue.complete_all(), vec!['a', 'b']);
        assert!(queue.is_empty());
    }
}
