//! Single-bucket FIFO event queue.

use std::collections::VecDeque;

/// FIFO queue of pending events.
///
/// Pushing never blocks and never rejects. Popping and draining yield events
/// in exactly the order they were pushed.
pub struct EventQueue<E> {
    events: VecDeque<E>,
    /// Total number of events ever pushed.
    pushed: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            pushed: 0,
        }
    }
}

impl<E> EventQueue<E> {
    /// Create a new empty event queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the back of the queue.
    pub fn push(&mut self, event: E) {
        self.pushed += 1;
        self.events.push_back(event);
    }

    /// Pop the oldest event.
    pub fn pop(&mut self) -> Option<E> {
        self.events.pop_front()
    }

    /// Drain every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.events.drain(..)
    }

    /// Peek at queued events without consuming them, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.events.iter()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Number of events pushed over the queue's lifetime.
    #[must_use]
    pub const fn total_pushed(&self) -> u64 {
        self.pushed
    }
}

impl<E> core::fmt::Debug for EventQueue<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.events.len())
            .field("pushed", &self.pushed)
            .finish()
    }
}
