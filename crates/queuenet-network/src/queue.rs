//! Unbounded FIFO waiting lines.
//!
//! Two flavours share one contract (`add`, `remove`, `is_empty`, `size`):
//!
//! - [`CounterQueue`] is a bare occupancy counter, used when the identity
//!   of waiting items is irrelevant. Removing from an empty counter is a
//!   no-op.
//! - [`TokenQueue`] keeps the tokens themselves, used when an item's class
//!   must survive the wait. Removing from an empty token queue is a
//!   programming error and panics; [`TokenQueue::try_remove`] is the
//!   fallible form.
//!
//! Both track the peak size seen since construction.

use std::collections::VecDeque;

/// Occupancy counter with no item identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterQueue {
    len: usize,
    peak: usize,
}

impl CounterQueue {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one waiting item.
    pub fn add(&mut self) {
        self.len += 1;
        self.peak = self.peak.max(self.len);
    }

    /// Remove one waiting item. Returns `false` (and does nothing) if empty.
    pub fn remove(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        true
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of waiting items.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Largest size observed.
    pub fn peak(&self) -> usize {
        self.peak
    }
}

/// FIFO of tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenQueue<T> {
    items: VecDeque<T>,
    peak: usize,
}

impl<T> TokenQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            peak: 0,
        }
    }

    /// Append a token at the back.
    pub fn add(&mut self, token: T) {
        self.items.push_back(token);
        self.peak = self.peak.max(self.items.len());
    }

    /// Remove the token at the front.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Callers must check
    /// [`is_empty()`](Self::is_empty) first.
    pub fn remove(&mut self) -> T {
        match self.items.pop_front() {
            Some(token) => token,
            None => panic!("remove() called on an empty TokenQueue"),
        }
    }

    /// Remove the token at the front, or `None` if empty.
    pub fn try_remove(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// The token at the front, if any.
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of waiting tokens.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Largest size observed.
    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl<T> Default for TokenQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
