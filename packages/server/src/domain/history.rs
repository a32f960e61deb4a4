//! Bounded, insertion-ordered event log replayed to newly joined clients.

use std::collections::VecDeque;

/// Number of events kept before the oldest ones are evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;
/// Number of most recent events sent to a client when it joins.
pub const DEFAULT_REPLAY_LIMIT: usize = 50;

/// FIFO buffer holding at most `capacity` entries.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> HistoryBuffer<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail, evicting from the head while over capacity.
    pub fn append(&mut self, entry: T) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The most recent `n` entries (or fewer) in arrival order.
    pub fn tail(&self, n: usize) -> Vec<T> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
