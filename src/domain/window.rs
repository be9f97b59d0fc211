//! Bounded FIFO buffer of the most recent readings.

use std::collections::VecDeque;

use crate::domain::entities::reading::Reading;

/// Default number of readings kept for statistics and display.
pub const DEFAULT_CAPACITY: usize = 200;

/// Sliding window over the most recent readings, oldest first.
///
/// Pushing past capacity evicts from the head, so after any sequence of
/// pushes the window holds exactly the last `min(pushed, capacity)` readings
/// in push order.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl SlidingWindow {
    /// Creates an empty window. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
    }

    /// Current contents, oldest first. Does not mutate the window.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().cloned().collect()
    }

    /// Iterates the contents oldest first without copying
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn reset(&mut self) {
        self.readings.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
