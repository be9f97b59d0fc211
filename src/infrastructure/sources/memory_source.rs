use std::collections::VecDeque;

use crate::domain::entities::reading::Reading;
use crate::domain::ports::source::{ReadingSource, SourceError};

/// Reading source backed by an in-memory queue.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pending: VecDeque<Reading>,
    total: usize,
}

impl MemorySource {
    #[must_use]
    pub fn new(readings: Vec<Reading>) -> Self {
        let total = readings.len();
        Self {
            pending: readings.into(),
            total,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FromIterator<Reading> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ReadingSource for MemorySource {
    fn next_reading(&mut self) -> Result<Option<Reading>, SourceError> {
        Ok(self.pending.pop_front())
    }

    fn describe(&self) -> String {
        format!("memory ({} readings)", self.total)
    }
}
