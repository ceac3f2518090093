//! Time-ordered action lists driven by the tick clock.

use std::collections::VecDeque;

use town_core::Millis;

/// Actions scheduled at absolute times.
///
/// Entries with equal times fire in insertion order.
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    entries: VecDeque<(Millis, A)>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self { entries: VecDeque::new() }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: Millis, action: A) {
        let pos = self.entries.partition_point(|(t, _)| *t <= at);
        self.entries.insert(pos, (at, action));
    }

    /// Remove and return every action due at or before `now`, in order.
    pub fn due(&mut self, now: Millis) -> Vec<(Millis, A)> {
        let split = self.entries.partition_point(|(t, _)| *t <= now);
        self.entries.drain(..split).collect()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.front().map(|(t, _)| *t)
    }

    /// Drop everything not yet fired.
    pub fn truncate(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Millis, A)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
