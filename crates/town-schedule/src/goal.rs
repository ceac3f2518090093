//! Goals and the per-agent goal list.
//!
//! # Copy-on-write
//!
//! A `GoalList` shares its entries behind an `Arc`, so cloning an agent
//! record for the per-tick snapshot is cheap.  Completing a goal never
//! touches the shared entries: [`GoalList::complete_current`] builds a fresh
//! list with the one entry replaced and the cursor advanced.  A snapshot taken
//! before the completion keeps seeing the old list.

use std::sync::Arc;

/// One task a resident performs at a named location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub task:      String,
    /// Key into the location registry.
    pub location:  String,
    pub completed: bool,
}

impl Goal {
    pub fn new(task: impl Into<String>, location: impl Into<String>) -> Self {
        Self { task: task.into(), location: location.into(), completed: false }
    }
}

/// An ordered goal list plus a monotonically increasing cursor.
///
/// Invariant: `cursor <= len()`.  `cursor == len()` means the list is
/// exhausted.
#[derive(Clone, Debug, Default)]
pub struct GoalList {
    goals:  Arc<[Goal]>,
    cursor: usize,
}

impl GoalList {
    /// A fresh list with the cursor at 0.
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals: goals.into(), cursor: 0 }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.goals.len()
    }

    /// The goal under the cursor, or `None` once exhausted.
    #[inline]
    pub fn current(&self) -> Option<&Goal> {
        self.goals.get(self.cursor)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    /// Mark the current goal completed and advance the cursor, returning the
    /// new list.  An exhausted list is returned unchanged.
    pub fn complete_current(&self) -> GoalList {
        if self.is_exhausted() {
            return self.clone();
        }
        let goals: Arc<[Goal]> = self
            .goals
            .iter()
            .enumerate()
            .map(|(i, g)| {
                if i == self.cursor {
                    Goal { completed: true, ..g.clone() }
                } else {
                    g.clone()
                }
            })
            .collect();
        GoalList { goals, cursor: self.cursor + 1 }
    }

    /// `true` if both lists share the same backing entries.
    pub fn shares_entries_with(&self, other: &GoalList) -> bool {
        Arc::ptr_eq(&self.goals, &other.goals)
    }
}
