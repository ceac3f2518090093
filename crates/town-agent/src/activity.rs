//! What an agent is doing.
//!
//! `Activity` is what the state machine stores: each variant carries exactly
//! the data valid for it, so an exploration target can only exist while
//! exploring.  `ActivityState` is what the rendering boundary reports; it adds
//! `Idle`, which is derived from availability and never stored.

use std::fmt;

use town_core::{Millis, Point};

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Activity {
    /// Walking toward the current goal's location.
    #[default]
    Moving,
    /// Performing the current goal at its location.
    Working { started: Millis },
    /// Wandering around `base` after finishing a goal.
    Exploring { started: Millis, base: Point, target: Point },
    /// Goal list exhausted; waiting before a new one is generated.
    RegeneratingTasks { since: Millis },
}

impl Activity {
    /// The state reported for an agent that is free to act.
    pub fn state(&self) -> ActivityState {
        match self {
            Activity::Moving                 => ActivityState::Moving,
            Activity::Working { .. }         => ActivityState::Working,
            Activity::Exploring { .. }       => ActivityState::Exploring,
            Activity::RegeneratingTasks { .. } => ActivityState::RegeneratingTasks,
        }
    }
}

/// Reported activity state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityState {
    Moving,
    Working,
    Exploring,
    Idle,
    RegeneratingTasks,
}

impl ActivityState {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityState::Moving            => "moving",
            ActivityState::Working           => "working",
            ActivityState::Exploring         => "exploring",
            ActivityState::Idle              => "idle",
            ActivityState::RegeneratingTasks => "regenerating_tasks",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
