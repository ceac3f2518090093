//! What one agent's tick produced.

use town_agent::{ActivityState, Agent};
use town_core::AgentId;

/// A request that needs cross-agent arbitration in the apply phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start an unprompted encounter with `partner`.
    ///
    /// town-sim accepts it only if both agents are off cooldown, neither is
    /// claimed, and the global latch is open.  On acceptance the proposer's
    /// record for this tick is discarded in favour of its snapshot, halted.
    ProposeEncounter { partner: AgentId },
}

/// Result of one [`BehaviorModel::step`][crate::BehaviorModel::step].
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The agent's record for the next tick.
    pub next:    Agent,
    pub intents: Vec<Intent>,
    /// `(from, to)` when the reported state changed this tick.
    pub transition: Option<(ActivityState, ActivityState)>,
}

impl StepOutcome {
    pub fn unchanged(next: Agent) -> Self {
        Self { next, intents: Vec::new(), transition: None }
    }

    /// The encounter partner this agent proposed, if any.
    pub fn proposal(&self) -> Option<AgentId> {
        self.intents.iter().find_map(|i| match i {
            Intent::ProposeEncounter { partner } => Some(*partner),
        })
    }
}
