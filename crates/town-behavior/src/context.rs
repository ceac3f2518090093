//! Read-only simulation state passed to every behavior callback.

use town_agent::Agent;
use town_core::{AgentId, Millis, Tick, TownConfig};
use town_map::{LocationRegistry, ProximityIndex};
use town_mobility::MotionEngine;
use town_schedule::TaskGenerator;

/// A read-only snapshot of the town passed to every
/// [`BehaviorModel`][crate::BehaviorModel] call.
///
/// Built once per tick by town-sim and shared immutably across all agents
/// during the intent phase.  `agents`, `suspended`, and `proximity` all
/// describe the town as it was at the start of the tick.
pub struct SimContext<'a> {
    pub tick: Tick,
    /// Timestamp every timer is compared against this tick.
    pub now:  Millis,

    pub config: &'a TownConfig,

    /// Every agent record, indexed by `AgentId`.
    pub agents: &'a [Agent],

    /// `suspended[id]` is `true` while the agent is reserved by an encounter
    /// or held in a player conversation.
    pub suspended: &'a [bool],

    /// The `suspended` flags as they stood at the end of the previous tick,
    /// so a suspension that starts or ends this tick shows up as a
    /// transition.
    pub was_suspended: &'a [bool],

    /// Positions of `agents`, for neighbour queries.
    pub proximity: &'a ProximityIndex,

    pub locations: &'a LocationRegistry,
    pub motion:    &'a MotionEngine,
    pub tasks:     &'a TaskGenerator,

    /// `false` while an encounter or player session holds the global latch;
    /// no unprompted encounter may be proposed then.
    pub encounters_open: bool,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn is_suspended(&self, agent: AgentId) -> bool {
        self.suspended.get(agent.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn was_suspended(&self, agent: AgentId) -> bool {
        self.was_suspended.get(agent.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn agent(&self, agent: AgentId) -> Option<&'a Agent> {
        self.agents.get(agent.index())
    }

    /// Agents strictly within the interaction distance of `agent`, ascending id.
    pub fn neighbours(&self, agent: &Agent) -> Vec<AgentId> {
        self.proximity
            .within(agent.position, self.config.interaction_distance, agent.id)
    }
}
