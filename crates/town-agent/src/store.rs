//! Agent storage: `AgentStore` (records) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The parallel intent phase needs `&mut AgentRngs` (one RNG per worker) and
//! `&AgentStore`-derived snapshots at the same time.  Keeping the RNGs out of
//! the store lets both borrows coexist.

use town_core::{AgentId, AgentRng, CoreError, CoreResult};

use crate::Agent;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent seeded RNGs, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Owns every agent record.  `AgentId` is the index.
///
/// There is no `get_mut`: records change only through [`replace`](Self::replace).
pub struct AgentStore {
    agents: Vec<Agent>,
    player: Option<AgentId>,
}

impl AgentStore {
    pub(crate) fn new(agents: Vec<Agent>) -> Self {
        let player = agents.iter().find(|a| a.is_player()).map(|a| a.id);
        Self { agents, player }
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// Swap in a new record for `agent.id`, returning the old one.
    pub fn replace(&mut self, agent: Agent) -> CoreResult<Agent> {
        let slot = self
            .agents
            .get_mut(agent.id.index())
            .ok_or(CoreError::AgentNotFound(agent.id))?;
        Ok(std::mem::replace(slot, agent))
    }

    /// The player-controlled agent, if any.
    #[inline]
    pub fn player(&self) -> Option<AgentId> {
        self.player
    }

    /// First agent named `name`; names are unique within a store.
    pub fn find_by_name(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// All records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Clone every record.  Cheap: goals and conversation logs are shared.
    pub fn snapshot(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
