//! Per-agent availability, lease objects, and the encounter cooldown map.
//!
//! A claim is only ever made by constructing a lease, and a lease is only
//! ever released by handing it back by value.  Leases are neither `Clone`
//! nor `Copy`, so one claim cannot be released twice and a second claim on
//! a held agent fails when the lease would be created.

use town_core::{AgentId, LeaseId, Millis};

use crate::{Map, ReservationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Free,
    /// Reserved by an unprompted encounter until `until`.
    Encounter { until: Millis, lease: LeaseId },
    /// Held by a player-initiated conversation.
    PlayerConversation { lease: LeaseId },
}

impl Availability {
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    fn lease(self) -> Option<LeaseId> {
        match self {
            Self::Free => None,
            Self::Encounter { lease, .. } | Self::PlayerConversation { lease } => Some(lease),
        }
    }
}

/// Both participants of one encounter.
#[derive(Debug)]
pub struct PairLease {
    id:     LeaseId,
    agents: [AgentId; 2],
}

impl PairLease {
    pub fn id(&self) -> LeaseId {
        self.id
    }

    pub fn agents(&self) -> [AgentId; 2] {
        self.agents
    }
}

/// A resident held for a player conversation.
#[derive(Debug)]
pub struct ConversationLease {
    id:    LeaseId,
    agent: AgentId,
}

impl ConversationLease {
    pub fn id(&self) -> LeaseId {
        self.id
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }
}

pub struct ReservationBook {
    slots:          Vec<Availability>,
    /// Agent → start time of its most recent encounter.
    last_encounter: Map<AgentId, Millis>,
    next_lease:     u64,
}

impl ReservationBook {
    pub fn new(agent_count: usize) -> Self {
        Self {
            slots:          vec![Availability::Free; agent_count],
            last_encounter: Map::default(),
            next_lease:     0,
        }
    }

    pub fn availability(&self, agent: AgentId) -> Option<Availability> {
        self.slots.get(agent.index()).copied()
    }

    /// `false` for unknown agents.
    #[inline]
    pub fn is_free(&self, agent: AgentId) -> bool {
        self.availability(agent).is_some_and(Availability::is_free)
    }

    pub fn last_encounter(&self, agent: AgentId) -> Option<Millis> {
        self.last_encounter.get(&agent).copied()
    }

    /// `true` when `agent` never had an encounter or its last one started
    /// more than `cooldown_ms` before `now`.
    pub fn off_cooldown(&self, agent: AgentId, now: Millis, cooldown_ms: u64) -> bool {
        self.last_encounter(agent)
            .is_none_or(|started| now.since(started) > cooldown_ms)
    }

    /// Claimed flags indexed by `AgentId`.
    pub fn claimed_flags(&self) -> Vec<bool> {
        self.slots.iter().map(|s| !s.is_free()).collect()
    }

    // ── Encounters ────────────────────────────────────────────────────────

    /// Claim `a` and `b` together until `until` and stamp both cooldowns
    /// with `now`.  Nothing changes unless both are free.
    pub fn claim_pair(
        &mut self,
        a:     AgentId,
        b:     AgentId,
        now:   Millis,
        until: Millis,
    ) -> Result<PairLease, ReservationError> {
        if a == b {
            return Err(ReservationError::SameAgent(a));
        }
        for agent in [a, b] {
            match self.availability(agent) {
                None => return Err(ReservationError::UnknownAgent(agent)),
                Some(Availability::Free) => {}
                Some(_) => return Err(ReservationError::Claimed(agent)),
            }
        }

        let id = self.mint();
        for agent in [a, b] {
            self.slots[agent.index()] = Availability::Encounter { until, lease: id };
            self.last_encounter.insert(agent, now);
        }
        Ok(PairLease { id, agents: [a, b] })
    }

    /// Move the expiry of a held pair.
    pub fn extend(&mut self, lease: &PairLease, until: Millis) {
        for agent in lease.agents {
            if let Some(slot) = self.slots.get_mut(agent.index()) {
                if slot.lease() == Some(lease.id) {
                    *slot = Availability::Encounter { until, lease: lease.id };
                }
            }
        }
    }

    /// Free both participants at once.
    pub fn release_pair(&mut self, lease: PairLease) {
        for agent in lease.agents {
            self.free_if_held(agent, lease.id);
        }
    }

    // ── Player conversations ──────────────────────────────────────────────

    pub fn claim_conversation(&mut self, agent: AgentId) -> Result<ConversationLease, ReservationError> {
        match self.availability(agent) {
            None => Err(ReservationError::UnknownAgent(agent)),
            Some(Availability::Free) => {
                let id = self.mint();
                self.slots[agent.index()] = Availability::PlayerConversation { lease: id };
                Ok(ConversationLease { id, agent })
            }
            Some(_) => Err(ReservationError::Claimed(agent)),
        }
    }

    pub fn release_conversation(&mut self, lease: ConversationLease) {
        self.free_if_held(lease.agent, lease.id);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn mint(&mut self) -> LeaseId {
        let id = LeaseId(self.next_lease);
        self.next_lease += 1;
        id
    }

    fn free_if_held(&mut self, agent: AgentId, lease: LeaseId) {
        if let Some(slot) = self.slots.get_mut(agent.index()) {
            if slot.lease() == Some(lease) {
                *slot = Availability::Free;
            }
        }
    }
}
