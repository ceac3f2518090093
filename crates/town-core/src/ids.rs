//! Identifier newtypes.
//!
//! Agents are numbered densely from zero in roster order, so an `AgentId`
//! is also the agent's slot in every per-agent `Vec`.  Tickets and leases
//! come from monotonically increasing counters and are never reused within
//! a run.

use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident($repr:ty) => $label:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $repr);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

id_newtype! {
    /// An agent, resident or player.
    AgentId(u32) => "agent"
}

id_newtype! {
    /// Pairs a dialogue request with its reply.
    TicketId(u64) => "ticket"
}

id_newtype! {
    /// One claim in the reservation book.
    LeaseId(u64) => "lease"
}

impl AgentId {
    /// Slot in per-agent vectors.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The id for slot `index`, if it fits.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }
}
