//! What the rendering boundary consumes.

use town_agent::ActivityState;
use town_core::{AgentId, Facing, Point};

/// Everything needed to draw one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id:                AgentId,
    pub name:              String,
    pub position:          Point,
    pub facing:            Facing,
    pub frame:             u32,
    pub moving:            bool,
    pub state:             ActivityState,
    pub selected:          bool,
    pub player_controlled: bool,
    /// Held in a player conversation.
    pub in_conversation:   bool,
}

/// Bubble and panel cues, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationEvent {
    EncounterStarted { first: AgentId, second: AgentId },
    /// Show a typing indicator for dialogue line `line`.
    Typing { speaker: AgentId, line: usize },
    Message { speaker: AgentId, line: usize, text: String },
    /// Remove the bubble for line `line`.
    Retire { speaker: AgentId, line: usize },
    EncounterEnded { first: AgentId, second: AgentId },

    /// The player set off toward `resident`.
    ConversationRequested { resident: AgentId },
    SessionOpened { resident: AgentId },
    PlayerSaid { resident: AgentId, text: String },
    Reply { resident: AgentId, text: String },
    SessionEnded { resident: AgentId },

    PersonalityReady { agent: AgentId },
}
