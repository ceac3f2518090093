//! Flat row types shared by every writer.

use town_agent::ActivityState;
use town_core::{AgentId, Millis, Tick};
use town_sim::{AgentView, PresentationEvent};

#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:              u64,
    pub time_ms:           u64,
    pub agent_id:          u32,
    pub name:              String,
    pub x:                 f32,
    pub y:                 f32,
    pub facing:            String,
    pub frame:             u32,
    pub moving:            bool,
    pub state:             &'static str,
    pub selected:          bool,
    pub player_controlled: bool,
    pub in_conversation:   bool,
}

impl AgentSnapshotRow {
    pub fn from_view(tick: Tick, now: Millis, view: &AgentView) -> Self {
        Self {
            tick:              tick.0,
            time_ms:           now.0,
            agent_id:          view.id.0,
            name:              view.name.clone(),
            x:                 view.position.x,
            y:                 view.position.y,
            facing:            view.facing.to_string(),
            frame:             view.frame,
            moving:            view.moving,
            state:             view.state.as_str(),
            selected:          view.selected,
            player_controlled: view.player_controlled,
            in_conversation:   view.in_conversation,
        }
    }
}

/// One presentation event.  Columns an event has no value for are empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub time_ms: u64,
    pub kind:    &'static str,
    pub agent:   Option<u32>,
    pub other:   Option<u32>,
    pub line:    Option<usize>,
    pub text:    String,
}

impl EventRow {
    pub fn from_event(tick: Tick, now: Millis, event: &PresentationEvent) -> Self {
        use PresentationEvent as E;

        let id = |a: &AgentId| Some(a.0);
        let (kind, agent, other, line, text) = match event {
            E::EncounterStarted { first, second } => ("encounter_started", id(first), id(second), None, ""),
            E::Typing { speaker, line }            => ("typing", id(speaker), None, Some(*line), ""),
            E::Message { speaker, line, text }     => ("message", id(speaker), None, Some(*line), text.as_str()),
            E::Retire { speaker, line }            => ("retire", id(speaker), None, Some(*line), ""),
            E::EncounterEnded { first, second }    => ("encounter_ended", id(first), id(second), None, ""),
            E::ConversationRequested { resident }  => ("conversation_requested", id(resident), None, None, ""),
            E::SessionOpened { resident }          => ("session_opened", id(resident), None, None, ""),
            E::PlayerSaid { resident, text }       => ("player_said", id(resident), None, None, text.as_str()),
            E::Reply { resident, text }            => ("reply", id(resident), None, None, text.as_str()),
            E::SessionEnded { resident }           => ("session_ended", id(resident), None, None, ""),
            E::PersonalityReady { agent }          => ("personality_ready", id(agent), None, None, ""),
        };
        Self { tick: tick.0, time_ms: now.0, kind, agent, other, line, text: text.to_owned() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub from:     ActivityState,
    pub to:       ActivityState,
}
