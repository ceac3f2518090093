//! Prompt text for each request kind.

use crate::DialogueRequest;

const PERSONALITY_SYSTEM: &str = "You are a creative writer specializing in character \
    backstories for video games. You are brief and impactful.";

const ENCOUNTER_SYSTEM: &str = "You are a dialogue writer for a video game. Keep \
    conversations brief, natural, and character-appropriate. Each character should say one thing.";

const CHAT_SYSTEM: &str = "You are a dialogue writer for a video game. Write natural, \
    character-appropriate responses. Keep responses conversational and engaging.";

/// A rendered system + user prompt pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user:   String,
}

impl Prompt {
    pub fn render(request: &DialogueRequest) -> Self {
        match request {
            DialogueRequest::Personality { name, keywords } => Self {
                system: PERSONALITY_SYSTEM.to_owned(),
                user: format!(
                    "Character Name: {name}. Keywords: {keywords}. Write a single, concise \
                     paragraph describing this character's personality for a video game."
                ),
            },

            DialogueRequest::Encounter { first, second } => Self {
                system: ENCOUNTER_SYSTEM.to_owned(),
                user: format!(
                    "{a} ({pa}) meets {b} ({pb}). Write a brief, natural dialogue exchange \
                     between them. Format it as: \"{a}: [message]\" then \"{b}: [response]\". \
                     Keep each message short and conversational.",
                    a  = first.name,
                    pa = first.personality,
                    b  = second.name,
                    pb = second.personality,
                ),
            },

            DialogueRequest::ChatReply { responder, player, message } => Self {
                system: CHAT_SYSTEM.to_owned(),
                user: format!(
                    "{r} ({pr}) is talking to {player}. {player} just said: \"{message}\". \
                     Write a natural response that {r} would give. Keep it conversational and \
                     in character. Only respond as {r}, don't include the name prefix.",
                    r  = responder.name,
                    pr = responder.personality,
                ),
            },
        }
    }
}
