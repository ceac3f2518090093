//! What the town asks the dialogue service for.

use std::fmt;

/// A participant as the prompt sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Speaker {
    pub name:        String,
    pub personality: String,
}

impl Speaker {
    pub fn new(name: impl Into<String>, personality: impl Into<String>) -> Self {
        Self { name: name.into(), personality: personality.into() }
    }
}

/// Sampling parameters sent with every request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub max_tokens:  u32,
    pub temperature: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogueKind {
    Personality,
    Encounter,
    ChatReply,
}

impl DialogueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Encounter   => "encounter",
            Self::ChatReply   => "chat_reply",
        }
    }
}

impl fmt::Display for DialogueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text-generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogueRequest {
    /// Expand a resident's keywords into a personality paragraph.
    Personality { name: String, keywords: String },

    /// A two-line exchange, `first` speaking first.
    Encounter { first: Speaker, second: Speaker },

    /// `responder`'s in-character answer to what the player just said.
    ChatReply {
        responder: Speaker,
        player:    String,
        message:   String,
    },
}

impl DialogueRequest {
    pub const fn kind(&self) -> DialogueKind {
        match self {
            Self::Personality { .. } => DialogueKind::Personality,
            Self::Encounter { .. }   => DialogueKind::Encounter,
            Self::ChatReply { .. }   => DialogueKind::ChatReply,
        }
    }

    pub const fn params(&self) -> GenerationParams {
        match self.kind() {
            DialogueKind::Personality => GenerationParams { max_tokens: 150, temperature: 0.75 },
            DialogueKind::Encounter | DialogueKind::ChatReply => {
                GenerationParams { max_tokens: 100, temperature: 0.8 }
            }
        }
    }

    /// Text used in place of a failed or empty reply.
    pub fn fallback(&self) -> String {
        match self {
            Self::Personality { keywords, .. } => {
                format!("Failed to generate personality. Base traits: {keywords}")
            }
            Self::Encounter { first, second } => format!(
                "{a}: Hello {b}!\n{b}: Hey there, {a}!",
                a = first.name,
                b = second.name,
            ),
            Self::ChatReply { .. } => "I'm not sure how to respond to that right now.".to_owned(),
        }
    }
}
