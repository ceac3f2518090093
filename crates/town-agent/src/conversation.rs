//! Per-agent conversation history.
//!
//! The log is append-only.  Both participants of a dialogue receive the same
//! lines; `from_self` is set from each viewer's perspective.  Entries sit
//! behind an `Arc` so snapshot clones are cheap; appending clones the vector
//! only if a snapshot still holds it.

use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversationEntry {
    pub speaker:   String,
    pub message:   String,
    /// `true` when the owner of the log said this line.
    pub from_self: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    entries: Arc<Vec<ConversationEntry>>,
}

impl ConversationLog {
    pub fn push(&mut self, speaker: &str, message: &str, from_self: bool) {
        Arc::make_mut(&mut self.entries).push(ConversationEntry {
            speaker:   speaker.to_string(),
            message:   message.to_string(),
            from_self,
        });
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
