//! The Encounter Coordinator.
//!
//! At most one unprompted encounter exists at a time.  Its life:
//!
//! ```text
//!   try_start ──▶ AwaitingReply ──reply applied (anchor)──▶ Playing ──Release──▶ gone
//!                      │
//!                      └── lease expires first ──▶ abandoned (late reply ignored)
//! ```
//!
//! Once the reply is applied at `anchor`, with `span = typing + display + gap`,
//! line `i` fires `Typing` at `anchor + i·span`, `Message` one typing time
//! later, and `Retire` one display time after that.  `AppendHistory` fires at
//! `anchor + n·span` when both lines exist, and `Release` at
//! `anchor + busy(n)`, the same instant the lease is reset to expire.

use town_agent::AgentStore;
use town_core::{AgentId, Millis, TicketId, TownConfig};
use town_dialogue::{parse_dialogue_lines, DialogueLine, DialogueRequest, DialogueResult, Speaker};

use crate::town::edit_agent;
use crate::{PairLease, PresentationEvent, ReservationBook, SimResult, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterPhase {
    AwaitingReply { ticket: TicketId },
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterAction {
    Typing { line: usize },
    Message { line: usize },
    Retire { line: usize },
    AppendHistory,
    Release,
}

#[derive(Debug)]
pub struct Encounter {
    pub first:   AgentId,
    pub second:  AgentId,
    pub started: Millis,
    /// Mirrors the lease expiry.
    pub until:   Millis,
    pub phase:   EncounterPhase,
    pub lines:   Vec<DialogueLine>,
    lease:       PairLease,
    timeline:    Timeline<EncounterAction>,
}

impl Encounter {
    pub fn timeline(&self) -> &Timeline<EncounterAction> {
        &self.timeline
    }

    pub fn involves(&self, agent: AgentId) -> bool {
        self.first == agent || self.second == agent
    }

    fn speaker(&self, line: usize) -> AgentId {
        if line % 2 == 0 { self.first } else { self.second }
    }
}

#[derive(Debug, Default)]
pub struct EncounterCoordinator {
    active:    Option<Encounter>,
    started:   u64,
    completed: u64,
}

impl EncounterCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Encounter> {
        self.active.as_ref()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Encounters started so far.
    pub fn started_count(&self) -> u64 {
        self.started
    }

    /// Encounters that ran to their release.
    pub fn completed_count(&self) -> u64 {
        self.completed
    }

    /// Arbitrate a proposal from `proposer` to talk to `partner`.
    ///
    /// Accepted only when nothing holds the global latch (`latch_free`, plus
    /// no active encounter), both agents are off cooldown, and both are
    /// free.  On acceptance both are claimed until `now + busy(max)` and the
    /// returned request must be submitted under `ticket`.
    #[allow(clippy::too_many_arguments)]
    pub fn try_start(
        &mut self,
        proposer:   AgentId,
        partner:    AgentId,
        now:        Millis,
        ticket:     TicketId,
        latch_free: bool,
        book:       &mut ReservationBook,
        store:      &AgentStore,
        config:     &TownConfig,
    ) -> Option<DialogueRequest> {
        if !latch_free || self.is_active() {
            tracing::trace!(%proposer, %partner, "encounter rejected: latch held");
            return None;
        }
        let cooldown = config.interaction_cooldown_ms;
        if !book.off_cooldown(proposer, now, cooldown) || !book.off_cooldown(partner, now, cooldown) {
            tracing::trace!(%proposer, %partner, "encounter rejected: cooldown");
            return None;
        }
        let (Some(a), Some(b)) = (store.get(proposer), store.get(partner)) else {
            return None;
        };

        let until = now + config.encounter_busy_ms(config.max_dialogue_lines);
        let lease = match book.claim_pair(proposer, partner, now, until) {
            Ok(lease) => lease,
            Err(e) => {
                tracing::trace!(%proposer, %partner, error = %e, "encounter rejected");
                return None;
            }
        };

        tracing::info!(first = %a.name, second = %b.name, %now, "encounter started");
        self.started += 1;
        self.active = Some(Encounter {
            first:    proposer,
            second:   partner,
            started:  now,
            until,
            phase:    EncounterPhase::AwaitingReply { ticket },
            lines:    Vec::new(),
            lease,
            timeline: Timeline::new(),
        });

        Some(DialogueRequest::Encounter {
            first:  Speaker::new(a.name.clone(), a.personality.clone()),
            second: Speaker::new(b.name.clone(), b.personality.clone()),
        })
    }

    /// Apply the reply for `ticket`, anchoring the timeline at `now`.
    ///
    /// Returns `false` when no encounter is waiting on `ticket`.
    pub fn apply_reply(
        &mut self,
        ticket:  TicketId,
        result:  DialogueResult<String>,
        now:     Millis,
        request: &DialogueRequest,
        book:    &mut ReservationBook,
        config:  &TownConfig,
    ) -> bool {
        let Some(encounter) = self.active.as_mut() else {
            return false;
        };
        if encounter.phase != (EncounterPhase::AwaitingReply { ticket }) {
            return false;
        }
        let DialogueRequest::Encounter { first, second } = request else {
            return false;
        };

        let max = config.max_dialogue_lines;
        let mut lines = match &result {
            Ok(text) => parse_dialogue_lines(text, &first.name, &second.name, max),
            Err(e) => {
                tracing::warn!(first = %first.name, second = %second.name, error = %e, "encounter dialogue failed, using fallback");
                Vec::new()
            }
        };
        if lines.is_empty() {
            if result.is_ok() {
                tracing::warn!(first = %first.name, second = %second.name, "empty encounter dialogue, using fallback");
            }
            lines = parse_dialogue_lines(&request.fallback(), &first.name, &second.name, max);
        }

        let span = config.line_span_ms();
        let n = lines.len();
        for line in 0..n {
            let offset = now + span * line as u64;
            encounter.timeline.push(offset, EncounterAction::Typing { line });
            encounter.timeline.push(offset + config.typing_indicator_ms, EncounterAction::Message { line });
            encounter.timeline.push(
                offset + config.typing_indicator_ms + config.message_display_ms,
                EncounterAction::Retire { line },
            );
        }
        if n >= 2 {
            encounter.timeline.push(now + span * n as u64, EncounterAction::AppendHistory);
        }
        let until = now + config.encounter_busy_ms(n);
        encounter.timeline.push(until, EncounterAction::Release);

        encounter.until = until;
        book.extend(&encounter.lease, until);
        encounter.lines = lines;
        encounter.phase = EncounterPhase::Playing;
        tracing::debug!(lines = n, %until, "encounter dialogue scheduled");
        true
    }

    /// Fire every action due at `now`.  An encounter still waiting for its
    /// reply when the lease runs out is abandoned.
    pub fn fire(
        &mut self,
        now:    Millis,
        book:   &mut ReservationBook,
        store:  &mut AgentStore,
        events: &mut Vec<PresentationEvent>,
    ) -> SimResult<()> {
        let Some(encounter) = self.active.as_mut() else {
            return Ok(());
        };

        if matches!(encounter.phase, EncounterPhase::AwaitingReply { .. }) {
            if now >= encounter.until {
                tracing::warn!(first = %encounter.first, second = %encounter.second, "encounter reply never arrived, releasing");
                self.release(book, events);
            }
            return Ok(());
        }

        for (_, action) in encounter.timeline.due(now) {
            match action {
                EncounterAction::Typing { line } => {
                    events.push(PresentationEvent::Typing { speaker: encounter.speaker(line), line });
                }
                EncounterAction::Message { line } => {
                    let text = encounter.lines.get(line).map(|l| l.text.clone()).unwrap_or_default();
                    events.push(PresentationEvent::Message { speaker: encounter.speaker(line), line, text });
                }
                EncounterAction::Retire { line } => {
                    events.push(PresentationEvent::Retire { speaker: encounter.speaker(line), line });
                }
                EncounterAction::AppendHistory => append_history(encounter, store)?,
                EncounterAction::Release => {
                    self.completed += 1;
                    self.release(book, events);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn release(&mut self, book: &mut ReservationBook, events: &mut Vec<PresentationEvent>) {
        if let Some(encounter) = self.active.take() {
            events.push(PresentationEvent::EncounterEnded {
                first:  encounter.first,
                second: encounter.second,
            });
            tracing::info!(first = %encounter.first, second = %encounter.second, "encounter released");
            book.release_pair(encounter.lease);
        }
    }
}

/// Both participants get both lines, flagged from their own point of view.
fn append_history(encounter: &Encounter, store: &mut AgentStore) -> SimResult<()> {
    let (Some(l0), Some(l1)) = (encounter.lines.first(), encounter.lines.get(1)) else {
        return Ok(());
    };
    for (viewer, first_is_self) in [(encounter.first, true), (encounter.second, false)] {
        edit_agent(store, viewer, |agent| {
            agent.conversation.push(&l0.speaker, &l0.text, first_is_self);
            agent.conversation.push(&l1.speaker, &l1.text, !first_is_self);
        })?;
    }
    Ok(())
}
