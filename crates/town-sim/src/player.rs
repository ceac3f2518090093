//! The Player Interaction Controller.
//!
//! ```text
//!  start_conversation ──▶ Pending ──(open delay)──▶ AwaitingPlayer ◀──(reveal delay)──┐
//!                                                     │ submit_message               │
//!                                                     ▼                              │
//!                                               WaitingForReply ──reply applied──────┘
//!
//!  end_conversation from any state: lease released, timeline dropped.
//! ```
//!
//! The resident is claimed from the moment the player sets off.  The player
//! keeps walking while the session is `Pending` and is held still once the
//! session opens.  A pending or open session holds the global latch.

use town_agent::{AgentStore, Control};
use town_core::{AgentId, Millis, Point, TicketId, TownConfig};
use town_dialogue::{clean_reply, DialogueRequest, DialogueResult, Speaker};

use crate::town::edit_agent;
use crate::{ConversationLease, InteractionError, PresentationEvent, ReservationBook, SimResult, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Player walking over; the chat opens at `opens_at`.
    Pending { opens_at: Millis },
    AwaitingPlayer,
    WaitingForReply { ticket: TicketId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    Open,
    RevealReply { message: String, reply: String },
}

#[derive(Debug)]
pub struct ChatSession {
    pub resident: AgentId,
    pub state:    SessionState,
    pub started:  Millis,
    /// Completed player/reply exchanges.
    pub exchanges: usize,
    lease:        ConversationLease,
    timeline:     Timeline<SessionAction>,
    /// The player line waiting for its reply.
    outstanding:  Option<String>,
}

impl ChatSession {
    #[inline]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Pending { .. })
    }

    pub fn timeline(&self) -> &Timeline<SessionAction> {
        &self.timeline
    }
}

#[derive(Debug, Default)]
pub struct PlayerController {
    session:  Option<ChatSession>,
    selected: Option<AgentId>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> Option<AgentId> {
        self.selected
    }

    /// A pending or open session blocks unprompted encounters.
    #[inline]
    pub fn holds_latch(&self) -> bool {
        self.session.is_some()
    }

    /// The player stands still while a session is open.
    #[inline]
    pub fn player_suspended(&self) -> bool {
        self.session.as_ref().is_some_and(ChatSession::is_open)
    }

    // ── Input boundary ────────────────────────────────────────────────────

    pub fn select_agent(&mut self, agent: AgentId, store: &AgentStore) -> Result<(), InteractionError> {
        if store.get(agent).is_none() {
            return Err(InteractionError::UnknownAgent(agent));
        }
        self.selected = Some(agent);
        Ok(())
    }

    /// Send the player toward `point`.  A town without a player ignores it.
    pub fn click_map(&mut self, point: Point, store: &mut AgentStore) -> Result<(), InteractionError> {
        let Some(player) = store.player() else {
            tracing::debug!("map click ignored: no player agent");
            return Ok(());
        };
        set_target(store, player, point)
    }

    pub fn start_conversation(
        &mut self,
        resident: AgentId,
        now:      Millis,
        store:    &mut AgentStore,
        book:     &mut ReservationBook,
        config:   &TownConfig,
        events:   &mut Vec<PresentationEvent>,
    ) -> Result<(), InteractionError> {
        let Some(player) = store.player() else {
            tracing::debug!(%resident, "conversation ignored: no player agent");
            return Ok(());
        };
        let target = store.get(resident).ok_or(InteractionError::UnknownAgent(resident))?;
        if resident == player {
            return Err(InteractionError::TargetIsPlayer(resident));
        }
        if self.session.is_some() {
            return Err(InteractionError::SessionActive);
        }
        if !book.is_free(player) {
            return Err(InteractionError::PlayerBusy);
        }
        let approach = target.position.offset(config.approach_offset_x, 0.0);
        let name = target.name.clone();

        let lease = book
            .claim_conversation(resident)
            .map_err(|_| InteractionError::TargetBusy(resident))?;
        set_target(store, player, approach)?;

        let opens_at = now + config.conversation_open_delay_ms;
        let mut timeline = Timeline::new();
        timeline.push(opens_at, SessionAction::Open);
        self.session = Some(ChatSession {
            resident,
            state: SessionState::Pending { opens_at },
            started: now,
            exchanges: 0,
            lease,
            timeline,
            outstanding: None,
        });
        events.push(PresentationEvent::ConversationRequested { resident });
        tracing::info!(resident = %name, "player conversation requested");
        Ok(())
    }

    /// Record the player's line and build the reply request, which the
    /// caller submits under `ticket`.
    pub fn submit_message(
        &mut self,
        text:   &str,
        ticket: TicketId,
        store:  &AgentStore,
        events: &mut Vec<PresentationEvent>,
    ) -> Result<DialogueRequest, InteractionError> {
        let session = self.session.as_mut().ok_or(InteractionError::NoSession)?;
        if session.state != SessionState::AwaitingPlayer {
            return Err(InteractionError::NotPlayerTurn);
        }
        let message = text.trim();
        if message.is_empty() {
            return Err(InteractionError::EmptyMessage);
        }
        let resident = store
            .get(session.resident)
            .ok_or(InteractionError::UnknownAgent(session.resident))?;
        let player = store
            .player()
            .and_then(|id| store.get(id))
            .ok_or(InteractionError::NoSession)?;

        session.state = SessionState::WaitingForReply { ticket };
        session.outstanding = Some(message.to_owned());
        events.push(PresentationEvent::PlayerSaid { resident: session.resident, text: message.to_owned() });
        tracing::debug!(resident = %resident.name, %ticket, "player message sent");

        Ok(DialogueRequest::ChatReply {
            responder: Speaker::new(resident.name.clone(), resident.personality.clone()),
            player:    player.name.clone(),
            message:   message.to_owned(),
        })
    }

    /// Schedule the reply reveal.  Returns `false` when the reply belongs to
    /// a session that no longer exists or no longer waits on `ticket`.
    pub fn apply_reply(
        &mut self,
        ticket:  TicketId,
        result:  DialogueResult<String>,
        now:     Millis,
        request: &DialogueRequest,
        config:  &TownConfig,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.state != (SessionState::WaitingForReply { ticket }) {
            return false;
        }
        let Some(message) = session.outstanding.take() else {
            return false;
        };

        let reply = match result {
            Ok(text) => clean_reply(&text).unwrap_or_else(|| {
                tracing::warn!(%ticket, "empty chat reply, using fallback");
                request.fallback()
            }),
            Err(e) => {
                tracing::warn!(%ticket, error = %e, "chat reply failed, using fallback");
                request.fallback()
            }
        };
        session
            .timeline
            .push(now + config.reply_reveal_delay_ms, SessionAction::RevealReply { message, reply });
        true
    }

    pub fn end_conversation(
        &mut self,
        book:   &mut ReservationBook,
        events: &mut Vec<PresentationEvent>,
    ) -> Result<(), InteractionError> {
        let mut session = self.session.take().ok_or(InteractionError::NoSession)?;
        session.timeline.truncate();
        let resident = session.resident;
        book.release_conversation(session.lease);
        events.push(PresentationEvent::SessionEnded { resident });
        tracing::info!(%resident, exchanges = session.exchanges, "player conversation ended");
        Ok(())
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    pub fn fire(
        &mut self,
        now:    Millis,
        store:  &mut AgentStore,
        events: &mut Vec<PresentationEvent>,
    ) -> SimResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        for (_, action) in session.timeline.due(now) {
            match action {
                SessionAction::Open => {
                    session.state = SessionState::AwaitingPlayer;
                    events.push(PresentationEvent::SessionOpened { resident: session.resident });
                    tracing::info!(resident = %session.resident, "player conversation open");
                }
                SessionAction::RevealReply { message, reply } => {
                    append_exchange(store, session.resident, &message, &reply)?;
                    events.push(PresentationEvent::Reply { resident: session.resident, text: reply });
                    session.exchanges += 1;
                    session.state = SessionState::AwaitingPlayer;
                }
            }
        }
        Ok(())
    }
}

fn set_target(store: &mut AgentStore, player: AgentId, target: Point) -> Result<(), InteractionError> {
    edit_agent(store, player, |agent| {
        agent.control = Control::Player { target: Some(target) };
    })
    .map_err(|_| InteractionError::UnknownAgent(player))
}

/// Player line then reply, on both histories, sender flag per viewer.
fn append_exchange(store: &mut AgentStore, resident: AgentId, message: &str, reply: &str) -> SimResult<()> {
    let Some(player) = store.player() else {
        return Ok(());
    };
    let (Some(player_name), Some(resident_name)) = (
        store.get(player).map(|a| a.name.clone()),
        store.get(resident).map(|a| a.name.clone()),
    ) else {
        return Ok(());
    };

    for viewer in [player, resident] {
        edit_agent(store, viewer, |agent| {
            agent.conversation.push(&player_name, message, viewer == player);
            agent.conversation.push(&resident_name, reply, viewer == resident);
        })?;
    }
    Ok(())
}
