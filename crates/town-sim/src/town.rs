//! The `Town` struct and its tick loop.

use town_agent::{ActivityState, Agent, AgentRngs, AgentStore};
use town_behavior::{reported_state, BehaviorModel, SimContext, StepOutcome};
use town_core::{AgentId, CoreError, CoreResult, Millis, Point, SimClock, TicketId, Tick, TownConfig};
use town_dialogue::{clean_reply, DialoguePort, DialogueRequest, DialogueResult};
use town_map::{LocationRegistry, ProximityIndex};
use town_mobility::MotionEngine;
use town_schedule::TaskGenerator;

use crate::reservation::Availability;
use crate::{
    AgentView, EncounterCoordinator, InteractionError, Map, PlayerController, PresentationEvent,
    ReservationBook, SimResult, TownObserver,
};

/// What an outstanding ticket was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Purpose {
    Personality(AgentId),
    Encounter,
    Chat,
}

// ── Town ──────────────────────────────────────────────────────────────────────

/// The scheduler: agents, both coordinators, and the dialogue port.
///
/// Create via [`TownBuilder`][crate::TownBuilder].
pub struct Town<B: BehaviorModel> {
    pub config: TownConfig,

    /// Fixed-step clock; `now` for every timer comparison.
    pub clock: SimClock,

    /// Agent records.  Only ever changed by whole-record replacement.
    pub agents: AgentStore,

    /// Per-agent RNGs, split from `agents` for disjoint borrows.
    pub rngs: AgentRngs,

    pub locations: LocationRegistry,
    pub tasks:     TaskGenerator,
    pub motion:    MotionEngine,
    pub behavior:  B,

    reservations: ReservationBook,
    encounters:   EncounterCoordinator,
    player:       PlayerController,

    dialogue:    Box<dyn DialoguePort>,
    outstanding: Map<TicketId, (Purpose, DialogueRequest)>,
    next_ticket: u64,

    /// Raised since the last observer flush.
    events:   Vec<PresentationEvent>,
    /// Reported state per agent as of the end of the previous tick.
    reported: Vec<ActivityState>,
    /// Suspension flags as of the end of the previous tick.
    was_suspended: Vec<bool>,
}

impl<B: BehaviorModel> Town<B> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config:    TownConfig,
        agents:    AgentStore,
        rngs:      AgentRngs,
        locations: LocationRegistry,
        tasks:     TaskGenerator,
        behavior:  B,
        dialogue:  Box<dyn DialoguePort>,
    ) -> Self {
        let reported = agents.iter().map(|a| reported_state(a, false)).collect();
        let was_suspended = vec![false; agents.len()];
        Self {
            clock:        config.make_clock(Millis::ZERO),
            motion:       MotionEngine::new(&config),
            reservations: ReservationBook::new(agents.len()),
            encounters:   EncounterCoordinator::new(),
            player:       PlayerController::new(),
            outstanding:  Map::default(),
            next_ticket:  0,
            events:       Vec::new(),
            config,
            agents,
            rngs,
            locations,
            tasks,
            behavior,
            dialogue,
            reported,
            was_suspended,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn reservations(&self) -> &ReservationBook {
        &self.reservations
    }

    pub fn encounters(&self) -> &EncounterCoordinator {
        &self.encounters
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Dialogue requests whose reply has not been applied yet.
    pub fn dialogue_in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// No encounter is running and no player session is pending or open.
    #[inline]
    pub fn latch_free(&self) -> bool {
        !self.encounters.is_active() && !self.player.holds_latch()
    }

    /// `true` for agents that must not act this tick.
    pub fn suspended_flags(&self) -> Vec<bool> {
        let mut flags = self.reservations.claimed_flags();
        if self.player.player_suspended() {
            if let Some(flag) = self.agents.player().and_then(|p| flags.get_mut(p.index())) {
                *flag = true;
            }
        }
        flags
    }

    pub fn reported_state(&self, agent: AgentId) -> Option<ActivityState> {
        let suspended = self.suspended_flags();
        self.agents
            .get(agent)
            .map(|a| reported_state(a, suspended.get(agent.index()).copied().unwrap_or(false)))
    }

    /// One view per agent for the rendering boundary.
    pub fn views(&self) -> Vec<AgentView> {
        let suspended = self.suspended_flags();
        let selected = self.player.selected();
        self.agents
            .iter()
            .map(|agent| AgentView {
                id:                agent.id,
                name:              agent.name.clone(),
                position:          agent.position,
                facing:            agent.facing,
                frame:             agent.frame,
                moving:            agent.moving,
                state:             reported_state(agent, suspended[agent.id.index()]),
                selected:          selected == Some(agent.id),
                player_controlled: agent.is_player(),
                in_conversation:   matches!(
                    self.reservations.availability(agent.id),
                    Some(Availability::PlayerConversation { .. })
                ),
            })
            .collect()
    }

    // ── Input boundary ────────────────────────────────────────────────────

    pub fn select_agent(&mut self, agent: AgentId) -> Result<(), InteractionError> {
        self.player.select_agent(agent, &self.agents)
    }

    pub fn click_map(&mut self, point: Point) -> Result<(), InteractionError> {
        self.player.click_map(point, &mut self.agents)
    }

    pub fn start_conversation(&mut self, resident: AgentId) -> Result<(), InteractionError> {
        let now = self.clock.now();
        self.player.start_conversation(
            resident,
            now,
            &mut self.agents,
            &mut self.reservations,
            &self.config,
            &mut self.events,
        )
    }

    /// Send the player's line; the reply arrives through the dialogue port.
    pub fn submit_message(&mut self, text: &str) -> Result<TicketId, InteractionError> {
        let ticket = TicketId(self.next_ticket);
        let request = self.player.submit_message(text, ticket, &self.agents, &mut self.events)?;
        self.submit(ticket, request, Purpose::Chat);
        Ok(ticket)
    }

    pub fn end_conversation(&mut self) -> Result<(), InteractionError> {
        self.player.end_conversation(&mut self.reservations, &mut self.events)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: TownObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: TownObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Advance the town by one tick.
    pub fn tick<O: TownObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let tick = self.clock.current_tick;
        let now = self.clock.now();
        observer.on_tick_start(tick, now);

        // ── ① replies, ② timelines ────────────────────────────────────────
        self.settle(now)?;

        // ── ③ snapshot ────────────────────────────────────────────────────
        let snapshot = self.agents.snapshot();
        let suspended = self.suspended_flags();
        let proximity = ProximityIndex::build(snapshot.iter().map(|a| (a.id, a.position)));
        let encounters_open = self.latch_free();

        // ── ④ intent phase ────────────────────────────────────────────────
        let outcomes = {
            let ctx = SimContext {
                tick,
                now,
                config: &self.config,
                agents: &snapshot,
                suspended: &suspended,
                was_suspended: &self.was_suspended,
                proximity: &proximity,
                locations: &self.locations,
                motion: &self.motion,
                tasks: &self.tasks,
                encounters_open,
            };
            compute_outcomes(&self.behavior, &ctx, &snapshot, &mut self.rngs)
        };

        // ── ⑤ apply phase, ascending id ───────────────────────────────────
        for outcome in outcomes {
            let id = outcome.next.id;
            if let Some((from, to)) = outcome.transition {
                tracing::debug!(agent = %outcome.next.name, %from, %to, "state change");
            }
            let proposal = outcome.proposal();
            self.agents.replace(outcome.next)?;

            if let Some(partner) = proposal {
                if self.try_start_encounter(id, partner, now) {
                    if let Some(before) = snapshot.get(id.index()) {
                        let mut held = before.clone();
                        held.halt();
                        self.agents.replace(held)?;
                    }
                }
            }
        }

        // ── ⑥ replies and timelines again ─────────────────────────────────
        self.settle(now)?;

        // ── ⑦ report ──────────────────────────────────────────────────────
        self.report(tick, now, observer);
        observer.on_tick_end(tick);
        self.clock.advance();
        Ok(())
    }

    /// Ask the dialogue service for every resident's personality.
    pub(crate) fn request_personalities(&mut self) {
        let requests: Vec<(AgentId, DialogueRequest)> = self
            .agents
            .iter()
            .filter(|a| !a.is_player())
            .map(|a| {
                (a.id, DialogueRequest::Personality { name: a.name.clone(), keywords: a.keywords.clone() })
            })
            .collect();
        for (agent, request) in requests {
            let ticket = TicketId(self.next_ticket);
            self.submit(ticket, request, Purpose::Personality(agent));
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn submit(&mut self, ticket: TicketId, request: DialogueRequest, purpose: Purpose) {
        self.next_ticket = self.next_ticket.max(ticket.0 + 1);
        self.outstanding.insert(ticket, (purpose, request.clone()));
        self.dialogue.submit(ticket, request);
    }

    fn try_start_encounter(&mut self, proposer: AgentId, partner: AgentId, now: Millis) -> bool {
        let ticket = TicketId(self.next_ticket);
        let latch_free = !self.player.holds_latch();
        let Some(request) = self.encounters.try_start(
            proposer,
            partner,
            now,
            ticket,
            latch_free,
            &mut self.reservations,
            &self.agents,
            &self.config,
        ) else {
            return false;
        };
        self.events.push(PresentationEvent::EncounterStarted { first: proposer, second: partner });
        self.submit(ticket, request, Purpose::Encounter);
        true
    }

    /// Apply every reply that has arrived, then fire whatever is due.
    fn settle(&mut self, now: Millis) -> SimResult<()> {
        self.drain_replies(now)?;
        self.encounters
            .fire(now, &mut self.reservations, &mut self.agents, &mut self.events)?;
        self.player.fire(now, &mut self.agents, &mut self.events)
    }

    fn drain_replies(&mut self, now: Millis) -> SimResult<()> {
        for reply in self.dialogue.poll() {
            let Some((purpose, request)) = self.outstanding.remove(&reply.ticket) else {
                tracing::debug!(ticket = %reply.ticket, "reply for unknown ticket ignored");
                continue;
            };
            match purpose {
                Purpose::Personality(agent) => {
                    self.apply_personality(agent, reply.result, &request)?;
                }
                Purpose::Encounter => {
                    let applied = self.encounters.apply_reply(
                        reply.ticket,
                        reply.result,
                        now,
                        &request,
                        &mut self.reservations,
                        &self.config,
                    );
                    if !applied {
                        tracing::debug!(ticket = %reply.ticket, "late encounter reply ignored");
                    }
                }
                Purpose::Chat => {
                    let applied =
                        self.player.apply_reply(reply.ticket, reply.result, now, &request, &self.config);
                    if !applied {
                        tracing::debug!(ticket = %reply.ticket, "late chat reply ignored");
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_personality(
        &mut self,
        agent:   AgentId,
        result:  DialogueResult<String>,
        request: &DialogueRequest,
    ) -> SimResult<()> {
        let personality = match result {
            Ok(text) => clean_reply(&text).unwrap_or_else(|| request.fallback()),
            Err(e) => {
                tracing::warn!(%agent, error = %e, "personality generation failed, using fallback");
                request.fallback()
            }
        };
        edit_agent(&mut self.agents, agent, |a| a.personality = personality)?;
        self.events.push(PresentationEvent::PersonalityReady { agent });
        Ok(())
    }

    fn report<O: TownObserver>(&mut self, tick: Tick, now: Millis, observer: &mut O) {
        let suspended = self.suspended_flags();
        for agent in self.agents.iter() {
            let i = agent.id.index();
            let state = reported_state(agent, suspended[i]);
            if self.reported[i] != state {
                observer.on_transition(tick, agent.id, self.reported[i], state);
                self.reported[i] = state;
            }
        }
        self.was_suspended = suspended;

        for event in self.events.drain(..) {
            observer.on_event(tick, now, &event);
        }

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && tick.0 % interval == 0 {
            observer.on_snapshot(tick, now, &self.views());
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Replace `id`'s record with an edited copy.
pub(crate) fn edit_agent<F>(store: &mut AgentStore, id: AgentId, f: F) -> CoreResult<()>
where
    F: FnOnce(&mut Agent),
{
    let mut agent = store.get(id).cloned().ok_or(CoreError::AgentNotFound(id))?;
    f(&mut agent);
    store.replace(agent)?;
    Ok(())
}

/// Step every agent against the same snapshot.  Results are in ascending id
/// order with or without the `parallel` feature.
fn compute_outcomes<B: BehaviorModel>(
    behavior: &B,
    ctx:      &SimContext<'_>,
    snapshot: &[Agent],
    rngs:     &mut AgentRngs,
) -> Vec<StepOutcome> {
    #[cfg(not(feature = "parallel"))]
    {
        snapshot
            .iter()
            .zip(rngs.inner.iter_mut())
            .map(|(agent, rng)| behavior.step(agent, ctx, rng))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        snapshot
            .par_iter()
            .zip(rngs.inner.par_iter_mut())
            .map(|(agent, rng)| behavior.step(agent, ctx, rng))
            .collect()
    }
}
