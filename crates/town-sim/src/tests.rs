//! Integration tests for town-sim.

use town_agent::{ActivityState, Agent};
use town_behavior::{ActivityMachine, BehaviorModel, Intent, SimContext, StepOutcome};
use town_core::{AgentId, AgentRng, Millis, Point, Tick, TownConfig};
use town_dialogue::ScriptedDialogue;
use town_schedule::{ResidentDef, Roster};

use crate::{AgentView, PresentationEvent, Town, TownBuilder, TownObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 100 ms ticks so every encounter offset lands on a tick boundary.
fn test_config(probability: f64) -> TownConfig {
    TownConfig {
        tick_duration_ms:        100,
        interaction_probability: probability,
        snapshot_interval_ticks: 0,
        ..TownConfig::default()
    }
}

fn pair_roster() -> Roster {
    Roster::new(vec![
        ResidentDef::resident(0, "Dante", (200.0, 200.0), "grumpy baker", &[("Bake bread", "bakery")]),
        ResidentDef::resident(1, "Yasmin", (210.0, 200.0), "curious botanist", &[("Read", "library")]),
    ])
}

fn player_roster() -> Roster {
    Roster::new(vec![
        ResidentDef::resident(0, "Dante", (400.0, 300.0), "grumpy baker", &[("Bake bread", "bakery")]),
        ResidentDef::player(1, "Prota", (150.0, 300.0), &[]),
    ])
}

fn town<B: BehaviorModel>(config: TownConfig, roster: Roster, behavior: B, port: ScriptedDialogue) -> Town<B> {
    TownBuilder::new(config, behavior)
        .roster(roster)
        .dialogue(Box::new(port))
        .generate_personalities(false)
        .build()
        .unwrap()
}

/// Stands still and proposes to its first neighbour whenever it may.
struct Chatty;

impl BehaviorModel for Chatty {
    fn step(&self, agent: &Agent, ctx: &SimContext<'_>, _rng: &mut AgentRng) -> StepOutcome {
        let mut next = agent.clone();
        next.halt();
        let mut out = StepOutcome::unchanged(next);
        if !agent.is_player() && ctx.encounters_open && !ctx.is_suspended(agent.id) {
            if let Some(&partner) = ctx.neighbours(agent).first() {
                out.intents.push(Intent::ProposeEncounter { partner });
            }
        }
        out
    }
}

#[derive(Default)]
struct Recorder {
    events:      Vec<(Millis, PresentationEvent)>,
    transitions: Vec<(Tick, AgentId, ActivityState, ActivityState)>,
    snapshots:   Vec<Vec<AgentView>>,
    ended:       Option<Tick>,
}

impl TownObserver for Recorder {
    fn on_transition(&mut self, tick: Tick, agent: AgentId, from: ActivityState, to: ActivityState) {
        self.transitions.push((tick, agent, from, to));
    }

    fn on_event(&mut self, _tick: Tick, now: Millis, event: &PresentationEvent) {
        self.events.push((now, event.clone()));
    }

    fn on_snapshot(&mut self, _tick: Tick, _now: Millis, views: &[AgentView]) {
        self.snapshots.push(views.to_vec());
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

impl Recorder {
    fn starts(&self) -> Vec<Millis> {
        self.events
            .iter()
            .filter(|(_, e)| matches!(e, PresentationEvent::EncounterStarted { .. }))
            .map(|(t, _)| *t)
            .collect()
    }
}

const A: AgentId = AgentId(0);
const B: AgentId = AgentId(1);

// ── Builder and run ───────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn default_town_builds() {
        let town = TownBuilder::new(TownConfig::default(), ActivityMachine)
            .generate_personalities(false)
            .build()
            .unwrap();
        assert_eq!(town.agents.len(), 7);
        assert_eq!(town.agents.player(), Some(AgentId(6)));
        assert!(town.latch_free());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = TownConfig { tick_duration_ms: 0, ..TownConfig::default() };
        let result = TownBuilder::new(config, ActivityMachine).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn empty_roster_rejected() {
        let result = TownBuilder::new(TownConfig::default(), ActivityMachine)
            .roster(Roster::default())
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn two_players_rejected() {
        let roster = Roster::new(vec![
            ResidentDef::player(0, "P1", (100.0, 100.0), &[]),
            ResidentDef::player(1, "P2", (200.0, 100.0), &[]),
        ]);
        assert!(TownBuilder::new(TownConfig::default(), ActivityMachine).roster(roster).build().is_err());
    }

    #[test]
    fn run_stops_at_end_tick() {
        let config = TownConfig { total_ticks: 25, snapshot_interval_ticks: 10, ..test_config(0.0) };
        let mut town = town(config, pair_roster(), ActivityMachine, ScriptedDialogue::failing());
        let mut rec = Recorder::default();
        town.run(&mut rec).unwrap();
        assert_eq!(town.clock.current_tick, Tick(25));
        assert_eq!(rec.ended, Some(Tick(25)));
        // Ticks 0, 10, 20.
        assert_eq!(rec.snapshots.len(), 3);
        assert_eq!(rec.snapshots[0].len(), 2);
    }
}

// ── Personalities ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod personality_tests {
    use super::*;

    #[test]
    fn generated_personality_replaces_keywords() {
        let mut town = TownBuilder::new(test_config(0.0), ActivityMachine)
            .roster(player_roster())
            .dialogue(Box::new(ScriptedDialogue::replies(["  A gruff baker with a soft heart. "])))
            .build()
            .unwrap();
        assert_eq!(town.agents.get(A).unwrap().personality, "grumpy baker");
        assert_eq!(town.dialogue_in_flight(), 1);

        let mut rec = Recorder::default();
        town.tick(&mut rec).unwrap();
        assert_eq!(town.agents.get(A).unwrap().personality, "A gruff baker with a soft heart.");
        assert!(town.agents.get(B).unwrap().personality.starts_with("You are the protagonist"));
        assert!(rec.events.iter().any(|(_, e)| *e == PresentationEvent::PersonalityReady { agent: A }));
    }

    #[test]
    fn failed_personality_uses_fallback() {
        let mut town = TownBuilder::new(test_config(0.0), ActivityMachine)
            .roster(pair_roster())
            .build()
            .unwrap();
        town.tick(&mut Recorder::default()).unwrap();
        assert_eq!(
            town.agents.get(B).unwrap().personality,
            "Failed to generate personality. Base traits: curious botanist"
        );
        assert_eq!(town.dialogue_in_flight(), 0);
    }
}

// ── Encounters ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod encounter_tests {
    use super::*;
    use crate::{Availability, EncounterPhase};

    #[test]
    fn two_agent_encounter_scenario() {
        let port = ScriptedDialogue::replies(["Dante: Morning.\nYasmin: \"Lovely day!\""]);
        let mut town = town(test_config(1.0), pair_roster(), ActivityMachine, port);
        let mut rec = Recorder::default();
        let busy = town.config.encounter_busy_ms(2);
        assert_eq!(busy, 13_000);

        town.tick(&mut rec).unwrap();
        assert_eq!(town.reported_state(A), Some(ActivityState::Idle));
        assert_eq!(town.reported_state(B), Some(ActivityState::Idle));
        assert!(!town.latch_free());
        let encounter = town.encounters().active().unwrap();
        assert_eq!((encounter.first, encounter.second), (A, B));
        assert_eq!(encounter.phase, EncounterPhase::Playing);
        assert_eq!(encounter.until, Millis(busy));

        // Still reserved on the last tick before the window closes.
        while town.now() < Millis(busy) {
            assert!(!town.reservations().is_free(A));
            assert!(!town.reservations().is_free(B));
            town.tick(&mut rec).unwrap();
        }
        assert_eq!(town.now(), Millis(busy));
        town.tick(&mut rec).unwrap();

        // Released together, histories +2 each.
        assert!(town.reservations().is_free(A) && town.reservations().is_free(B));
        assert!(town.encounters().active().is_none());
        assert_eq!(town.encounters().completed_count(), 1);

        let dante = town.agents.get(A).unwrap().conversation.entries().to_vec();
        let yasmin = town.agents.get(B).unwrap().conversation.entries().to_vec();
        assert_eq!(dante.len(), 2);
        assert_eq!(yasmin.len(), 2);
        assert_eq!((dante[0].speaker.as_str(), dante[0].message.as_str(), dante[0].from_self), ("Dante", "Morning.", true));
        assert_eq!((dante[1].speaker.as_str(), dante[1].message.as_str(), dante[1].from_self), ("Yasmin", "Lovely day!", false));
        assert!(!yasmin[0].from_self && yasmin[1].from_self);

        let ended = rec
            .events
            .iter()
            .find(|(_, e)| matches!(e, PresentationEvent::EncounterEnded { .. }))
            .map(|(t, _)| *t);
        assert_eq!(ended, Some(Millis(busy)));
    }

    #[test]
    fn choreography_offsets() {
        let mut town = town(test_config(1.0), pair_roster(), Chatty, ScriptedDialogue::replies(["Dante: a\nYasmin: b"]));
        let mut rec = Recorder::default();
        town.run_ticks(140, &mut rec).unwrap();

        let cues: Vec<(u64, PresentationEvent)> = rec
            .events
            .iter()
            .filter(|(_, e)| {
                matches!(e, PresentationEvent::Typing { .. } | PresentationEvent::Message { .. } | PresentationEvent::Retire { .. })
            })
            .map(|(t, e)| (t.0, e.clone()))
            .collect();
        assert_eq!(
            cues,
            vec![
                (0, PresentationEvent::Typing { speaker: A, line: 0 }),
                (1_500, PresentationEvent::Message { speaker: A, line: 0, text: "a".into() }),
                (5_500, PresentationEvent::Retire { speaker: A, line: 0 }),
                (6_000, PresentationEvent::Typing { speaker: B, line: 1 }),
                (7_500, PresentationEvent::Message { speaker: B, line: 1, text: "b".into() }),
                (11_500, PresentationEvent::Retire { speaker: B, line: 1 }),
            ]
        );
    }

    #[test]
    fn failure_uses_fallback_dialogue() {
        let mut town = town(test_config(1.0), pair_roster(), Chatty, ScriptedDialogue::failing());
        town.run_ticks(131, &mut Recorder::default()).unwrap();

        let entries = town.agents.get(A).unwrap().conversation.entries().to_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Hello Yasmin!");
        assert_eq!(entries[1].message, "Hey there, Dante!");
    }

    #[test]
    fn empty_reply_uses_fallback_dialogue() {
        let mut town = town(test_config(1.0), pair_roster(), Chatty, ScriptedDialogue::replies(["  \n "]));
        town.run_ticks(131, &mut Recorder::default()).unwrap();
        assert_eq!(town.agents.get(B).unwrap().conversation.entries()[1].message, "Hey there, Dante!");
    }

    #[test]
    fn single_line_reply_shortens_window_and_skips_history() {
        let mut town = town(test_config(1.0), pair_roster(), Chatty, ScriptedDialogue::replies(["Dante: Hm."]));
        let mut rec = Recorder::default();
        town.tick(&mut rec).unwrap();
        assert_eq!(town.encounters().active().unwrap().until, Millis(7_000));

        town.run_ticks(70, &mut rec).unwrap();
        assert!(town.encounters().active().is_none());
        assert!(town.agents.get(A).unwrap().conversation.is_empty());
    }

    #[test]
    fn late_reply_reanchors_window() {
        let port = ScriptedDialogue::replies(["Dante: a\nYasmin: b"]).with_latency(5);
        let mut town = town(test_config(1.0), pair_roster(), Chatty, port);
        let mut rec = Recorder::default();

        town.tick(&mut rec).unwrap();
        assert!(matches!(town.encounters().active().unwrap().phase, EncounterPhase::AwaitingReply { .. }));
        town.run_ticks(3, &mut rec).unwrap();

        // Applied during tick 3 (now = 300).
        let encounter = town.encounters().active().unwrap();
        assert_eq!(encounter.phase, EncounterPhase::Playing);
        assert_eq!(encounter.until, Millis(300 + 13_000));
        assert!(matches!(
            town.reservations().availability(A),
            Some(Availability::Encounter { until: Millis(13_300), .. })
        ));
    }

    #[test]
    fn missing_reply_abandons_encounter() {
        let port = ScriptedDialogue::replies(["never seen"]).with_latency(10_000);
        let mut town = town(test_config(1.0), pair_roster(), Chatty, port);
        let mut rec = Recorder::default();
        town.run_ticks(131, &mut rec).unwrap();

        assert!(town.reservations().is_free(A));
        assert_eq!(town.encounters().completed_count(), 0);
        assert!(town.agents.get(A).unwrap().conversation.is_empty());
    }

    #[test]
    fn cooldown_spaces_encounters() {
        let mut town = town(test_config(1.0), pair_roster(), Chatty, ScriptedDialogue::failing());
        let mut rec = Recorder::default();
        town.run_ticks(600, &mut rec).unwrap();

        let starts = rec.starts();
        assert_eq!(starts[0], Millis(0));
        // First tick strictly more than 25 000 ms after the last start.
        assert_eq!(starts[1], Millis(25_100));
        for pair in starts.windows(2) {
            assert!(pair[1].since(pair[0]) > 25_000);
        }
    }

    #[test]
    fn no_overlapping_encounters() {
        let roster = Roster::new(vec![
            ResidentDef::resident(0, "A", (200.0, 200.0), "", &[]),
            ResidentDef::resident(1, "B", (210.0, 200.0), "", &[]),
            ResidentDef::resident(2, "C", (220.0, 200.0), "", &[]),
            ResidentDef::resident(3, "D", (230.0, 200.0), "", &[]),
        ]);
        let mut town = town(test_config(1.0), roster, Chatty, ScriptedDialogue::failing());
        let mut rec = Recorder::default();
        for _ in 0..400 {
            town.tick(&mut rec).unwrap();
            let claimed = town.reservations().claimed_flags().into_iter().filter(|c| *c).count();
            assert!(claimed == 0 || claimed == 2, "{claimed} agents claimed at once");
        }
        // C and D always pick A first, so the A/B pair repeats after each cooldown.
        assert_eq!(town.encounters().started_count(), 2);
    }

    #[test]
    fn proposer_holds_position_on_acceptance() {
        let mut town = town(test_config(1.0), pair_roster(), ActivityMachine, ScriptedDialogue::failing());
        let before = town.agents.get(A).unwrap().position;
        town.tick(&mut Recorder::default()).unwrap();
        let dante = town.agents.get(A).unwrap();
        assert_eq!(dante.position, before);
        assert!(!dante.moving);
    }

    #[test]
    fn player_can_be_encounter_partner() {
        let roster = Roster::new(vec![
            ResidentDef::resident(0, "Dante", (200.0, 200.0), "", &[]),
            ResidentDef::player(1, "Prota", (220.0, 200.0), &[]),
        ]);
        let mut town = town(test_config(1.0), roster, Chatty, ScriptedDialogue::failing());
        town.tick(&mut Recorder::default()).unwrap();
        assert!(!town.reservations().is_free(B));
        assert_eq!(town.reported_state(B), Some(ActivityState::Idle));
        assert_eq!(
            town.start_conversation(A),
            Err(crate::InteractionError::PlayerBusy)
        );
    }

    #[test]
    fn transitions_report_idle() {
        let mut town = town(test_config(1.0), pair_roster(), ActivityMachine, ScriptedDialogue::failing());
        let mut rec = Recorder::default();
        town.tick(&mut rec).unwrap();
        assert!(rec.transitions.contains(&(Tick(0), A, ActivityState::Moving, ActivityState::Idle)));
        assert!(rec.transitions.contains(&(Tick(0), B, ActivityState::Moving, ActivityState::Idle)));
    }
}

// ── Player interaction ────────────────────────────────────────────────────────

#[cfg(test)]
mod player_tests {
    use super::*;
    use crate::{InteractionError, SessionState};

    fn player_town(port: ScriptedDialogue) -> Town<ActivityMachine> {
        town(test_config(0.0), player_roster(), ActivityMachine, port)
    }

    #[test]
    fn full_chat_flow() {
        let mut town = player_town(ScriptedDialogue::replies(["  Fresh loaves at noon. "]));
        let mut rec = Recorder::default();

        town.start_conversation(A).unwrap();
        assert!(!town.latch_free());
        assert_eq!(town.agents.get(B).unwrap().player_target(), Some(Point::new(450.0, 300.0)));
        assert_eq!(town.submit_message("hi"), Err(InteractionError::NotPlayerTurn));

        // Player walks during the approach; the resident is held.
        town.tick(&mut rec).unwrap();
        assert_eq!(town.reported_state(A), Some(ActivityState::Idle));
        assert_eq!(town.reported_state(B), Some(ActivityState::Moving));

        town.run_ticks(20, &mut rec).unwrap();
        let session = town.player().session().unwrap();
        assert_eq!(session.state, SessionState::AwaitingPlayer);
        assert_eq!(town.reported_state(B), Some(ActivityState::Idle));

        assert_eq!(town.submit_message("   "), Err(InteractionError::EmptyMessage));
        town.submit_message(" Any bread today? ").unwrap();
        assert_eq!(town.submit_message("again"), Err(InteractionError::NotPlayerTurn));

        // Reply arrives at 2100 and is shown 1500 ms later.
        town.tick(&mut rec).unwrap();
        town.run_ticks(14, &mut rec).unwrap();
        assert!(town.agents.get(A).unwrap().conversation.is_empty());
        town.tick(&mut rec).unwrap();
        let shown = rec
            .events
            .iter()
            .find(|(_, e)| matches!(e, PresentationEvent::Reply { .. }))
            .map(|(t, _)| *t);
        assert_eq!(shown, Some(Millis(3_600)));

        let player = town.agents.get(B).unwrap().conversation.entries().to_vec();
        let resident = town.agents.get(A).unwrap().conversation.entries().to_vec();
        assert_eq!(player.len(), 2);
        assert_eq!((player[0].speaker.as_str(), player[0].message.as_str(), player[0].from_self), ("Prota", "Any bread today?", true));
        assert_eq!((player[1].speaker.as_str(), player[1].message.as_str(), player[1].from_self), ("Dante", "Fresh loaves at noon.", false));
        assert!(!resident[0].from_self && resident[1].from_self);
        assert_eq!(town.player().session().unwrap().state, SessionState::AwaitingPlayer);
        assert!(rec.events.iter().any(|(_, e)| matches!(e, PresentationEvent::Reply { text, .. } if text == "Fresh loaves at noon.")));

        town.end_conversation().unwrap();
        assert!(town.latch_free());
        assert!(town.reservations().is_free(A));
        assert_eq!(town.end_conversation(), Err(InteractionError::NoSession));
    }

    #[test]
    fn failed_reply_uses_fallback() {
        let mut town = player_town(ScriptedDialogue::failing());
        town.start_conversation(A).unwrap();
        town.run_ticks(21, &mut NoopRecorder).unwrap();
        town.submit_message("hello").unwrap();
        town.run_ticks(17, &mut NoopRecorder).unwrap();
        let last = town.agents.get(B).unwrap().conversation.last().cloned().unwrap();
        assert_eq!(last.message, "I'm not sure how to respond to that right now.");
    }

    #[test]
    fn late_reply_after_end_is_ignored() {
        let mut town = player_town(ScriptedDialogue::replies(["too late"]).with_latency(4));
        town.start_conversation(A).unwrap();
        town.run_ticks(21, &mut NoopRecorder).unwrap();
        town.submit_message("hello").unwrap();
        town.end_conversation().unwrap();
        town.run_ticks(30, &mut NoopRecorder).unwrap();

        assert!(town.agents.get(B).unwrap().conversation.is_empty());
        assert_eq!(town.dialogue_in_flight(), 0);
    }

    #[test]
    fn input_misuse_is_rejected() {
        let mut town = player_town(ScriptedDialogue::failing());
        assert_eq!(town.start_conversation(AgentId(9)), Err(InteractionError::UnknownAgent(AgentId(9))));
        assert_eq!(town.start_conversation(B), Err(InteractionError::TargetIsPlayer(B)));
        assert_eq!(town.submit_message("hi"), Err(InteractionError::NoSession));
        town.start_conversation(A).unwrap();
        assert_eq!(town.start_conversation(A), Err(InteractionError::SessionActive));
    }

    #[test]
    fn busy_resident_cannot_be_engaged() {
        let roster = Roster::new(vec![
            ResidentDef::resident(0, "Dante", (200.0, 200.0), "", &[]),
            ResidentDef::resident(1, "Yasmin", (210.0, 200.0), "", &[]),
            ResidentDef::player(2, "Prota", (600.0, 400.0), &[]),
        ]);
        let mut town = town(test_config(1.0), roster, Chatty, ScriptedDialogue::failing());
        town.tick(&mut NoopRecorder).unwrap();
        assert_eq!(town.start_conversation(A), Err(InteractionError::TargetBusy(A)));
    }

    #[test]
    fn session_blocks_encounters() {
        let roster = Roster::new(vec![
            ResidentDef::resident(0, "Dante", (200.0, 200.0), "", &[]),
            ResidentDef::resident(1, "Yasmin", (210.0, 200.0), "", &[]),
            ResidentDef::resident(2, "Lin", (500.0, 200.0), "", &[]),
            ResidentDef::player(3, "Prota", (600.0, 400.0), &[]),
        ]);
        let mut town = town(test_config(1.0), roster, Chatty, ScriptedDialogue::failing());
        town.start_conversation(AgentId(2)).unwrap();
        town.run_ticks(50, &mut NoopRecorder).unwrap();
        assert_eq!(town.encounters().started_count(), 0);

        town.end_conversation().unwrap();
        town.tick(&mut NoopRecorder).unwrap();
        assert_eq!(town.encounters().started_count(), 1);
    }

    #[test]
    fn click_map_and_selection() {
        let mut town = player_town(ScriptedDialogue::failing());
        town.click_map(Point::new(160.0, 300.0)).unwrap();
        town.select_agent(A).unwrap();
        assert_eq!(town.select_agent(AgentId(5)), Err(InteractionError::UnknownAgent(AgentId(5))));

        town.run_ticks(30, &mut NoopRecorder).unwrap();
        let player = town.agents.get(B).unwrap();
        assert!(player.position.distance(Point::new(160.0, 300.0)) < 8.0);
        assert_eq!(player.player_target(), None);

        let views = town.views();
        assert!(views[0].selected && !views[1].selected);
        assert!(views[1].player_controlled);
        assert_eq!(views[1].state, ActivityState::Idle);
    }

    #[test]
    fn views_flag_forced_conversation() {
        let mut town = player_town(ScriptedDialogue::failing());
        town.start_conversation(A).unwrap();
        let views = town.views();
        assert!(views[0].in_conversation);
        assert_eq!(views[0].state, ActivityState::Idle);
        assert!(!views[1].in_conversation);
    }

    #[test]
    fn missing_player_is_a_no_op() {
        let mut town = town(test_config(0.0), pair_roster(), ActivityMachine, ScriptedDialogue::failing());
        assert_eq!(town.click_map(Point::new(10.0, 10.0)), Ok(()));
        assert_eq!(town.start_conversation(A), Ok(()));
        assert!(town.player().session().is_none());
        assert!(town.latch_free());
    }

    struct NoopRecorder;
    impl TownObserver for NoopRecorder {}
}

// ── Reservation book ──────────────────────────────────────────────────────────

#[cfg(test)]
mod reservation_tests {
    use super::*;
    use crate::{Availability, ReservationBook, ReservationError};

    #[test]
    fn pair_claim_is_exclusive() {
        let mut book = ReservationBook::new(3);
        let lease = book.claim_pair(A, B, Millis(0), Millis(13_000)).unwrap();
        assert_eq!(book.claim_pair(B, AgentId(2), Millis(0), Millis(1)).unwrap_err(), ReservationError::Claimed(B));
        assert_eq!(book.claim_conversation(A).unwrap_err(), ReservationError::Claimed(A));
        assert!(book.is_free(AgentId(2)));

        book.release_pair(lease);
        assert!(book.is_free(A) && book.is_free(B));
    }

    #[test]
    fn same_and_unknown_agents_rejected() {
        let mut book = ReservationBook::new(2);
        assert_eq!(book.claim_pair(A, A, Millis(0), Millis(1)).unwrap_err(), ReservationError::SameAgent(A));
        assert_eq!(
            book.claim_pair(A, AgentId(7), Millis(0), Millis(1)).unwrap_err(),
            ReservationError::UnknownAgent(AgentId(7))
        );
        assert!(book.is_free(A));
    }

    #[test]
    fn cooldown_is_strict() {
        let mut book = ReservationBook::new(2);
        assert!(book.off_cooldown(A, Millis(0), 25_000));
        let lease = book.claim_pair(A, B, Millis(1_000), Millis(14_000)).unwrap();
        book.release_pair(lease);
        assert!(!book.off_cooldown(A, Millis(26_000), 25_000));
        assert!(book.off_cooldown(A, Millis(26_001), 25_000));
        assert_eq!(book.last_encounter(B), Some(Millis(1_000)));
    }

    #[test]
    fn extend_moves_expiry() {
        let mut book = ReservationBook::new(2);
        let lease = book.claim_pair(A, B, Millis(0), Millis(13_000)).unwrap();
        book.extend(&lease, Millis(20_000));
        assert!(matches!(book.availability(B), Some(Availability::Encounter { until: Millis(20_000), .. })));
    }

    #[test]
    fn conversation_lease_round_trip() {
        let mut book = ReservationBook::new(2);
        let lease = book.claim_conversation(B).unwrap();
        assert_eq!(lease.agent(), B);
        assert_eq!(book.claimed_flags(), vec![false, true]);
        book.release_conversation(lease);
        assert_eq!(book.claimed_flags(), vec![false, false]);
    }
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline_tests {
    use super::*;
    use crate::Timeline;

    #[test]
    fn due_in_time_then_insertion_order() {
        let mut t = Timeline::new();
        t.push(Millis(500), "c");
        t.push(Millis(100), "a");
        t.push(Millis(500), "d");
        t.push(Millis(100), "b");

        assert_eq!(t.next_due(), Some(Millis(100)));
        let due: Vec<&str> = t.due(Millis(100)).into_iter().map(|(_, a)| a).collect();
        assert_eq!(due, ["a", "b"]);
        assert!(t.due(Millis(499)).is_empty());
        let due: Vec<&str> = t.due(Millis(1_000)).into_iter().map(|(_, a)| a).collect();
        assert_eq!(due, ["c", "d"]);
        assert!(t.is_empty());
    }

    #[test]
    fn truncate_drops_pending() {
        let mut t = Timeline::new();
        t.push(Millis(10), 1);
        t.push(Millis(20), 2);
        t.truncate();
        assert!(t.due(Millis(100)).is_empty());
    }
}
