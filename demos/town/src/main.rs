//! town — runs the default town with a scripted player.
//!
//! Six residents walk between their tasks and stop for short dialogues; the
//! player (Prota) clicks around, walks over to Dante, and chats for two
//! exchanges.  Dialogue comes from the service named by the `DIALOGUE_*`
//! environment variables, or canned fallbacks when none is configured.
//!
//! ```text
//! town [--fast] [OUTPUT_DIR]
//! TOWN_LOCATIONS=locations.csv TOWN_TASKS=tasks.csv town
//! ```
//!
//! `--fast` skips real-time pacing; replies from a live service then land
//! many ticks later than they would on screen.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::time::{interval, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

use town_agent::ActivityState;
use town_behavior::ActivityMachine;
use town_core::{AgentId, Millis, Point, Tick, TownConfig};
use town_dialogue::{AsyncDialoguePort, DialogueConfig};
use town_map::load_locations_csv;
use town_output::{CsvWriter, OutputWriter, TownOutputObserver};
use town_schedule::{load_tasks_csv, Roster};
use town_sim::{AgentView, PresentationEvent, SessionState, Town, TownBuilder, TownObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                    u64 = 42;
const TOTAL_TICKS:             u64 = 60 * 90; // ninety seconds at ~60 fps
const SNAPSHOT_INTERVAL_TICKS: u64 = 30;
const DEFAULT_OUTPUT_DIR:      &str = "output/town";

const PARTNER: &str = "Dante";
const PLAYER_LINES: [&str; 2] = [
    "Morning, Dante! Smells good in here.",
    "Could you save me a loaf for later?",
];

// ── Scripted player ───────────────────────────────────────────────────────────

/// Feeds player input between ticks, the way a UI would.
struct PlayerScript {
    partner: AgentId,
    said:    usize,
    ended:   bool,
}

impl PlayerScript {
    fn new(partner: AgentId) -> Self {
        Self { partner, said: 0, ended: false }
    }

    fn drive(&mut self, town: &mut Town<ActivityMachine>) {
        match town.clock.current_tick.0 {
            60 => log_refusal("click", town.click_map(Point::new(300.0, 420.0))),
            240 => log_refusal("select", town.select_agent(self.partner)),
            300 => log_refusal("start", town.start_conversation(self.partner)),
            _ => {}
        }

        let Some(session) = town.player().session() else {
            return;
        };
        if self.ended || session.state != SessionState::AwaitingPlayer {
            return;
        }
        if let Some(line) = PLAYER_LINES.get(self.said) {
            match town.submit_message(line) {
                Ok(ticket) => {
                    tracing::info!(%ticket, "player message sent");
                    self.said += 1;
                }
                Err(e) => tracing::warn!(error = %e, "message refused"),
            }
        } else if session.exchanges >= PLAYER_LINES.len() {
            log_refusal("end", town.end_conversation());
            self.ended = true;
        }
    }
}

fn log_refusal<E: std::fmt::Display>(action: &str, result: Result<(), E>) {
    if let Err(e) = result {
        tracing::warn!(action, error = %e, "player input refused");
    }
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Echoes dialogue to the log and counts rows on the way to the CSV observer.
struct ConsoleObserver<W: OutputWriter> {
    inner:        TownOutputObserver<W>,
    names:        Vec<String>,
    events:       usize,
    transitions:  usize,
    snapshots:    usize,
}

impl<W: OutputWriter> ConsoleObserver<W> {
    fn new(inner: TownOutputObserver<W>, names: Vec<String>) -> Self {
        Self { inner, names, events: 0, transitions: 0, snapshots: 0 }
    }

    fn name(&self, agent: AgentId) -> &str {
        self.names.get(agent.index()).map(String::as_str).unwrap_or("?")
    }
}

impl<W: OutputWriter> TownObserver for ConsoleObserver<W> {
    fn on_transition(&mut self, tick: Tick, agent: AgentId, from: ActivityState, to: ActivityState) {
        self.transitions += 1;
        self.inner.on_transition(tick, agent, from, to);
    }

    fn on_event(&mut self, tick: Tick, now: Millis, event: &PresentationEvent) {
        self.events += 1;
        match event {
            PresentationEvent::Message { speaker, text, .. } => {
                tracing::info!(speaker = self.name(*speaker), "{text}");
            }
            PresentationEvent::PlayerSaid { text, .. } => {
                tracing::info!(speaker = "player", "{text}");
            }
            PresentationEvent::Reply { resident, text } => {
                tracing::info!(speaker = self.name(*resident), "{text}");
            }
            PresentationEvent::EncounterStarted { first, second } => {
                tracing::info!(first = self.name(*first), second = self.name(*second), "encounter");
            }
            _ => {}
        }
        self.inner.on_event(tick, now, event);
    }

    fn on_snapshot(&mut self, tick: Tick, now: Millis, views: &[AgentView]) {
        self.snapshots += views.len();
        self.inner.on_snapshot(tick, now, views);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_roster() -> Result<Roster> {
    let roster = Roster::default_town();
    match std::env::var_os("TOWN_TASKS") {
        Some(path) => {
            let tasks = load_tasks_csv(Path::new(&path))
                .with_context(|| format!("loading tasks from {}", Path::new(&path).display()))?;
            Ok(roster.with_tasks(tasks)?)
        }
        None => Ok(roster),
    }
}

fn dialogue_port() -> AsyncDialoguePort {
    let config = DialogueConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dialogue config invalid, using offline fallbacks");
        DialogueConfig::offline()
    });
    let port = AsyncDialoguePort::from_config(&config, Handle::current());
    tracing::info!(backend = port.backend_name(), "dialogue service");
    port
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut fast = false;
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    for arg in std::env::args().skip(1) {
        if arg == "--fast" {
            fast = true;
        } else {
            output_dir = PathBuf::from(arg);
        }
    }

    let config = TownConfig {
        total_ticks:             TOTAL_TICKS,
        seed:                    SEED,
        snapshot_interval_ticks: SNAPSHOT_INTERVAL_TICKS,
        ..TownConfig::default()
    };

    let mut builder = TownBuilder::new(config.clone(), ActivityMachine)
        .roster(load_roster()?)
        .dialogue(Box::new(dialogue_port()));
    if let Some(path) = std::env::var_os("TOWN_LOCATIONS") {
        let path = PathBuf::from(path);
        let locations = load_locations_csv(&path)
            .with_context(|| format!("loading locations from {}", path.display()))?;
        builder = builder.locations(locations);
    }
    let mut town = builder.build()?;

    tracing::info!(
        agents = town.agents.len(),
        locations = town.locations.len(),
        ticks = config.total_ticks,
        tick_ms = config.tick_duration_ms,
        "town ready"
    );

    let names = town.agents.iter().map(|a| a.name.clone()).collect();
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = ConsoleObserver::new(TownOutputObserver::new(writer), names);
    let partner = town
        .agents
        .find_by_name(PARTNER)
        .map(|a| a.id)
        .with_context(|| format!("no resident named {PARTNER}"))?;
    let mut script = PlayerScript::new(partner);

    let mut pace = interval(Duration::from_millis(config.tick_duration_ms));
    pace.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let t0 = Instant::now();
    while town.clock.current_tick < config.end_tick() {
        if !fast {
            pace.tick().await;
        }
        script.drive(&mut town);
        town.tick(&mut obs)?;
    }
    obs.on_run_end(town.clock.current_tick);

    if let Some(e) = obs.inner.take_error() {
        tracing::error!(error = %e, "output error");
    }

    tracing::info!(
        elapsed_s = t0.elapsed().as_secs_f64(),
        encounters = town.encounters().completed_count(),
        unanswered = town.dialogue_in_flight(),
        "run complete"
    );
    println!("Output in {}", output_dir.display());
    println!("  agent_snapshots.csv : {} rows", obs.snapshots);
    println!("  events.csv          : {} rows", obs.events);
    println!("  transitions.csv     : {} rows", obs.transitions);
    println!();

    println!("{:<8} {:<20} {:>8} {:>8}", "Agent", "State", "x", "y");
    println!("{}", "-".repeat(48));
    for view in town.views() {
        println!(
            "{:<8} {:<20} {:>8.1} {:>8.1}",
            view.name, view.state.as_str(), view.position.x, view.position.y
        );
    }

    Ok(())
}
