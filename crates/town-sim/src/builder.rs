//! Fluent builder for constructing a [`Town`].

use town_agent::{AgentStoreBuilder, FrameCounts};
use town_behavior::BehaviorModel;
use town_core::TownConfig;
use town_dialogue::{DialoguePort, ScriptedDialogue};
use town_map::LocationRegistry;
use town_schedule::{Roster, TaskGenerator};

use crate::{SimError, SimResult, Town};

/// Fluent builder for [`Town<B>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                                  |
/// |-------------------------------|------------------------------------------|
/// | `.roster(r)`                  | `Roster::default_town()`                 |
/// | `.locations(l)`               | `LocationRegistry::default_town()`       |
/// | `.tasks(g)`                   | `TaskGenerator::default()`               |
/// | `.frames(f)`                  | 6 frames per facing                      |
/// | `.dialogue(p)`                | `ScriptedDialogue::failing()` (fallbacks)|
/// | `.generate_personalities(b)`  | `true`                                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut town = TownBuilder::new(config, ActivityMachine)
///     .locations(load_locations_csv(path)?)
///     .dialogue(Box::new(port))
///     .build()?;
/// town.run(&mut NoopObserver)?;
/// ```
pub struct TownBuilder<B: BehaviorModel> {
    config:        TownConfig,
    behavior:      B,
    roster:        Option<Roster>,
    locations:     Option<LocationRegistry>,
    tasks:         Option<TaskGenerator>,
    frames:        FrameCounts,
    dialogue:      Option<Box<dyn DialoguePort>>,
    personalities: bool,
}

impl<B: BehaviorModel> TownBuilder<B> {
    pub fn new(config: TownConfig, behavior: B) -> Self {
        Self {
            config,
            behavior,
            roster:        None,
            locations:     None,
            tasks:         None,
            frames:        FrameCounts::default(),
            dialogue:      None,
            personalities: true,
        }
    }

    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn locations(mut self, locations: LocationRegistry) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn tasks(mut self, tasks: TaskGenerator) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub fn frames(mut self, frames: FrameCounts) -> Self {
        self.frames = frames;
        self
    }

    pub fn dialogue(mut self, port: Box<dyn DialoguePort>) -> Self {
        self.dialogue = Some(port);
        self
    }

    /// Whether to request a generated personality for every resident at
    /// startup.  Residents keep their keywords until a reply arrives.
    pub fn generate_personalities(mut self, enabled: bool) -> Self {
        self.personalities = enabled;
        self
    }

    /// Validate inputs, build the agent store, and return a ready-to-run
    /// [`Town`].
    pub fn build(self) -> SimResult<Town<B>> {
        self.config.validate()?;

        let roster = self.roster.unwrap_or_else(Roster::default_town);
        if roster.is_empty() {
            return Err(SimError::Config("roster has no residents".into()));
        }
        let locations = self.locations.unwrap_or_else(LocationRegistry::default_town);
        let tasks = self.tasks.unwrap_or_default();

        for def in &roster.residents {
            for goal in def.base_tasks.iter().filter(|g| !locations.contains(&g.location)) {
                tracing::warn!(resident = %def.name, location = %goal.location, "base task names an unknown location");
            }
        }

        let (agents, rngs) = AgentStoreBuilder::new(self.config.seed)
            .frames(self.frames)
            .roster(&roster)
            .build(&tasks)?;

        tracing::info!(
            agents = agents.len(),
            locations = locations.len(),
            player = ?agents.player(),
            "town built"
        );

        let dialogue = self.dialogue.unwrap_or_else(|| Box::new(ScriptedDialogue::failing()));
        let mut town = Town::new(self.config, agents, rngs, locations, tasks, self.behavior, dialogue);
        if self.personalities {
            town.request_personalities();
        }
        Ok(town)
    }
}
