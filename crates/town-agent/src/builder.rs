//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use town_agent::AgentStoreBuilder;
//! use town_schedule::{Roster, TaskGenerator};
//!
//! let (store, rngs) = AgentStoreBuilder::new(42)
//!     .roster(&Roster::default_town())
//!     .build(&TaskGenerator::default())
//!     .unwrap();
//!
//! assert_eq!(store.len(), 7);
//! assert_eq!(rngs.len(), 7);
//! ```

use std::collections::HashSet;

use town_core::{CoreError, CoreResult};
use town_schedule::{GoalList, ResidentDef, Roster, TaskGenerator, PLAYER_PERSONALITY};

use crate::{Agent, AgentRngs, AgentStore, Control, FrameCounts};

pub struct AgentStoreBuilder {
    seed:   u64,
    frames: FrameCounts,
    defs:   Vec<ResidentDef>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, frames: FrameCounts::default(), defs: Vec::new() }
    }

    /// Sprite frames per facing for every agent.
    pub fn frames(mut self, frames: FrameCounts) -> Self {
        self.frames = frames;
        self
    }

    pub fn resident(mut self, def: ResidentDef) -> Self {
        self.defs.push(def);
        self
    }

    pub fn roster(mut self, roster: &Roster) -> Self {
        self.defs.extend(roster.residents.iter().cloned());
        self
    }

    /// Validate the definitions and construct the store.
    ///
    /// Ids must be dense from 0 in definition order, names unique, and at
    /// most one agent player-controlled.  Residents get an initial goal list
    /// from `generator`, drawn from their own RNG; the player keeps its base
    /// tasks as-is.
    pub fn build(self, generator: &TaskGenerator) -> CoreResult<(AgentStore, AgentRngs)> {
        let mut names = HashSet::new();
        let mut players = 0usize;
        for (i, def) in self.defs.iter().enumerate() {
            if def.id.index() != i {
                return Err(CoreError::Config(format!(
                    "resident {:?} has id {} but is defined at position {i}",
                    def.name, def.id
                )));
            }
            if !names.insert(def.name.as_str()) {
                return Err(CoreError::Config(format!("duplicate resident name {:?}", def.name)));
            }
            if def.player {
                players += 1;
            }
        }
        if players > 1 {
            return Err(CoreError::Config(format!("{players} player-controlled agents; at most one allowed")));
        }

        let mut rngs = AgentRngs::new(self.defs.len(), self.seed);
        let agents = self
            .defs
            .into_iter()
            .zip(rngs.inner.iter_mut())
            .map(|(def, rng)| {
                let goals = if def.player {
                    GoalList::new(def.base_tasks.clone())
                } else {
                    generator.generate(&def.base_tasks, rng)
                };
                let mut agent = Agent::new(def.id, def.name, def.start, goals);
                agent.base_tasks = def.base_tasks.into();
                agent.frames = self.frames;
                if def.player {
                    agent.personality = PLAYER_PERSONALITY.to_string();
                    agent.control = Control::Player { target: None };
                } else {
                    agent.personality = def.keywords.clone();
                }
                agent.keywords = def.keywords;
                agent
            })
            .collect();

        Ok((AgentStore::new(agents), rngs))
    }
}
