//! Resident definitions.
//!
//! A `ResidentDef` is everything known about a resident before the town
//! starts: name, starting point, personality keywords, and base tasks.
//! `Roster::default_town` reproduces the reference town: six residents and
//! the player-controlled protagonist.

use std::collections::BTreeMap;

use town_core::{AgentId, Point};

use crate::{Goal, ResidentTasks, ScheduleError, ScheduleResult};

/// Fixed personality of the player-controlled agent; never generated.
pub const PLAYER_PERSONALITY: &str =
    "You are the protagonist of this story. Your actions shape the world around you.";

#[derive(Clone, Debug)]
pub struct ResidentDef {
    pub id:         AgentId,
    pub name:       String,
    pub start:      Point,
    /// Seed text for personality generation.
    pub keywords:   String,
    pub base_tasks: Vec<Goal>,
    pub player:     bool,
}

impl ResidentDef {
    pub fn resident(
        id: u32,
        name: &str,
        start: (f32, f32),
        keywords: &str,
        tasks: &[(&str, &str)],
    ) -> Self {
        Self {
            id:         AgentId(id),
            name:       name.to_string(),
            start:      Point::new(start.0, start.1),
            keywords:   keywords.to_string(),
            base_tasks: tasks.iter().map(|&(t, l)| Goal::new(t, l)).collect(),
            player:     false,
        }
    }

    pub fn player(id: u32, name: &str, start: (f32, f32), tasks: &[(&str, &str)]) -> Self {
        Self {
            player: true,
            ..Self::resident(id, name, start, "", tasks)
        }
    }
}

/// The ordered set of resident definitions.  Ids are dense from 0.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    pub residents: Vec<ResidentDef>,
}

impl Roster {
    pub fn new(residents: Vec<ResidentDef>) -> Self {
        Self { residents }
    }

    pub fn default_town() -> Self {
        Self::new(vec![
            ResidentDef::resident(0, "Dante", (50.0, 100.0),
                "Ambitious, analytical, reserved. Likes to have control.", &[
                ("Meditate in the morning", "park"),
                ("Work in his tech office", "office"),
                ("Debate ideas with Marco", "office"),
                ("Buy coffee before going home", "cafe"),
                ("Visit the town hall", "town_hall"),
            ]),
            ResidentDef::resident(1, "Diana", (150.0, 150.0),
                "Kind, creative, empathetic. Always willing to help.", &[
                ("Pick flowers for her garden", "park"),
                ("Visit the animal shelter", "animal_shelter"),
                ("Chat with Yasmin about books", "library"),
                ("Paint in the plaza", "plaza"),
                ("Go to the hospital for a checkup", "hospital"),
            ]),
            ResidentDef::resident(2, "Elena", (250.0, 200.0),
                "Curious, impulsive, dreamer.", &[
                ("Write at the library", "library"),
                ("Go to Max's bakery for inspiration", "bakery"),
                ("Hide clues around the city", "plaza"),
                ("Read her story by the fountain", "fountain"),
                ("Attend a play at the theater", "theater"),
            ]),
            ResidentDef::resident(3, "Marco", (350.0, 250.0),
                "Extroverted, competitive, jokester.", &[
                ("Train at the plaza", "plaza"),
                ("Visit Dante to share theories", "office"),
                ("Check the city's electrical system", "power_plant"),
                ("Relax at the bar", "bar"),
                ("Exercise at the gym", "gym"),
            ]),
            ResidentDef::resident(4, "Max", (450.0, 300.0),
                "Patient, meticulous, traditional.", &[
                ("Bake from dawn", "bakery"),
                ("Serve the residents", "bakery"),
                ("Chat with Elena", "bakery"),
                ("Read old recipes at the library", "library"),
                ("Buy ingredients at the market", "market"),
            ]),
            ResidentDef::resident(5, "Yasmin", (550.0, 350.0),
                "Intellectual, organized, visionary.", &[
                ("Organize the town library", "library"),
                ("Talk with Diana", "library"),
                ("Write philosophical reflections", "cafe"),
                ("Promote reading with neighbors", "plaza"),
                ("Give a talk at the school", "school"),
            ]),
            ResidentDef::player(6, "Prota", (100.0, 300.0), &[("Explore the world", "plaza")]),
        ])
    }

    pub fn get(&self, id: AgentId) -> Option<&ResidentDef> {
        self.residents.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    /// Replace base tasks with those loaded from CSV.  Residents absent from
    /// `tasks` keep their current base tasks.
    pub fn with_tasks(mut self, tasks: BTreeMap<AgentId, ResidentTasks>) -> ScheduleResult<Self> {
        for (id, loaded) in tasks {
            let def = self
                .residents
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(ScheduleError::UnknownAgent(id))?;
            if def.name != loaded.name {
                return Err(ScheduleError::NameMismatch {
                    agent:    id,
                    expected: def.name.clone(),
                    found:    loaded.name,
                });
            }
            def.base_tasks = loaded.tasks;
        }
        Ok(self)
    }
}
