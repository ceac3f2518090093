//! CSV base-task loader.
//!
//! # CSV format
//!
//! One row per base task, in the order the resident lists them.  Every row
//! for the same `agent_id` must carry the same `name`.
//!
//! ```csv
//! agent_id,name,task,location
//! 0,Dante,Meditate in the morning,park
//! 0,Dante,Work in his tech office,office
//! 1,Diana,Visit the animal shelter,animal_shelter
//! ```
//!
//! Location keys are not checked here; an unknown key is caught at runtime by
//! the missing-location guard.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use town_core::AgentId;

use crate::{Goal, ScheduleError, ScheduleResult};

#[derive(Deserialize)]
struct TaskRecord {
    agent_id: u32,
    name:     String,
    task:     String,
    location: String,
}

/// Base tasks loaded for one resident.
#[derive(Clone, Debug, PartialEq)]
pub struct ResidentTasks {
    pub name:  String,
    pub tasks: Vec<Goal>,
}

pub fn load_tasks_csv(path: &Path) -> ScheduleResult<BTreeMap<AgentId, ResidentTasks>> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_tasks_reader(file)
}

/// Like [`load_tasks_csv`] but accepts any `Read` source.
pub fn load_tasks_reader<R: Read>(reader: R) -> ScheduleResult<BTreeMap<AgentId, ResidentTasks>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: BTreeMap<AgentId, ResidentTasks> = BTreeMap::new();

    for result in csv_reader.deserialize::<TaskRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let agent = AgentId(row.agent_id);
        let name = row.name.trim().to_string();

        let entry = by_agent.entry(agent).or_insert_with(|| ResidentTasks {
            name:  name.clone(),
            tasks: Vec::new(),
        });
        if entry.name != name {
            return Err(ScheduleError::NameMismatch {
                agent,
                expected: entry.name.clone(),
                found:    name,
            });
        }
        entry.tasks.push(Goal::new(row.task.trim(), row.location.trim()));
    }

    tracing::debug!(residents = by_agent.len(), "loaded base tasks");
    Ok(by_agent)
}
