//! Task generation.
//!
//! A resident's goal list is its fixed base tasks plus a few exploration
//! tasks sampled from a shared pool, shuffled together.  The same routine
//! runs at creation and every time the list is exhausted.

use town_core::AgentRng;

use crate::{Goal, GoalList};

/// Samples exploration tasks and assembles shuffled goal lists.
#[derive(Clone, Debug)]
pub struct TaskGenerator {
    /// Location keys exploration tasks are drawn from.
    pub exploration_pool: Vec<String>,
    /// Inclusive range of exploration tasks added per list.
    pub min_exploration:  usize,
    pub max_exploration:  usize,
}

impl Default for TaskGenerator {
    fn default() -> Self {
        Self {
            exploration_pool: ["forest", "hills", "windmill", "beach", "dock", "museum", "theater"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_exploration: 2,
            max_exploration: 3,
        }
    }
}

impl TaskGenerator {
    /// Draw `min..=max` distinct exploration tasks (capped by the pool size).
    pub fn exploration_tasks(&self, rng: &mut AgentRng) -> Vec<Goal> {
        let mut pool: Vec<&String> = self.exploration_pool.iter().collect();
        rng.shuffle(&mut pool);

        let count = rng
            .count_between(self.min_exploration, self.max_exploration)
            .min(pool.len());

        pool.into_iter()
            .take(count)
            .map(|loc| Goal::new(format!("Explore {}", loc.replace('_', " ")), loc.as_str()))
            .collect()
    }

    /// Base tasks plus fresh exploration tasks, shuffled, all incomplete,
    /// cursor at 0.
    pub fn generate(&self, base: &[Goal], rng: &mut AgentRng) -> GoalList {
        let mut goals: Vec<Goal> = base
            .iter()
            .map(|g| Goal { completed: false, ..g.clone() })
            .collect();
        goals.extend(self.exploration_tasks(rng));
        rng.shuffle(&mut goals);
        GoalList::new(goals)
    }
}
