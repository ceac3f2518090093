//! Per-agent random streams.
//!
//! Every draw an agent makes comes from its own `SmallRng`: the encounter
//! trigger, exploration headings and distances, how many exploration tasks
//! to add, and the goal-list shuffle.  Streams are keyed by agent id, so the
//! intent phase can hand each agent its own `&mut AgentRng` with no shared
//! state between them.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Odd multiplier spreading consecutive agent ids across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// The seed of `agent`'s stream in a run seeded with `run_seed`.
#[inline]
pub fn agent_seed(run_seed: u64, agent: AgentId) -> u64 {
    run_seed ^ u64::from(agent.0).wrapping_mul(SEED_SPREAD)
}

pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        Self(SmallRng::seed_from_u64(agent_seed(run_seed, agent)))
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` when a fresh `unit()` draw falls below `probability`.
    ///
    /// A probability of `0.0` never fires and `1.0` always does.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// A heading in radians, uniform over the full circle.
    #[inline]
    pub fn heading(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }

    /// Uniform in `[0, max)`; `0.0` when `max` is not positive.
    #[inline]
    pub fn below(&mut self, max: f32) -> f32 {
        if max > 0.0 { self.0.gen_range(0.0..max) } else { 0.0 }
    }

    /// Uniform integer in `lo..=hi`.  `hi` below `lo` is raised to `lo`.
    #[inline]
    pub fn count_between(&mut self, lo: usize, hi: usize) -> usize {
        self.0.gen_range(lo..=hi.max(lo))
    }

    /// Fisher-Yates shuffle in place.
    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
