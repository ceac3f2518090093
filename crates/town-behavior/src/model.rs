//! The `BehaviorModel` trait — the extension point town-sim drives.

use town_agent::{ActivityState, Agent};
use town_core::AgentRng;

use crate::{SimContext, StepOutcome};

/// Pluggable per-agent behavior.
///
/// `step` receives the agent's record as of the start of the tick and
/// returns the record it should have afterwards.  It must not look at any
/// other agent except through `ctx`, and every random draw goes through
/// `rng`, the agent's own stream.
///
/// # Thread safety
///
/// town-sim may call `step` for all agents in parallel via Rayon (feature
/// `parallel`), so implementations must be `Send + Sync` and keep no
/// per-agent state of their own.
pub trait BehaviorModel: Send + Sync + 'static {
    fn step(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut AgentRng) -> StepOutcome;
}

/// The state the rendering boundary shows for `agent`.
///
/// Suspended agents are `idle`.  The player is `moving` while it has a
/// target and `idle` otherwise.  Everyone else reports their activity.
pub fn reported_state(agent: &Agent, suspended: bool) -> ActivityState {
    if suspended {
        ActivityState::Idle
    } else if agent.is_player() {
        if agent.player_target().is_some() {
            ActivityState::Moving
        } else {
            ActivityState::Idle
        }
    } else {
        agent.activity.state()
    }
}
