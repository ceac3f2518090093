//! `ActivityMachine` — the resident state machine and player steering.
//!
//! # Transitions (residents)
//!
//! ```text
//!             reach goal (< 5)                 task done (≥ 5000 ms)
//!   Moving ───────────────────▶ Working ────────────────────────────▶ Exploring
//!     ▲  │                                                              │  ▲ │
//!     │  │ list exhausted                      exploration over (≥ 3000 ms) │ │ target reached:
//!     │  ▼                                                              │  └─┘ resample
//!     │ RegeneratingTasks ── pause over (≥ 5000 ms), new list ──▶ Moving ◀┘
//! ```
//!
//! A goal whose location key is unknown is completed and skipped in place;
//! if that exhausts the list, regeneration starts on the same tick.
//!
//! Timers are wall-clock: an agent suspended in the middle of `Working` or
//! `Exploring` resumes with the same `started` stamp, so time spent idle
//! counts toward the duration.

use town_agent::{Activity, Agent, Control};
use town_core::{AgentId, AgentRng, Point};
use town_mobility::PlayerMotion;

use crate::{reported_state, BehaviorModel, Intent, SimContext, StepOutcome};

/// The town's behavior model.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActivityMachine;

impl BehaviorModel for ActivityMachine {
    fn step(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut AgentRng) -> StepOutcome {
        let suspended = ctx.is_suspended(agent.id);
        let before = reported_state(agent, ctx.was_suspended(agent.id));

        let mut next = agent.clone();
        let mut intents = Vec::new();

        if suspended {
            next.halt();
        } else {
            match agent.control {
                Control::Player { target } => step_player(&mut next, target, ctx),
                Control::Autonomous => step_resident(&mut next, ctx, rng, &mut intents),
            }
        }

        let after = reported_state(&next, suspended);
        let transition = (before != after).then_some((before, after));
        StepOutcome { next, intents, transition }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

fn step_player(next: &mut Agent, target: Option<Point>, ctx: &SimContext<'_>) {
    let Some(target) = target else {
        next.halt();
        return;
    };
    if ctx.motion.steer_player(next, target, ctx.tick) == PlayerMotion::Arrived {
        next.control = Control::Player { target: None };
    }
}

// ── Residents ─────────────────────────────────────────────────────────────────

fn step_resident(
    next:    &mut Agent,
    ctx:     &SimContext<'_>,
    rng:     &mut AgentRng,
    intents: &mut Vec<Intent>,
) {
    let now = ctx.now;
    let cfg = ctx.config;

    match next.activity {
        Activity::Moving => {
            if let Some(partner) = propose_encounter(next, ctx, rng) {
                intents.push(Intent::ProposeEncounter { partner });
            }
            step_moving(next, ctx);
        }

        Activity::Working { started } => {
            if now.has_elapsed(started, cfg.task_duration_ms) {
                let base = next.position;
                next.goals = next.goals.complete_current();
                next.activity = Activity::Exploring {
                    started: now,
                    base,
                    target:  ctx.motion.exploration_target(base, rng),
                };
                tracing::debug!(agent = %next.name, completed = next.goals.cursor(), "task finished, exploring");
            } else {
                next.halt();
            }
        }

        Activity::Exploring { started, base, target } => {
            if now.has_elapsed(started, cfg.exploration_duration_ms) {
                next.activity = Activity::Moving;
            } else if next.position.distance(target) < cfg.goal_reach_threshold {
                next.activity = Activity::Exploring {
                    started,
                    base,
                    target: ctx.motion.exploration_target(base, rng),
                };
            } else {
                let speed = ctx.motion.exploration_speed();
                ctx.motion.walk(next, target, speed, ctx.tick);
            }
        }

        Activity::RegeneratingTasks { since } => {
            if now.has_elapsed(since, cfg.regeneration_pause_ms) {
                next.goals = ctx.tasks.generate(&next.base_tasks, rng);
                next.activity = Activity::Moving;
                tracing::debug!(agent = %next.name, goals = next.goals.len(), "goal list regenerated");
            } else {
                next.halt();
            }
        }
    }
}

fn step_moving(next: &mut Agent, ctx: &SimContext<'_>) {
    let Some(goal) = next.goals.current() else {
        next.halt();
        next.activity = Activity::RegeneratingTasks { since: ctx.now };
        return;
    };

    let Some(destination) = ctx.locations.position(&goal.location) else {
        tracing::warn!(
            agent = %next.name,
            location = %goal.location,
            task = %goal.task,
            "unknown location, skipping goal"
        );
        next.goals = next.goals.complete_current();
        next.moving = false;
        if next.goals.is_exhausted() {
            next.halt();
            next.activity = Activity::RegeneratingTasks { since: ctx.now };
        }
        return;
    };

    if next.position.distance(destination) < ctx.config.goal_reach_threshold {
        next.halt();
        next.activity = Activity::Working { started: ctx.now };
        return;
    }

    let speed = ctx.motion.movement_speed;
    ctx.motion.walk(next, destination, speed, ctx.tick);
}

/// Draw for an unprompted encounter.  Only the first neighbour is considered.
fn propose_encounter(agent: &Agent, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Option<AgentId> {
    if !ctx.encounters_open {
        return None;
    }
    let first = *ctx.neighbours(agent).first()?;
    rng.chance(ctx.config.interaction_probability).then_some(first)
}
