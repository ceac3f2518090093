//! The motion engine: turns a target into a new position, facing, and frame.

use town_agent::Agent;
use town_core::{AgentRng, Bounds, Facing, Point, Tick, TownConfig};

use crate::step_toward;

/// What the player's steering did this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerMotion {
    /// Within the stop radius: target reached, agent halted.
    Arrived,
    Moved,
}

/// Motion constants derived once from [`TownConfig`].
#[derive(Clone, Debug)]
pub struct MotionEngine {
    pub movement_speed:      f32,
    pub exploration_factor:  f32,
    pub exploration_radius:  f32,
    pub animation_tick_speed: u64,

    pub agent_bounds:       Bounds,
    pub exploration_bounds: Bounds,
    pub player_bounds:      Bounds,

    pub player_stop_radius:   f32,
    pub player_speed_ramp:    f32,
    pub player_speed_cap:     f32,
    pub player_hysteresis:    f32,
    pub player_frame_min_distance: f32,
}

impl MotionEngine {
    pub fn new(config: &TownConfig) -> Self {
        Self {
            movement_speed:       config.movement_speed,
            exploration_factor:   config.exploration_speed_factor,
            exploration_radius:   config.exploration_radius,
            animation_tick_speed: config.animation_tick_speed,

            agent_bounds:       config.agent_bounds(),
            exploration_bounds: config.exploration_bounds(),
            player_bounds:      config.player_bounds(),

            player_stop_radius:        config.player_stop_radius,
            player_speed_ramp:         config.player_speed_ramp,
            player_speed_cap:          config.player_speed_cap,
            player_hysteresis:         config.player_direction_hysteresis,
            player_frame_min_distance: config.player_frame_min_distance,
        }
    }

    /// Speed while exploring.
    #[inline]
    pub fn exploration_speed(&self) -> f32 {
        self.movement_speed * self.exploration_factor
    }

    // ── Residents ─────────────────────────────────────────────────────────

    /// Move a resident one tick toward `target` at `speed`.
    ///
    /// Sets `moving`, turns to face the larger axis of the step, and advances
    /// the frame (modulo the new facing's frame count) on animation ticks.
    pub fn walk(&self, agent: &mut Agent, target: Point, speed: f32, tick: Tick) {
        let step = step_toward(agent.position, target, speed, &self.agent_bounds);
        agent.position = step.position;
        agent.moving = true;
        agent.facing = Facing::from_step(step.dx, step.dy);
        if tick.is_animation_tick(self.animation_tick_speed) {
            agent.frame = (agent.frame + 1) % agent.frames.for_facing(agent.facing);
        }
    }

    /// A random point within `exploration_radius` of `base`, clamped to the
    /// exploration bounds.
    pub fn exploration_target(&self, base: Point, rng: &mut AgentRng) -> Point {
        let angle = rng.heading();
        let distance = rng.below(self.exploration_radius);
        self.exploration_bounds
            .clamp(base.offset(angle.cos() * distance, angle.sin() * distance))
    }

    // ── Player ────────────────────────────────────────────────────────────

    /// Steer the player one tick toward `target`.
    ///
    /// Within `player_stop_radius` the player halts and `Arrived` is returned;
    /// the caller clears the target.  Otherwise speed ramps with distance up
    /// to the cap, facing changes only when one axis clearly dominates, and
    /// the frame holds still on the last few units.
    pub fn steer_player(&self, agent: &mut Agent, target: Point, tick: Tick) -> PlayerMotion {
        let distance = agent.position.distance(target);
        if distance < self.player_stop_radius {
            agent.halt();
            return PlayerMotion::Arrived;
        }

        let ramp = if self.player_speed_ramp > 0.0 {
            (distance / self.player_speed_ramp).min(self.player_speed_cap)
        } else {
            self.player_speed_cap
        };
        let step = step_toward(agent.position, target, self.movement_speed * ramp, &self.player_bounds);

        agent.position = step.position;
        agent.moving = true;
        agent.facing = agent.facing.with_hysteresis(step.dx, step.dy, self.player_hysteresis);
        if tick.is_animation_tick(self.animation_tick_speed) && distance > self.player_frame_min_distance {
            agent.frame = (agent.frame + 1) % agent.frames.for_facing(agent.facing);
        }
        PlayerMotion::Moved
    }
}
