//! One straight-line step.

use town_core::{Bounds, Point};

/// Result of moving one tick toward a target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// New position, already clamped.
    pub position: Point,
    /// Unclamped displacement; drives the facing decision.
    pub dx: f32,
    pub dy: f32,
    /// Distance to the target before the step.
    pub distance: f32,
}

/// Move `speed` units from `from` toward `to`, clamped to `bounds`.
///
/// A zero-length request returns `from` (clamped) with no displacement.
pub fn step_toward(from: Point, to: Point, speed: f32, bounds: &Bounds) -> Step {
    let delta = from.delta_to(to);
    let distance = from.distance(to);
    if distance <= f32::EPSILON {
        return Step { position: bounds.clamp(from), dx: 0.0, dy: 0.0, distance };
    }
    let dx = delta.x / distance * speed;
    let dy = delta.y / distance * speed;
    Step {
        position: bounds.clamp(from.offset(dx, dy)),
        dx,
        dy,
        distance,
    }
}
