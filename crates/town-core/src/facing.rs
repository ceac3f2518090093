//! Facing direction of an agent sprite.

use std::fmt;

/// Which way an agent faces.  Selects the sprite strip to animate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing for a step of `(dx, dy)`: horizontal only when `|dx|` is
    /// strictly larger, so vertical wins ties.
    #[inline]
    pub fn from_step(dx: f32, dy: f32) -> Facing {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Facing::Right } else { Facing::Left }
        } else if dy > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        }
    }

    /// Like [`from_step`](Self::from_step) but only turns when one axis
    /// dominates the other by more than `threshold`; otherwise keeps `self`.
    #[inline]
    pub fn with_hysteresis(self, dx: f32, dy: f32, threshold: f32) -> Facing {
        if dx.abs() > dy.abs() + threshold {
            if dx > 0.0 { Facing::Right } else { Facing::Left }
        } else if dy.abs() > dx.abs() + threshold {
            if dy > 0.0 { Facing::Down } else { Facing::Up }
        } else {
            self
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Facing::Up    => "up",
            Facing::Down  => "down",
            Facing::Left  => "left",
            Facing::Right => "right",
        };
        f.write_str(s)
    }
}
