//! `town-mobility` — per-tick motion integration.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`step`]   | `step_toward`, `Step` — one clamped straight-line step          |
//! | [`engine`] | `MotionEngine` — resident walking, player steering, exploration |
//!
//! # Movement model
//!
//! Motion is straight-line with no obstacles.  Each tick an agent moves
//! `speed` units along the unit vector to its target, then is clamped to its
//! bounds.  Positions update every tick; animation frames only advance on
//! ticks where `tick % animation_tick_speed == 0`.
//!
//! Residents and the player differ:
//!
//! | | Residents | Player |
//! |-|-----------|--------|
//! | speed | `movement_speed` (× 0.7 exploring) | `movement_speed × min(d / 20, 1.5)` |
//! | bounds | `[0, W − tile]` | `[tile / 2, W − tile / 2]` |
//! | facing | larger axis, horizontal on ties only if strictly larger | changes only past a 0.3 hysteresis |
//! | stop | caller decides (goal / target radius) | within 8 units |

pub mod engine;
pub mod step;


pub use engine::{MotionEngine, PlayerMotion};
pub use step::{step_toward, Step};
