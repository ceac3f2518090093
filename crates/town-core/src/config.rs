//! Top-level town configuration.
//!
//! Every timing, distance, and probability constant the scheduler uses lives
//! in [`TownConfig`].  `Default` reproduces the reference town; applications
//! override individual fields (or load the struct with the `serde` feature).

use crate::{Bounds, CoreError, CoreResult, Millis, Point, SimClock, Tick};

/// Tuning constants for the map, clock, agents, encounters, and player.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TownConfig {
    // ── Map ───────────────────────────────────────────────────────────────
    pub width:     f32,
    pub height:    f32,
    /// Sprite tile size; agents keep one tile of margin inside the map.
    pub tile_size: f32,

    // ── Clock ─────────────────────────────────────────────────────────────
    /// Milliseconds represented by one fixed-step tick.  Default: 16.
    pub tick_duration_ms: u64,
    /// Total ticks for [`run`](SimClock)-style fixed-step runs.
    pub total_ticks: u64,
    /// Master RNG seed.
    pub seed: u64,
    /// Emit a render snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    // ── Autonomous agents ─────────────────────────────────────────────────
    /// Animation frames advance only when `tick % animation_tick_speed == 0`.
    pub animation_tick_speed: u64,
    /// Sprite frames per facing direction.
    pub frames_per_direction: u32,
    pub movement_speed:           f32,
    /// Multiplier on `movement_speed` while exploring.
    pub exploration_speed_factor: f32,
    pub goal_reach_threshold:     f32,
    pub task_duration_ms:         u64,
    pub exploration_duration_ms:  u64,
    pub exploration_radius:       f32,
    pub regeneration_pause_ms:    u64,

    // ── Encounters ────────────────────────────────────────────────────────
    pub interaction_distance:    f32,
    /// Per-tick probability that an eligible agent proposes an encounter.
    pub interaction_probability: f64,
    pub interaction_cooldown_ms: u64,
    pub typing_indicator_ms:     u64,
    pub message_display_ms:      u64,
    pub message_gap_ms:          u64,
    /// Extra hold after the last line before participants are released.
    pub release_tail_ms:         u64,
    pub max_dialogue_lines:      usize,

    // ── Player ────────────────────────────────────────────────────────────
    pub player_stop_radius:          f32,
    /// Distance over which the player's speed ramps up to full.
    pub player_speed_ramp:           f32,
    /// Upper bound on the player's speed multiplier.
    pub player_speed_cap:            f32,
    pub player_direction_hysteresis: f32,
    /// Below this distance the player's frame stops advancing.
    pub player_frame_min_distance:   f32,
    /// Horizontal offset from a resident the player walks to before talking.
    pub approach_offset_x:           f32,
    pub conversation_open_delay_ms:  u64,
    /// Delay between a chat reply arriving and it being shown.
    pub reply_reveal_delay_ms:       u64,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            width:     800.0,
            height:    600.0,
            tile_size: 48.0,

            tick_duration_ms:        16,
            total_ticks:             60 * 60 * 2, // two minutes at ~60 fps
            seed:                    42,
            snapshot_interval_ticks: 60,

            animation_tick_speed:     15,
            frames_per_direction:     6,
            movement_speed:           1.2,
            exploration_speed_factor: 0.7,
            goal_reach_threshold:     5.0,
            task_duration_ms:         5_000,
            exploration_duration_ms:  3_000,
            exploration_radius:       40.0,
            regeneration_pause_ms:    5_000,

            interaction_distance:    60.0,
            interaction_probability: 0.003,
            interaction_cooldown_ms: 25_000,
            typing_indicator_ms:     1_500,
            message_display_ms:      4_000,
            message_gap_ms:          500,
            release_tail_ms:         1_000,
            max_dialogue_lines:      2,

            player_stop_radius:          8.0,
            player_speed_ramp:           20.0,
            player_speed_cap:            1.5,
            player_direction_hysteresis: 0.3,
            player_frame_min_distance:   3.0,
            approach_offset_x:           50.0,
            conversation_open_delay_ms:  2_000,
            reply_reveal_delay_ms:       1_500,
        }
    }
}

impl TownConfig {
    /// Reject configurations the scheduler cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width <= 2.0 * self.tile_size || self.height <= 2.0 * self.tile_size {
            return Err(CoreError::Config(format!(
                "map {}x{} is too small for tile size {}",
                self.width, self.height, self.tile_size
            )));
        }
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be > 0".into()));
        }
        if self.frames_per_direction == 0 {
            return Err(CoreError::Config("frames_per_direction must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.interaction_probability) {
            return Err(CoreError::Config(format!(
                "interaction_probability {} is outside [0, 1]",
                self.interaction_probability
            )));
        }
        if self.max_dialogue_lines == 0 {
            return Err(CoreError::Config("max_dialogue_lines must be > 0".into()));
        }
        Ok(())
    }

    // ── Clamping regions ──────────────────────────────────────────────────

    /// Where autonomous agents may stand: `[0, W - tile] × [0, H - tile]`.
    pub fn agent_bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(0.0, 0.0),
            Point::new(self.width - self.tile_size, self.height - self.tile_size),
        )
    }

    /// Where exploration targets may land: one tile of margin on every side.
    pub fn exploration_bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(self.tile_size, self.tile_size),
            Point::new(self.width - self.tile_size, self.height - self.tile_size),
        )
    }

    /// Where the player may stand: half a tile of margin on every side.
    pub fn player_bounds(&self) -> Bounds {
        let half = self.tile_size / 2.0;
        Bounds::new(
            Point::new(half, half),
            Point::new(self.width - half, self.height - half),
        )
    }

    // ── Encounter timing ──────────────────────────────────────────────────

    /// Time one dialogue line occupies: typing + display + gap.
    #[inline]
    pub fn line_span_ms(&self) -> u64 {
        self.typing_indicator_ms + self.message_display_ms + self.message_gap_ms
    }

    /// How long both participants stay reserved for a dialogue of `lines`
    /// lines: `line_span × min(lines, max) + release_tail`.
    #[inline]
    pub fn encounter_busy_ms(&self, lines: usize) -> u64 {
        self.line_span_ms() * lines.min(self.max_dialogue_lines) as u64 + self.release_tail_ms
    }

    // ── Clock helpers ─────────────────────────────────────────────────────

    /// The tick at which a fixed-step run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a fixed-step `SimClock` starting at `start`.
    pub fn make_clock(&self, start: Millis) -> SimClock {
        SimClock::new(start.0, self.tick_duration_ms)
    }
}
