//! The agent record.
//!
//! An `Agent` is a plain value.  The scheduler owns every record and changes
//! one only by replacing it whole (see [`AgentStore::replace`]); everything
//! else reads clones taken at the start of a tick.
//!
//! [`AgentStore::replace`]: crate::AgentStore::replace

use std::sync::Arc;

use town_core::{AgentId, Facing, Point};
use town_schedule::{Goal, GoalList};

use crate::{Activity, ConversationLog};

/// Who drives the agent.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Control {
    /// Runs the activity state machine.
    #[default]
    Autonomous,
    /// Driven by the operator.  `target` is where the last click or
    /// "go talk to" sent it.
    Player { target: Option<Point> },
}

/// Sprite frame count per facing direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameCounts {
    pub up:    u32,
    pub down:  u32,
    pub left:  u32,
    pub right: u32,
}

impl FrameCounts {
    pub const fn uniform(n: u32) -> Self {
        Self { up: n, down: n, left: n, right: n }
    }

    /// Frame count for `facing`; never zero.
    #[inline]
    pub fn for_facing(&self, facing: Facing) -> u32 {
        let n = match facing {
            Facing::Up    => self.up,
            Facing::Down  => self.down,
            Facing::Left  => self.left,
            Facing::Right => self.right,
        };
        n.max(1)
    }
}

impl Default for FrameCounts {
    fn default() -> Self {
        Self::uniform(6)
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    // ── Identity ──────────────────────────────────────────────────────────
    pub id:          AgentId,
    pub name:        String,
    /// Personality keywords from the definition.
    pub keywords:    String,
    /// Generated personality text; starts as the keywords until the
    /// dialogue service answers.
    pub personality: String,

    // ── Spatial ───────────────────────────────────────────────────────────
    pub position: Point,
    pub facing:   Facing,
    pub moving:   bool,
    pub frame:    u32,
    pub frames:   FrameCounts,

    // ── Behaviour ─────────────────────────────────────────────────────────
    pub activity:   Activity,
    pub goals:      GoalList,
    /// Tasks every regenerated list starts from.
    pub base_tasks: Arc<[Goal]>,

    // ── Social ────────────────────────────────────────────────────────────
    pub conversation: ConversationLog,

    pub control: Control,
}

impl Agent {
    /// A resident standing still at `position` with the given goals.
    pub fn new(id: AgentId, name: impl Into<String>, position: Point, goals: GoalList) -> Self {
        Self {
            id,
            name:         name.into(),
            keywords:     String::new(),
            personality:  String::new(),
            position,
            facing:       Facing::Down,
            moving:       false,
            frame:        0,
            frames:       FrameCounts::default(),
            activity:     Activity::Moving,
            base_tasks:   goals.goals().to_vec().into(),
            goals,
            conversation: ConversationLog::default(),
            control:      Control::Autonomous,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.control, Control::Player { .. })
    }

    /// The player's movement target; `None` for residents.
    #[inline]
    pub fn player_target(&self) -> Option<Point> {
        match self.control {
            Control::Player { target } => target,
            Control::Autonomous => None,
        }
    }

    /// Stop in place: not moving, first frame.
    pub fn halt(&mut self) {
        self.moving = false;
        self.frame = 0;
    }
}
