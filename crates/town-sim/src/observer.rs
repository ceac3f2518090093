//! Observer trait for progress reporting and data collection.

use town_agent::ActivityState;
use town_core::{AgentId, Millis, Tick};

use crate::{AgentView, PresentationEvent};

/// Callbacks invoked by [`Town::tick`][crate::Town::tick].
///
/// All methods have no-op defaults so implementors only override what they
/// care about.
///
/// # Example — transition counter
///
/// ```rust,ignore
/// struct Transitions(usize);
///
/// impl TownObserver for Transitions {
///     fn on_transition(&mut self, _: Tick, _: AgentId, _: ActivityState, _: ActivityState) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait TownObserver {
    fn on_tick_start(&mut self, _tick: Tick, _now: Millis) {}

    /// An agent's reported state changed since the previous tick.
    fn on_transition(
        &mut self,
        _tick:  Tick,
        _agent: AgentId,
        _from:  ActivityState,
        _to:    ActivityState,
    ) {}

    /// Presentation events raised since the previous tick, including those
    /// caused by player input between ticks.
    fn on_event(&mut self, _tick: Tick, _now: Millis, _event: &PresentationEvent) {}

    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _tick: Tick, _now: Millis, _views: &[AgentView]) {}

    /// Called once when [`Town::run`][crate::Town::run] finishes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`TownObserver`] that does nothing.
pub struct NoopObserver;

impl TownObserver for NoopObserver {}
