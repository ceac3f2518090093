//! `TownOutputObserver<W>` — bridges `TownObserver` to an `OutputWriter`.

use town_agent::ActivityState;
use town_core::{AgentId, Millis, Tick};
use town_sim::{AgentView, PresentationEvent, TownObserver};

use crate::row::{AgentSnapshotRow, EventRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TownObserver`] that records snapshots, events, and transitions.
///
/// Observer callbacks cannot fail, so the first write error is kept and
/// returned by [`take_error`][Self::take_error]; later writes still run.
pub struct TownOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TownOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Needed after `run_ticks`, which has no end hook.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TownObserver for TownOutputObserver<W> {
    fn on_transition(&mut self, tick: Tick, agent: AgentId, from: ActivityState, to: ActivityState) {
        let row = TransitionRow { tick: tick.0, agent_id: agent.0, from, to };
        let result = self.writer.write_transition(&row);
        self.store_err(result);
    }

    fn on_event(&mut self, tick: Tick, now: Millis, event: &PresentationEvent) {
        let result = self.writer.write_event(&EventRow::from_event(tick, now, event));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, now: Millis, views: &[AgentView]) {
        let rows: Vec<AgentSnapshotRow> =
            views.iter().map(|v| AgentSnapshotRow::from_view(tick, now, v)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
