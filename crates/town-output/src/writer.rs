//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, EventRow, OutputResult, TransitionRow};

/// Errors are returned to the observer, which stores them; see
/// [`TownOutputObserver::take_error`][crate::TownOutputObserver::take_error].
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
