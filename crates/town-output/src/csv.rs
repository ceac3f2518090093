//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, EventRow, OutputResult, TransitionRow};

/// Writes `agent_snapshots.csv`, `events.csv`, and `transitions.csv`.
pub struct CsvWriter {
    snapshots:   Writer<File>,
    events:      Writer<File>,
    transitions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three files, and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "tick", "time_ms", "agent_id", "name", "x", "y", "facing", "frame", "moving",
            "state", "selected", "player_controlled", "in_conversation",
        ])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "time_ms", "kind", "agent_id", "other_id", "line", "text"])?;

        let mut transitions = Writer::from_path(dir.join("transitions.csv"))?;
        transitions.write_record(["tick", "agent_id", "from", "to"])?;

        Ok(Self { snapshots, events, transitions, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(value: bool) -> String {
    (value as u8).to_string()
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.time_ms.to_string(),
                row.agent_id.to_string(),
                row.name.clone(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.facing.clone(),
                row.frame.to_string(),
                flag(row.moving),
                row.state.to_owned(),
                flag(row.selected),
                flag(row.player_controlled),
                flag(row.in_conversation),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.time_ms.to_string(),
            row.kind.to_owned(),
            opt(row.agent),
            opt(row.other),
            opt(row.line),
            row.text.clone(),
        ])?;
        Ok(())
    }

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        self.transitions.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.from.as_str().to_owned(),
            row.to.as_str().to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        self.transitions.flush()?;
        Ok(())
    }
}
