use crate::domain::action::ActionState;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct StateLine<'a> {
    row: usize,
    #[serde(flatten)]
    state: &'a ActionState,
}

/// Writes `ActionState` snapshots as JSON lines, tagged with the input row they belong to.
pub struct StateWriter<W: Write> {
    writer: W,
}

impl<W: Write> StateWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_state(&mut self, row: usize, state: &ActionState) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &StateLine { row, state })?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
