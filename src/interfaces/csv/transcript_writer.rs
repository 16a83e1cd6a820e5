use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One outbound message in the transcript: who it goes to, what happened,
/// and a one-line detail.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct OutboundLine {
    pub recipient: String,
    pub kind: String,
    pub detail: String,
}

/// Writes the outbound notification transcript as CSV.
pub struct TranscriptWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TranscriptWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_lines(&mut self, lines: &[OutboundLine]) -> Result<()> {
        for line in lines {
            self.writer.serialize(line)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
