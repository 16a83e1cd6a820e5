use crate::error::{DeskError, Result};
use serde::Deserialize;
use std::io::Read;

/// How the transport classified an inbound event.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Place an order; `data` is the service name.
    Order,
    /// List the actor's own orders; `data` is ignored.
    Orders,
    /// A button press; `data` is an encoded callback payload.
    Callback,
    /// Free-text feedback; `data` is the text.
    Feedback,
    /// A structured command; `data` is the command line.
    Command,
}

/// One inbound event row: `kind, actor, data`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub kind: EventKind,
    pub actor: u64,
    #[serde(default)]
    pub data: String,
}

/// Reads inbound events from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// yielding `Result<EventRecord>` lazily so large scripts stream.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn events(self) -> impl Iterator<Item = Result<EventRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DeskError::from))
    }
}
