pub mod event_reader;
pub mod transcript_writer;
