//! Transport-facing adapters: the callback payload codec, the command
//! parser, the CSV event script reader/transcript writer, and the dispatcher
//! that ties them to the engine.

pub mod command;
pub mod csv;
pub mod dispatch;
pub mod payload;
