//! Storage adapters. Everything is process-lifetime only; persistence across
//! restarts is out of scope.

pub mod in_memory;
pub mod notify;
