//! Application layer: the lifecycle engine orchestrating stores, catalog,
//! sessions, and notifications for each inbound event.

pub mod engine;
