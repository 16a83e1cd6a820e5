//! Domain layer: entities, the review state machine, the catalog, and the
//! ports the application layer depends on.

pub mod catalog;
pub mod feedback;
pub mod notice;
pub mod order;
pub mod ports;
pub mod review;
