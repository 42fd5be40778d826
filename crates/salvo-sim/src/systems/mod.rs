//! Systems that operate on the actor world each tick.
//!
//! Systems never add or remove entities directly; structural changes go
//! through the frame-end queue. `snapshot` is read-only.

pub mod lifetime;
pub mod snapshot;
