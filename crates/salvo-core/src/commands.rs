//! Commands fed into the simulation.
//!
//! Commands are queued and processed at the next tick boundary, so a
//! recorded command stream replays identically on every client.

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, WPos};

/// All externally issued simulation actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Detonate a named weapon at a position, attributed to `attacker`.
    Explode {
        attacker: ActorId,
        weapon: String,
        pos: WPos,
    },
}
