//! Events emitted by the simulation for audio and gameplay feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{DamageModel, DamageState};
use crate::types::{ActorId, WPos};

/// Sound requests for the frontend audio system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A weapon's report sound at the firing point.
    Report { sound: String, pos: WPos },
    /// A warhead's impact sound at the detonation point.
    Impact { sound: String, pos: WPos },
}

/// Health changes caused by warheads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Damage (or healing, when negative) applied to an actor.
    Damaged {
        victim: ActorId,
        attacker: ActorId,
        amount: i32,
        hp: i32,
        state: DamageState,
        model: DamageModel,
    },
    /// An actor's health reached zero.
    Killed { victim: ActorId, attacker: ActorId },
}
