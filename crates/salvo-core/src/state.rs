//! Per-frame report and actor views: what the simulation exposes to
//! observers after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::DamageState;
use crate::events::{AudioEvent, CombatEvent};
use crate::types::{ActorId, SimTime, WPos};

/// Everything observable that one tick produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Time of the frame that produced this report.
    pub time: SimTime,
    pub audio: Vec<AudioEvent>,
    pub combat: Vec<CombatEvent>,
}

/// Health summary of one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub name: String,
    pub pos: WPos,
    pub hp: Option<i32>,
    pub state: Option<DamageState>,
}
