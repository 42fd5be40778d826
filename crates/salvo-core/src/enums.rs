//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a warhead distributes its damage over the affected area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModel {
    /// Falloff with distance from the detonation point.
    #[default]
    Normal,
    /// Full damage to every unit in every cell of the area.
    PerCell,
    /// Damage is a percentage of each target's maximum health.
    HealthPercentage,
}

/// Coarse health bracket of an actor, derived from hp / max hp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageState {
    #[default]
    Undamaged,
    Light,
    Medium,
    Heavy,
    Critical,
    Dead,
}

impl DamageState {
    /// Bracket for the given health values.
    pub fn from_health(hp: i32, max_hp: i32) -> Self {
        let (hp, max_hp) = (hp as i64, max_hp as i64);
        if hp <= 0 {
            DamageState::Dead
        } else if hp * 4 < max_hp {
            DamageState::Critical
        } else if hp * 2 < max_hp {
            DamageState::Heavy
        } else if hp * 4 < max_hp * 3 {
            DamageState::Medium
        } else if hp == max_hp {
            DamageState::Undamaged
        } else {
            DamageState::Light
        }
    }
}
