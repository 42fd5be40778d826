//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Damage resolution lives in the simulation crate, not here.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HIT_RADIUS;
use crate::enums::DamageState;
use crate::types::{CPos, WRange};

/// Marks an entity as an actor (unit or building) and names its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInfo {
    pub name: String,
}

/// Hit points of a damageable actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    /// Distance from the centre within which a hit counts as direct.
    pub radius: WRange,
}

/// Armor class, looked up in a warhead's versus table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub armor_type: String,
}

/// Target types this actor presents to weapons (e.g. "Ground", "Air").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targetable {
    pub target_types: Vec<String>,
}

/// Cells occupied by a multi-cell actor. Actors without a footprint
/// occupy the cell containing their centre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub cells: Vec<CPos>,
}

/// A transient explosion visual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explosion {
    pub sequence: String,
    pub palette: Option<String>,
}

/// Remaining ticks before an effect entity is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_ticks: u32,
}

impl Health {
    /// Full health with the default hit radius.
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            radius: WRange(DEFAULT_HIT_RADIUS),
        }
    }

    pub fn with_radius(mut self, radius: WRange) -> Self {
        self.radius = radius;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn damage_state(&self) -> DamageState {
        DamageState::from_health(self.hp, self.max_hp)
    }
}

impl Targetable {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_types: types.into_iter().map(Into::into).collect(),
        }
    }
}
