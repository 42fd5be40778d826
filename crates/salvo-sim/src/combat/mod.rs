//! Weapon detonation: falloff, per-target damage, the impact resolver and
//! the warhead dispatch entry points.

pub mod damage;
pub mod dispatch;
pub mod falloff;
pub mod impact;

pub use damage::compute_damage;
pub use dispatch::{apply_weapon, trigger_explosion};
pub use falloff::damage_falloff;
pub use impact::resolve_impact;
