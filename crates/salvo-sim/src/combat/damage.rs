//! Per-target damage computation.

use hecs::{Entity, World};

use salvo_core::components::{Armor, Health, Targetable};
use salvo_core::rules::{WarheadInfo, WeaponInfo};
use salvo_core::types::WPos;

use super::falloff::damage_falloff;

/// Damage a warhead detonating at `pos` would deal to `target`, before
/// truncation. Zero when the weapon cannot affect the target or the
/// target has no health.
pub fn compute_damage(
    actors: &World,
    pos: WPos,
    target: Entity,
    warhead: &WarheadInfo,
    weapon: &WeaponInfo,
    modifier: f32,
    use_falloff: bool,
) -> f32 {
    let targetable = actors.get::<&Targetable>(target).ok();
    let armor = actors.get::<&Armor>(target).ok();

    // Ground splash never hits aircraft, etc.
    if !weapon.is_valid_against(targetable.as_deref(), armor.as_deref()) {
        return 0.0;
    }

    let Ok(health) = actors.get::<&Health>(target) else {
        return 0.0;
    };

    let mut raw_damage = warhead.damage as f32;
    if use_falloff {
        let center = actors.get::<&WPos>(target).map_or(pos, |p| *p);
        let distance = (center - pos).length().saturating_sub(health.radius.range()).max(0);
        let falloff = damage_falloff(distance as f32 / warhead.spread.range() as f32);
        raw_damage *= falloff;
    }

    raw_damage * modifier * warhead.effectiveness_against(armor.as_deref())
}
