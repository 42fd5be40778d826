//! Dispatch layer: the entry points projectiles and area effects call.

use std::sync::Arc;

use hecs::Entity;
use rand::seq::SliceRandom;

use salvo_core::events::AudioEvent;
use salvo_core::rules::WeaponInfo;
use salvo_core::types::WPos;

use super::impact::resolve_impact;
use crate::error::ImpactError;
use crate::frame_end::{DelayedWarhead, FrameEndTask};
use crate::world::GameWorld;

/// Detonate every warhead of `weapon` at `pos`.
///
/// Warheads without a delay resolve immediately, in declaration order.
/// Delayed warheads are queued and resolve `delay` frames later.
pub fn apply_weapon(
    world: &mut GameWorld,
    pos: WPos,
    fired_by: Entity,
    weapon: &Arc<WeaponInfo>,
    damage_modifier: f32,
) -> Result<(), ImpactError> {
    for (index, warhead) in weapon.warheads.iter().enumerate() {
        if warhead.delay > 0 {
            world.add_frame_end_task(FrameEndTask::DelayedWarhead(DelayedWarhead {
                ticks_remaining: warhead.delay as u32,
                pos,
                weapon: Arc::clone(weapon),
                warhead: index,
                fired_by,
                modifier: damage_modifier,
            }));
        } else {
            resolve_impact(world, pos, warhead, weapon, fired_by, damage_modifier)?;
        }
    }
    Ok(())
}

/// Detonate a weapon looked up by case-insensitive name, playing one of
/// its report sounds first.
pub fn trigger_explosion(
    world: &mut GameWorld,
    attacker: Entity,
    weapon_name: &str,
    pos: WPos,
) -> Result<(), ImpactError> {
    let weapon = world
        .rules
        .weapon(weapon_name)
        .cloned()
        .ok_or_else(|| ImpactError::UnknownWeapon(weapon_name.to_string()))?;

    if let Some(sound) = weapon.report.choose(&mut world.rng) {
        world.play_sound(AudioEvent::Report {
            sound: sound.clone(),
            pos,
        });
    }

    apply_weapon(world, pos, attacker, &weapon, 1.0)
}
