//! Impact resolver: applies one warhead at one position: explosion
//! visual, sound, smudges, resource destruction and splatter, and damage
//! according to the warhead's damage model.

use std::collections::BTreeSet;
use std::sync::Arc;

use hecs::Entity;
use rand::Rng;

use salvo_core::components::Health;
use salvo_core::enums::DamageModel;
use salvo_core::events::AudioEvent;
use salvo_core::rules::{WarheadInfo, WeaponInfo};
use salvo_core::types::{CPos, WPos, WRange};

use super::damage::compute_damage;
use crate::error::ImpactError;
use crate::frame_end::FrameEndTask;
use crate::world::GameWorld;

/// Resolve a single warhead detonating at `pos`, fired by `fired_by`.
///
/// Off-map impacts are ignored. The only error is a smudge type without
/// a registered layer, which aborts resolution.
pub fn resolve_impact(
    world: &mut GameWorld,
    pos: WPos,
    warhead: &WarheadInfo,
    weapon: &WeaponInfo,
    fired_by: Entity,
    firepower_modifier: f32,
) -> Result<(), ImpactError> {
    let target_cell = world.map.cell_containing(pos);
    let Some(terrain) = world.map.terrain_info(target_cell) else {
        tracing::trace!("impact at {:?} is off the map", pos);
        return Ok(());
    };
    let is_water = pos.z <= 0 && terrain.is_water;

    if let Some((sequence, palette)) = warhead.explosion_for(is_water) {
        world.add_frame_end_task(FrameEndTask::SpawnExplosion {
            pos,
            sequence: sequence.to_string(),
            palette: palette.map(str::to_string),
        });
    }

    if let Some(sound) = warhead.impact_sound_for(is_water) {
        world.play_sound(AudioEvent::Impact {
            sound: sound.to_string(),
            pos,
        });
    }

    if warhead.size.outer > 0 {
        apply_area_effects(world, target_cell, warhead)?;
    } else {
        paint_smudge(world, warhead, target_cell)?;
    }

    if warhead.destroy_resources {
        world.resources.destroy(target_cell);
    }

    match warhead.damage_model {
        DamageModel::Normal => {
            apply_falloff_damage(world, pos, warhead, weapon, fired_by, firepower_modifier)
        }
        DamageModel::PerCell => {
            apply_per_cell_damage(world, pos, target_cell, warhead, weapon, fired_by, firepower_modifier)
        }
        DamageModel::HealthPercentage => {
            apply_health_percentage_damage(world, pos, warhead, weapon, fired_by, firepower_modifier)
        }
    }

    tracing::debug!(
        "resolved {:?} warhead at {:?} (cell {:?}, water: {})",
        warhead.damage_model,
        pos,
        target_cell,
        is_water
    );
    Ok(())
}

/// Smudges on the (possibly ring-shaped) area, resource destruction and
/// resource splatter on the full disk.
fn apply_area_effects(
    world: &mut GameWorld,
    target_cell: CPos,
    warhead: &WarheadInfo,
) -> Result<(), ImpactError> {
    let all_cells: Vec<CPos> = world
        .map
        .find_tiles_in_circle(target_cell, warhead.size.outer)
        .collect();

    // The inner disk is only spared from smudging.
    let smudge_cells: Vec<CPos> = match warhead.size.inner {
        Some(inner) => {
            let spared: BTreeSet<CPos> = world.map.find_tiles_in_circle(target_cell, inner).collect();
            all_cells
                .iter()
                .copied()
                .filter(|cell| !spared.contains(cell))
                .collect()
        }
        None => all_cells.clone(),
    };

    for &cell in &smudge_cells {
        if paint_smudge(world, warhead, cell)? && warhead.destroy_resources {
            world.resources.destroy(cell);
        }
    }

    if warhead.destroy_resources {
        for &cell in &all_cells {
            world.resources.destroy(cell);
        }
    }

    if let Some(name) = warhead.resource_to_add() {
        splatter_resources(world, name, &all_cells);
    }

    Ok(())
}

/// Paint the highest-priority smudge type the cell's terrain accepts.
/// Returns whether a smudge was painted.
fn paint_smudge(world: &mut GameWorld, warhead: &WarheadInfo, cell: CPos) -> Result<bool, ImpactError> {
    let Some(terrain) = world.map.terrain_info(cell) else {
        return Ok(false);
    };
    let Some(smudge_type) = warhead
        .smudge_type
        .iter()
        .find(|t| terrain.accepts_smudge_type.contains(*t))
    else {
        return Ok(false);
    };

    let layer = world
        .smudges
        .get_mut(smudge_type)
        .ok_or_else(|| ImpactError::UnknownSmudgeType(smudge_type.clone()))?;
    layer.add_smudge(cell, &mut world.rng);
    Ok(true)
}

/// Scatter a random amount of resource on every cell that can hold it.
fn splatter_resources(world: &mut GameWorld, name: &str, cells: &[CPos]) {
    let rules = Arc::clone(&world.rules);
    let Some(resource) = rules.resource_type(name) else {
        tracing::warn!("warhead defines an invalid resource type '{}'", name);
        return;
    };

    for &cell in cells {
        if !world.resources.can_spawn_resource_at(&world.map, resource, cell) {
            continue;
        }
        let upper = resource.max_density - world.resources.density_at(cell);
        if upper <= 1 {
            continue;
        }
        let amount = world.rng.gen_range(1..upper);
        world.resources.add_resource(resource, cell, amount);
    }
}

/// Radius of the falloff model. A max spread below the spread is derived
/// from the damage instead.
pub fn falloff_radius(warhead: &WarheadInfo) -> WRange {
    let spread = warhead.spread.range();
    let max_spread = warhead.max_spread.range();
    if max_spread >= spread {
        return WRange(max_spread);
    }
    let log = (warhead.damage.unsigned_abs() as f64).log2() as f32;
    WRange((spread as f32 * log) as i32)
}

fn apply_falloff_damage(
    world: &mut GameWorld,
    pos: WPos,
    warhead: &WarheadInfo,
    weapon: &WeaponInfo,
    fired_by: Entity,
    modifier: f32,
) {
    let radius = falloff_radius(warhead);
    for victim in world.find_actors_in_circle(pos, radius) {
        let damage = compute_damage(&world.actors, pos, victim, warhead, weapon, modifier, true);
        world.inflict_damage(victim, fired_by, damage as i32, warhead);
    }
}

fn apply_per_cell_damage(
    world: &mut GameWorld,
    pos: WPos,
    target_cell: CPos,
    warhead: &WarheadInfo,
    weapon: &WeaponInfo,
    fired_by: Entity,
    modifier: f32,
) {
    let cells: Vec<CPos> = world
        .map
        .find_tiles_in_circle(target_cell, warhead.size.outer)
        .collect();
    for cell in cells {
        for unit in world.actors_at_cell(cell) {
            let damage = compute_damage(&world.actors, pos, unit, warhead, weapon, modifier, false);
            world.inflict_damage(unit, fired_by, damage as i32, warhead);
        }
    }
}

fn apply_health_percentage_damage(
    world: &mut GameWorld,
    pos: WPos,
    warhead: &WarheadInfo,
    weapon: &WeaponInfo,
    fired_by: Entity,
    modifier: f32,
) {
    let radius = WRange::from_cells(warhead.size.outer);
    for victim in world.find_actors_in_circle(pos, radius) {
        let mut damage = compute_damage(&world.actors, pos, victim, warhead, weapon, modifier, false);
        // Zero when the victim has no health.
        if damage != 0.0 {
            if let Ok(health) = world.actors.get::<&Health>(victim) {
                damage = damage / 100.0 * health.max_hp as f32;
            }
        }
        world.inflict_damage(victim, fired_by, damage as i32, warhead);
    }
}
