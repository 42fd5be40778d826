//! Game world: actors, map, resource and smudge layers, the shared random
//! source and the frame-end queue, plus the spatial queries combat needs.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::{ActorInfo, Footprint, Health};
use salvo_core::enums::DamageState;
use salvo_core::events::{AudioEvent, CombatEvent};
use salvo_core::rules::{RuleSet, WarheadInfo};
use salvo_core::types::{ActorId, CPos, SimTime, WPos, WRange};

use crate::error::ImpactError;
use crate::frame_end::FrameEndTask;
use crate::map::Map;
use crate::resources::ResourceLayer;
use crate::smudge::SmudgeLayer;

/// Converts an ECS handle to the serialisable actor id.
pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

/// All mutable simulation state touched by weapon impacts.
pub struct GameWorld {
    pub(crate) actors: World,
    pub(crate) map: Map,
    pub(crate) rules: Arc<RuleSet>,
    pub(crate) resources: ResourceLayer,
    pub(crate) smudges: BTreeMap<String, SmudgeLayer>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) frame_end: VecDeque<FrameEndTask>,
    pub(crate) audio_events: Vec<AudioEvent>,
    pub(crate) combat_events: Vec<CombatEvent>,
    pub(crate) time: SimTime,
    world_actor: Entity,
}

impl GameWorld {
    /// Create a world with one smudge layer per smudge type in the rules.
    pub fn new(map: Map, rules: Arc<RuleSet>, seed: u64) -> Self {
        let smudges = rules
            .smudge_types
            .iter()
            .map(|info| (info.name.clone(), SmudgeLayer::new(info.clone())))
            .collect();
        let mut actors = World::new();
        let world_actor = actors.spawn(());
        Self {
            actors,
            map,
            rules,
            resources: ResourceLayer::new(),
            smudges,
            rng: ChaCha8Rng::seed_from_u64(seed),
            frame_end: VecDeque::new(),
            audio_events: Vec::new(),
            combat_events: Vec::new(),
            time: SimTime::default(),
            world_actor,
        }
    }

    /// Component-less entity that owns world-level effects, used as the
    /// attacker when no actor fired.
    pub fn world_actor(&self) -> Entity {
        self.world_actor
    }

    pub fn actors(&self) -> &World {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut World {
        &mut self.actors
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    pub fn resources(&self) -> &ResourceLayer {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceLayer {
        &mut self.resources
    }

    pub fn smudge_layer(&self, smudge_type: &str) -> Option<&SmudgeLayer> {
        self.smudges.get(smudge_type)
    }

    /// The shared deterministic random source.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Number of tasks waiting for the next frame-end drain.
    pub fn pending_frame_end_tasks(&self) -> usize {
        self.frame_end.len()
    }

    /// Defer a world mutation to the end of the current frame.
    pub fn add_frame_end_task(&mut self, task: FrameEndTask) {
        self.frame_end.push_back(task);
    }

    pub fn play_sound(&mut self, event: AudioEvent) {
        self.audio_events.push(event);
    }

    /// Check that every smudge type a warhead could paint on this map's
    /// terrain has a registered layer.
    pub fn validate_smudge_layers(&self) -> Result<(), ImpactError> {
        for (_, weapon) in self.rules.weapons() {
            for warhead in &weapon.warheads {
                for smudge_type in &warhead.smudge_type {
                    let paintable = self
                        .map
                        .terrain_types()
                        .iter()
                        .any(|t| t.accepts_smudge_type.contains(smudge_type));
                    if paintable && !self.smudges.contains_key(smudge_type) {
                        return Err(ImpactError::UnknownSmudgeType(smudge_type.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Actors whose centre lies within `range` of `origin` on the ground
    /// plane, in entity order. A negative range finds nothing.
    pub fn find_actors_in_circle(&self, origin: WPos, range: WRange) -> Vec<Entity> {
        if range.range() < 0 {
            return Vec::new();
        }
        let range_sq = (range.range() as u128).pow(2);
        let mut found: Vec<Entity> = self
            .actors
            .query::<(&WPos, &ActorInfo)>()
            .iter()
            .filter(|(_, (pos, _))| (**pos - origin).horizontal_length_squared() <= range_sq)
            .map(|(entity, _)| entity)
            .collect();
        found.sort();
        found
    }

    /// Actors occupying a cell, in entity order.
    pub fn actors_at_cell(&self, cell: CPos) -> Vec<Entity> {
        let mut found: Vec<Entity> = self
            .actors
            .query::<(&WPos, &ActorInfo, Option<&Footprint>)>()
            .iter()
            .filter(|(_, (pos, _, footprint))| match footprint {
                Some(footprint) => footprint.cells.contains(&cell),
                None => self.map.cell_containing(**pos) == cell,
            })
            .map(|(entity, _)| entity)
            .collect();
        found.sort();
        found
    }

    /// Apply damage (negative heals) to an actor on behalf of `attacker`.
    /// Dead actors and actors without health are unaffected.
    pub fn inflict_damage(
        &mut self,
        victim: Entity,
        attacker: Entity,
        amount: i32,
        warhead: &WarheadInfo,
    ) {
        let Ok(mut health) = self.actors.get::<&mut Health>(victim) else {
            return;
        };
        if health.is_dead() {
            return;
        }

        health.hp = health.hp.saturating_sub(amount).clamp(0, health.max_hp);
        let state = health.damage_state();
        self.combat_events.push(CombatEvent::Damaged {
            victim: actor_id(victim),
            attacker: actor_id(attacker),
            amount,
            hp: health.hp,
            state,
            model: warhead.damage_model,
        });

        if state == DamageState::Dead {
            tracing::debug!("actor {:?} killed by {:?}", victim, attacker);
            self.combat_events.push(CombatEvent::Killed {
                victim: actor_id(victim),
                attacker: actor_id(attacker),
            });
            self.frame_end.push_back(FrameEndTask::RemoveActor(victim));
        }
    }
}
