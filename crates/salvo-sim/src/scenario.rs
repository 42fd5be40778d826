//! Scenario loading: builds an engine, its actors and a detonation
//! schedule from a JSON description.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use salvo_core::commands::SimCommand;
use salvo_core::components::{ActorInfo, Armor, Footprint, Health, Targetable};
use salvo_core::rules::RuleSet;
use salvo_core::state::FrameReport;
use salvo_core::types::{CPos, WPos, WRange};

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::{ImpactError, SimError};
use crate::map::{Map, MapData};
use crate::world::actor_id;

/// Serialisable scenario description.
#[derive(Debug, Deserialize)]
pub struct ScenarioData {
    #[serde(default)]
    pub seed: u64,
    pub rules: RuleSet,
    pub map: MapData,
    #[serde(default)]
    pub actors: Vec<ActorSpawn>,
    #[serde(default)]
    pub detonations: Vec<ScheduledDetonation>,
}

/// One actor placed at scenario start.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorSpawn {
    pub name: String,
    pub pos: WPos,
    /// Max hp; actors without one take no damage.
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub radius: Option<WRange>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default = "default_target_types")]
    pub target_types: Vec<String>,
    #[serde(default)]
    pub footprint: Vec<CPos>,
}

/// A weapon detonation issued on a given tick.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledDetonation {
    pub tick: u64,
    /// Name of the firing actor; the world actor when absent.
    #[serde(default)]
    pub attacker: Option<String>,
    pub weapon: String,
    pub pos: WPos,
}

const MAX_PREALLOCATED_REPORTS: usize = 4096;

fn default_target_types() -> Vec<String> {
    vec!["Ground".to_string()]
}

/// A loaded scenario ready to run.
pub struct Scenario {
    pub engine: SimulationEngine,
    /// Commands keyed by the tick they are issued on.
    schedule: BTreeMap<u64, Vec<SimCommand>>,
}

/// Parse a scenario from JSON and build its engine.
pub fn load(json: &str) -> Result<Scenario, SimError> {
    let data: ScenarioData = serde_json::from_str(json)?;
    build(data)
}

/// Build the engine and schedule for an already parsed scenario.
pub fn build(data: ScenarioData) -> Result<Scenario, SimError> {
    let map = Map::from_data(data.map)?;
    let mut engine = SimulationEngine::new(
        SimConfig { seed: data.seed },
        Arc::new(data.rules),
        map,
    )?;

    let world_actor = engine.world().world_actor();
    let mut by_name = BTreeMap::new();
    for spawn in data.actors {
        let entity = spawn_actor(engine.world_mut().actors_mut(), &spawn);
        by_name.insert(spawn.name.clone(), entity);
    }

    let mut schedule: BTreeMap<u64, Vec<SimCommand>> = BTreeMap::new();
    for detonation in data.detonations {
        if engine.world().rules().weapon(&detonation.weapon).is_none() {
            return Err(ImpactError::UnknownWeapon(detonation.weapon).into());
        }
        let attacker = match &detonation.attacker {
            Some(name) => by_name.get(name).copied().unwrap_or_else(|| {
                tracing::warn!("unknown attacker `{}`, using the world actor", name);
                world_actor
            }),
            None => world_actor,
        };
        schedule
            .entry(detonation.tick)
            .or_default()
            .push(SimCommand::Explode {
                attacker: actor_id(attacker),
                weapon: detonation.weapon,
                pos: detonation.pos,
            });
    }

    Ok(Scenario { engine, schedule })
}

/// Reports to reserve up front for a run; long runs grow on demand.
pub(crate) fn report_capacity(ticks: u64) -> usize {
    usize::try_from(ticks).map_or(MAX_PREALLOCATED_REPORTS, |n| n.min(MAX_PREALLOCATED_REPORTS))
}

/// Spawn one actor with the components its description asks for.
pub fn spawn_actor(world: &mut hecs::World, spawn: &ActorSpawn) -> hecs::Entity {
    let mut builder = hecs::EntityBuilder::new();
    builder.add(spawn.pos).add(ActorInfo {
        name: spawn.name.clone(),
    });
    builder.add(Targetable::new(spawn.target_types.iter().cloned()));
    if let Some(max_hp) = spawn.hp {
        let mut health = Health::new(max_hp);
        if let Some(radius) = spawn.radius {
            health = health.with_radius(radius);
        }
        builder.add(health);
    }
    if let Some(armor_type) = &spawn.armor {
        builder.add(Armor {
            armor_type: armor_type.clone(),
        });
    }
    if !spawn.footprint.is_empty() {
        builder.add(Footprint {
            cells: spawn.footprint.clone(),
        });
    }
    world.spawn(builder.build())
}

impl Scenario {
    /// Run `ticks` ticks, issuing scheduled detonations on their tick.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<FrameReport>, SimError> {
        let mut reports = Vec::with_capacity(report_capacity(ticks));
        for _ in 0..ticks {
            let now = self.engine.time().tick;
            if let Some(commands) = self.schedule.remove(&now) {
                self.engine.queue_commands(commands);
            }
            reports.push(self.engine.tick()?);
        }
        Ok(reports)
    }
}
