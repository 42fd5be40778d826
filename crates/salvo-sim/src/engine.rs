//! Simulation engine — drives the game world tick by tick.
//!
//! `SimulationEngine` owns the `GameWorld`, processes queued commands,
//! runs the per-tick systems, drains the frame-end queue and produces a
//! `FrameReport` per tick. Completely headless, enabling deterministic
//! testing and replay.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::Entity;

use salvo_core::commands::SimCommand;
use salvo_core::components::{Explosion, Lifetime};
use salvo_core::constants::EXPLOSION_LIFETIME_TICKS;
use salvo_core::rules::RuleSet;
use salvo_core::state::FrameReport;
use salvo_core::types::{ActorId, SimTime};

use crate::combat;
use crate::error::{ImpactError, SimError};
use crate::frame_end::{DelayedWarhead, FrameEndTask};
use crate::map::Map;
use crate::systems;
use crate::world::GameWorld;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the world and the command queue.
pub struct SimulationEngine {
    world: GameWorld,
    command_queue: VecDeque<SimCommand>,
}

impl SimulationEngine {
    /// Create an engine, rejecting rules that reference smudge types with
    /// no layer.
    pub fn new(config: SimConfig, rules: Arc<RuleSet>, map: Map) -> Result<Self, SimError> {
        let world = GameWorld::new(map, rules, config.seed);
        world.validate_smudge_layers()?;
        Ok(Self {
            world,
            command_queue: VecDeque::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and report what happened.
    ///
    /// Fails only on a fatal rule error raised by an impact.
    pub fn tick(&mut self) -> Result<FrameReport, SimError> {
        self.process_commands()?;
        self.run_systems();
        self.run_frame_end_tasks()?;

        let report = FrameReport {
            time: self.world.time,
            audio: std::mem::take(&mut self.world.audio_events),
            combat: std::mem::take(&mut self.world.combat_events),
        };
        self.world.time.advance();
        Ok(report)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.world.time
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) -> Result<(), ImpactError> {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command)?;
        }
        Ok(())
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) -> Result<(), ImpactError> {
        match command {
            SimCommand::Explode {
                attacker,
                weapon,
                pos,
            } => {
                let Some(attacker) = entity_of(attacker) else {
                    tracing::warn!("ignoring explosion with invalid attacker id {:?}", attacker);
                    return Ok(());
                };
                combat::trigger_explosion(&mut self.world, attacker, &weapon, pos)
            }
        }
    }

    /// Run all main-pass systems in order.
    fn run_systems(&mut self) {
        systems::lifetime::run(&mut self.world.actors, &mut self.world.frame_end);
    }

    /// Drain the frame-end queue. Tasks queued during the drain run in the
    /// same drain, except delayed warheads, which wait for the next frame.
    /// A failed impact stops the drain; unrun and waiting tasks stay queued.
    fn run_frame_end_tasks(&mut self) -> Result<(), ImpactError> {
        let mut waiting = Vec::new();
        let mut result = Ok(());
        while let Some(task) = self.world.frame_end.pop_front() {
            match task {
                FrameEndTask::SpawnExplosion {
                    pos,
                    sequence,
                    palette,
                } => {
                    self.world.actors.spawn((
                        pos,
                        Explosion { sequence, palette },
                        Lifetime {
                            remaining_ticks: EXPLOSION_LIFETIME_TICKS,
                        },
                    ));
                }
                FrameEndTask::RemoveActor(entity) => {
                    let _ = self.world.actors.despawn(entity);
                }
                FrameEndTask::DelayedWarhead(mut delayed) => {
                    if delayed.ticks_remaining > 0 {
                        delayed.ticks_remaining -= 1;
                        waiting.push(delayed);
                    } else if let Err(e) = self.fire_delayed(&delayed) {
                        result = Err(e);
                        break;
                    }
                }
            }
        }
        self.world
            .frame_end
            .extend(waiting.into_iter().map(FrameEndTask::DelayedWarhead));
        result
    }

    fn fire_delayed(&mut self, delayed: &DelayedWarhead) -> Result<(), ImpactError> {
        let Some(warhead) = delayed.weapon.warheads.get(delayed.warhead) else {
            return Ok(());
        };
        tracing::debug!(
            "delayed warhead {} fired at tick {}",
            delayed.warhead,
            self.world.time.tick
        );
        combat::resolve_impact(
            &mut self.world,
            delayed.pos,
            warhead,
            &delayed.weapon,
            delayed.fired_by,
            delayed.modifier,
        )
    }
}

/// ECS handle for a serialised actor id.
fn entity_of(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
