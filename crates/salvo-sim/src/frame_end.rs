//! Frame-end tasks: world mutations deferred until after the current
//! tick's main pass, so entities are never added or removed while
//! systems iterate over them.

use std::sync::Arc;

use hecs::Entity;

use salvo_core::rules::WeaponInfo;
use salvo_core::types::WPos;

/// A deferred world mutation, drained once per tick in FIFO order.
#[derive(Debug, Clone)]
pub enum FrameEndTask {
    /// Add an explosion visual to the world.
    SpawnExplosion {
        pos: WPos,
        sequence: String,
        palette: Option<String>,
    },
    /// Remove a dead actor or an expired effect.
    RemoveActor(Entity),
    /// A warhead counting down to its impact.
    DelayedWarhead(DelayedWarhead),
}

/// A warhead waiting out its delay. Re-enqueued every frame with one tick
/// less until the countdown hits zero, then resolved exactly once.
#[derive(Debug, Clone)]
pub struct DelayedWarhead {
    pub ticks_remaining: u32,
    pub pos: WPos,
    pub weapon: Arc<WeaponInfo>,
    /// Index into `weapon.warheads`.
    pub warhead: usize,
    pub fired_by: Entity,
    pub modifier: f32,
}
