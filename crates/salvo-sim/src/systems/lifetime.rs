//! Lifetime system: counts down effect entities and schedules their removal.

use std::collections::VecDeque;

use hecs::World;

use salvo_core::components::Lifetime;

use crate::frame_end::FrameEndTask;

/// Decrement every `Lifetime`; expired entities are removed at frame end.
pub fn run(world: &mut World, frame_end: &mut VecDeque<FrameEndTask>) {
    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_ticks = lifetime.remaining_ticks.saturating_sub(1);
        if lifetime.remaining_ticks == 0 {
            frame_end.push_back(FrameEndTask::RemoveActor(entity));
        }
    }
}
