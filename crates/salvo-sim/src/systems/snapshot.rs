//! Snapshot builder: summarises actor health for observers.

use hecs::World;

use salvo_core::components::{ActorInfo, Health};
use salvo_core::state::ActorView;
use salvo_core::types::WPos;

use crate::world::actor_id;

/// Views of every live actor, in entity order.
pub fn actor_views(world: &World) -> Vec<ActorView> {
    let mut views: Vec<(hecs::Entity, ActorView)> = world
        .query::<(&ActorInfo, &WPos, Option<&Health>)>()
        .iter()
        .map(|(entity, (info, pos, health))| {
            let view = ActorView {
                id: actor_id(entity),
                name: info.name.clone(),
                pos: *pos,
                hp: health.map(|h| h.hp),
                state: health.map(|h| h.damage_state()),
            };
            (entity, view)
        })
        .collect();
    views.sort_by_key(|(entity, _)| *entity);
    views.into_iter().map(|(_, view)| view).collect()
}
