//! Resource layer: per-cell resource type and density.

use std::collections::BTreeMap;

use salvo_core::rules::ResourceTypeInfo;
use salvo_core::types::CPos;

use crate::map::Map;

/// Resource content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCell {
    pub resource_type: String,
    pub density: i32,
}

/// Mutable store of resources on the map.
#[derive(Debug, Clone, Default)]
pub struct ResourceLayer {
    cells: BTreeMap<CPos, ResourceCell>,
}

impl ResourceLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove whatever resource the cell holds.
    pub fn destroy(&mut self, cell: CPos) {
        self.cells.remove(&cell);
    }

    pub fn get(&self, cell: CPos) -> Option<&ResourceCell> {
        self.cells.get(&cell)
    }

    /// Current density, 0 when the cell is empty.
    pub fn density_at(&self, cell: CPos) -> i32 {
        self.cells.get(&cell).map_or(0, |c| c.density)
    }

    /// Whether `resource` may be placed on the cell: on the map, on allowed
    /// terrain, and not mixed with another resource type.
    pub fn can_spawn_resource_at(&self, map: &Map, resource: &ResourceTypeInfo, cell: CPos) -> bool {
        let Some(terrain) = map.terrain_info(cell) else {
            return false;
        };
        if !resource.allowed_terrain.contains(&terrain.name) {
            return false;
        }
        self.cells
            .get(&cell)
            .is_none_or(|existing| existing.resource_type == resource.name)
    }

    /// Add `amount` of `resource`, capped at its max density.
    /// Cells holding a different resource are left alone.
    pub fn add_resource(&mut self, resource: &ResourceTypeInfo, cell: CPos, amount: i32) {
        let entry = self.cells.entry(cell).or_insert_with(|| ResourceCell {
            resource_type: resource.name.clone(),
            density: 0,
        });
        if entry.resource_type != resource.name {
            return;
        }
        entry.density = entry.density.saturating_add(amount).min(resource.max_density);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
