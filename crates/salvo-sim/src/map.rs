//! Map: a rectangular grid of terrain cells with world/cell conversion
//! and circle enumeration.

use serde::{Deserialize, Serialize};

use salvo_core::constants::{MAX_TILES_IN_CIRCLE_RANGE, WORLD_UNITS_PER_CELL};
use salvo_core::rules::TerrainTypeInfo;
use salvo_core::types::{CPos, WPos};

use crate::error::MapError;

/// Serialisable map description. Each row is a string of terrain symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub terrain_types: Vec<TerrainTypeInfo>,
    pub rows: Vec<String>,
}

/// The loaded map.
#[derive(Debug, Clone)]
pub struct Map {
    width: i32,
    height: i32,
    terrain_types: Vec<TerrainTypeInfo>,
    /// Terrain index per cell, row-major.
    tiles: Vec<u8>,
    /// Cell offsets grouped by ring `ceil(distance)`, each ring row-major.
    tiles_by_distance: Vec<Vec<(i32, i32)>>,
}

impl Map {
    /// Build a map from its serialisable description.
    pub fn from_data(data: MapData) -> Result<Self, MapError> {
        if data.terrain_types.len() > 256 {
            return Err(MapError::TooManyTerrainTypes(data.terrain_types.len()));
        }
        let expected = data.rows.first().ok_or(MapError::Empty)?.chars().count();
        if expected == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * data.rows.len());
        for (y, row) in data.rows.iter().enumerate() {
            let len = row.chars().count();
            if len != expected {
                return Err(MapError::RaggedRow { row: y, len, expected });
            }
            for (x, symbol) in row.chars().enumerate() {
                let index = data
                    .terrain_types
                    .iter()
                    .position(|t| t.symbol == symbol)
                    .ok_or(MapError::UnknownTerrain { symbol, x, y })?;
                tiles.push(index as u8);
            }
        }

        Ok(Self {
            width: expected as i32,
            height: data.rows.len() as i32,
            terrain_types: data.terrain_types,
            tiles,
            tiles_by_distance: build_tiles_by_distance(MAX_TILES_IN_CIRCLE_RANGE),
        })
    }

    /// Convenience constructor from row literals.
    pub fn from_rows(terrain_types: Vec<TerrainTypeInfo>, rows: &[&str]) -> Result<Self, MapError> {
        Self::from_data(MapData {
            terrain_types,
            rows: rows.iter().map(|r| r.to_string()).collect(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn terrain_types(&self) -> &[TerrainTypeInfo] {
        &self.terrain_types
    }

    /// Cell whose square contains the position (elevation ignored).
    pub fn cell_containing(&self, pos: WPos) -> CPos {
        CPos::new(
            pos.x.div_euclid(WORLD_UNITS_PER_CELL),
            pos.y.div_euclid(WORLD_UNITS_PER_CELL),
        )
    }

    pub fn contains(&self, cell: CPos) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Terrain of an on-map cell.
    pub fn terrain_info(&self, cell: CPos) -> Option<&TerrainTypeInfo> {
        if !self.contains(cell) {
            return None;
        }
        let index = self.tiles[(cell.y * self.width + cell.x) as usize];
        self.terrain_types.get(index as usize)
    }

    /// All on-map cells within `range` cells of `center`, nearest rings first.
    /// Ranges beyond `MAX_TILES_IN_CIRCLE_RANGE` are clamped to it.
    pub fn find_tiles_in_circle(&self, center: CPos, range: i32) -> impl Iterator<Item = CPos> + '_ {
        let rings = range.clamp(-1, MAX_TILES_IN_CIRCLE_RANGE);
        self.tiles_by_distance
            .iter()
            .take((rings + 1) as usize)
            .flatten()
            .map(move |&(dx, dy)| center.offset(dx, dy))
            .filter(move |&cell| self.contains(cell))
    }
}

fn build_tiles_by_distance(max: i32) -> Vec<Vec<(i32, i32)>> {
    let mut rings = vec![Vec::new(); (max + 1) as usize];
    let max_sq = (max as i64) * (max as i64);
    for dy in -max..=max {
        for dx in -max..=max {
            let d2 = (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64);
            if d2 > max_sq {
                continue;
            }
            let mut ring = (d2 as u64).isqrt() as i64;
            if ring * ring < d2 {
                ring += 1;
            }
            rings[ring as usize].push((dx, dy));
        }
    }
    rings
}
