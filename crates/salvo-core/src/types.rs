//! Fundamental fixed-point geometric and simulation types.
//!
//! World space is measured in integer world units, `WORLD_UNITS_PER_CELL`
//! per cell edge. Everything is integer so that independent clients agree
//! bit-for-bit.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::{TICK_RATE, WORLD_UNITS_PER_CELL};

/// 3D world position in world units.
/// x = East, y = South (map rows), z = elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Offset between two world positions. Wider than `WPos` so the offset
/// between any two positions is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WVec {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// A distance in world units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WRange(pub i32);

/// Integer grid cell coordinate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CPos {
    pub x: i32,
    pub y: i32,
}

/// Stable identifier for an actor, independent of the ECS handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl WPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Centre of a cell at ground level.
    pub fn center_of(cell: CPos) -> Self {
        let half = WORLD_UNITS_PER_CELL / 2;
        Self {
            x: cell.x * WORLD_UNITS_PER_CELL + half,
            y: cell.y * WORLD_UNITS_PER_CELL + half,
            z: 0,
        }
    }
}

impl WVec {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(&self) -> u128 {
        let (x, y, z) = (self.x as i128, self.y as i128, self.z as i128);
        (x * x + y * y + z * z) as u128
    }

    pub fn horizontal_length_squared(&self) -> u128 {
        let (x, y) = (self.x as i128, self.y as i128);
        (x * x + y * y) as u128
    }

    /// Length in whole world units, rounded down and saturated to `i32`.
    pub fn length(&self) -> i32 {
        i32::try_from(self.length_squared().isqrt()).unwrap_or(i32::MAX)
    }
}

impl WRange {
    pub const fn new(range: i32) -> Self {
        Self(range)
    }

    /// A whole number of cells expressed in world units.
    pub const fn from_cells(cells: i32) -> Self {
        Self(cells * WORLD_UNITS_PER_CELL)
    }

    pub const fn range(self) -> i32 {
        self.0
    }
}

impl CPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Sub for WPos {
    type Output = WVec;

    fn sub(self, rhs: WPos) -> WVec {
        WVec::new(
            self.x as i64 - rhs.x as i64,
            self.y as i64 - rhs.y as i64,
            self.z as i64 - rhs.z as i64,
        )
    }
}

impl Add<WVec> for WPos {
    type Output = WPos;

    /// Saturates at the edges of the `i32` world.
    fn add(self, rhs: WVec) -> WPos {
        let clamp = |a: i32, b: i64| {
            (a as i64)
                .saturating_add(b)
                .clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        WPos::new(clamp(self.x, rhs.x), clamp(self.y, rhs.y), clamp(self.z, rhs.z))
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
