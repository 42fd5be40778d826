//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 25;

/// World units along one cell edge.
pub const WORLD_UNITS_PER_CELL: i32 = 1024;

/// Largest radius (in cells) the circle enumeration table covers.
pub const MAX_TILES_IN_CIRCLE_RANGE: i32 = 50;

// --- Warhead defaults ---

/// Default falloff normalisation distance (world units).
pub const DEFAULT_SPREAD: i32 = 43;

/// Default hit radius of an actor with health (world units).
pub const DEFAULT_HIT_RADIUS: i32 = 426;

/// Target types a weapon may hit when the rules do not say otherwise.
pub const DEFAULT_VALID_TARGETS: [&str; 2] = ["Ground", "Water"];

// --- Effects ---

/// Ticks an explosion effect stays in the world before removal.
pub const EXPLOSION_LIFETIME_TICKS: u32 = 25;

/// Smudge depth used when a layer lists fewer depths than variants.
pub const DEFAULT_SMUDGE_DEPTH: u8 = 1;
