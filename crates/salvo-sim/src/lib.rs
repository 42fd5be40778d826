//! Simulation engine for SALVO.
//!
//! Owns the hecs ECS world, the map and its resource/smudge layers, and
//! resolves weapon detonations at a fixed tick rate. Completely headless,
//! enabling deterministic testing and replay.

pub mod combat;
pub mod engine;
pub mod error;
pub mod frame_end;
pub mod map;
pub mod resources;
pub mod scenario;
pub mod smudge;
pub mod systems;
pub mod world;

pub use engine::{SimConfig, SimulationEngine};
pub use error::{ImpactError, MapError, SimError};
pub use map::Map;
pub use salvo_core as core;
pub use world::GameWorld;
