//! Error types for the simulation crate.

use salvo_core::rules::RulesError;

/// Errors that abort resolution of a weapon impact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImpactError {
    /// A warhead paints a smudge type with no registered layer.
    /// Indicates malformed rule data.
    #[error("unknown smudge type `{0}`")]
    UnknownSmudgeType(String),

    /// A weapon was requested by a name the rules do not define.
    #[error("unknown weapon `{0}`")]
    UnknownWeapon(String),
}

/// Inconsistent map data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("map row {row} is {len} cells wide, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("unknown terrain symbol `{symbol}` at ({x}, {y})")]
    UnknownTerrain { symbol: char, x: usize, y: usize },

    #[error("map declares {0} terrain types, at most 256 are supported")]
    TooManyTerrainTypes(usize),
}

/// Top-level simulation error.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Impact(#[from] ImpactError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("failed to parse scenario: {0}")]
    Scenario(#[from] serde_json::Error),
}
