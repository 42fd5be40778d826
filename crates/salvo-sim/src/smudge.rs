//! Smudge layers: persistent scorch marks and craters, one layer per type.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use salvo_core::constants::DEFAULT_SMUDGE_DEPTH;
use salvo_core::rules::SmudgeTypeInfo;
use salvo_core::types::CPos;

/// A smudge on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smudge {
    /// Index into the layer's variants.
    pub variant: usize,
    /// How many times the smudge has been deepened.
    pub depth: u8,
}

/// All smudges of a single type.
#[derive(Debug, Clone)]
pub struct SmudgeLayer {
    info: SmudgeTypeInfo,
    tiles: BTreeMap<CPos, Smudge>,
}

impl SmudgeLayer {
    pub fn new(info: SmudgeTypeInfo) -> Self {
        Self {
            info,
            tiles: BTreeMap::new(),
        }
    }

    pub fn info(&self) -> &SmudgeTypeInfo {
        &self.info
    }

    /// Paint a smudge. A fresh cell gets a random variant; an existing
    /// smudge is deepened until it reaches its variant's depth.
    pub fn add_smudge(&mut self, cell: CPos, rng: &mut ChaCha8Rng) {
        if let Some(smudge) = self.tiles.get_mut(&cell) {
            let max_depth = self
                .info
                .depths
                .get(smudge.variant)
                .copied()
                .unwrap_or(DEFAULT_SMUDGE_DEPTH);
            if smudge.depth + 1 < max_depth {
                smudge.depth += 1;
            }
            return;
        }

        let variant = match self.info.variants.len() {
            0 => 0,
            n => rng.gen_range(0..n),
        };
        self.tiles.insert(cell, Smudge { variant, depth: 0 });
    }

    pub fn get(&self, cell: CPos) -> Option<&Smudge> {
        self.tiles.get(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = CPos> + '_ {
        self.tiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
