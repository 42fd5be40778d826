//! Weapon, warhead and world-layer rule definitions.
//!
//! Rules are immutable, parsed once from JSON and shared by reference.
//! Everything the impact resolver reads about a weapon comes from here.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::components::{Armor, Targetable};
use crate::constants::{DEFAULT_SPREAD, DEFAULT_VALID_TARGETS, MAX_TILES_IN_CIRCLE_RANGE};
use crate::enums::DamageModel;
use crate::types::WRange;

/// Malformed rule data.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("warhead size must list one or two radii, got {0}")]
    SizeArity(usize),

    #[error("warhead size radius {0} is negative")]
    NegativeRadius(i32),

    #[error("warhead size radius {0} exceeds the maximum of {MAX_TILES_IN_CIRCLE_RANGE}")]
    RadiusTooLarge(i32),

    #[error("inner radius {inner} exceeds outer radius {outer}")]
    InnerExceedsOuter { outer: i32, inner: i32 },

    #[error("weapon `{weapon}` warhead {index} has non-positive spread {spread}")]
    NonPositiveSpread {
        weapon: String,
        index: usize,
        spread: i32,
    },

    #[error("weapon `{0}` is defined more than once")]
    DuplicateWeapon(String),
}

/// Area of a warhead in cells: an outer radius and an optional inner
/// radius whose disk is left unsmudged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct AreaSize {
    pub outer: i32,
    pub inner: Option<i32>,
}

impl AreaSize {
    pub fn new(outer: i32, inner: Option<i32>) -> Result<Self, RulesError> {
        for radius in std::iter::once(outer).chain(inner) {
            if radius < 0 {
                return Err(RulesError::NegativeRadius(radius));
            }
            if radius > MAX_TILES_IN_CIRCLE_RANGE {
                return Err(RulesError::RadiusTooLarge(radius));
            }
        }
        if let Some(inner) = inner {
            if inner > outer {
                return Err(RulesError::InnerExceedsOuter { outer, inner });
            }
        }
        Ok(Self { outer, inner })
    }
}

impl TryFrom<Vec<i32>> for AreaSize {
    type Error = RulesError;

    fn try_from(radii: Vec<i32>) -> Result<Self, Self::Error> {
        match radii.as_slice() {
            [outer] => AreaSize::new(*outer, None),
            [outer, inner] => AreaSize::new(*outer, Some(*inner)),
            other => Err(RulesError::SizeArity(other.len())),
        }
    }
}

impl From<AreaSize> for Vec<i32> {
    fn from(size: AreaSize) -> Self {
        std::iter::once(size.outer).chain(size.inner).collect()
    }
}

/// One component of a weapon's effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarheadInfo {
    /// Base damage; negative values heal.
    pub damage: i32,
    /// Area in cells for smudges, resources and the per-cell models.
    pub size: AreaSize,
    /// Distance over which damage falls off by a factor of e.
    pub spread: WRange,
    /// Radius for the falloff model. Values below `spread` are derived
    /// from the damage instead.
    pub max_spread: WRange,
    pub damage_model: DamageModel,
    /// Damage multiplier per armor class.
    pub versus: BTreeMap<String, f32>,
    pub impact_sound: Option<String>,
    pub water_impact_sound: Option<String>,
    pub explosion: Option<String>,
    pub explosion_palette: Option<String>,
    pub water_explosion: Option<String>,
    pub water_explosion_palette: Option<String>,
    pub destroy_resources: bool,
    pub adds_resource_type: Option<String>,
    /// Smudge types this warhead paints, in priority order.
    pub smudge_type: Vec<String>,
    /// Ticks between detonation and impact.
    pub delay: i32,
}

impl Default for WarheadInfo {
    fn default() -> Self {
        Self {
            damage: 0,
            size: AreaSize::default(),
            spread: WRange(DEFAULT_SPREAD),
            max_spread: WRange(0),
            damage_model: DamageModel::Normal,
            versus: BTreeMap::new(),
            impact_sound: None,
            water_impact_sound: None,
            explosion: None,
            explosion_palette: None,
            water_explosion: None,
            water_explosion_palette: None,
            destroy_resources: false,
            adds_resource_type: None,
            smudge_type: Vec::new(),
            delay: 0,
        }
    }
}

impl WarheadInfo {
    /// Damage multiplier against an armor class. Unarmored targets and
    /// classes missing from the versus table take full damage.
    pub fn effectiveness_against(&self, armor: Option<&Armor>) -> f32 {
        armor
            .and_then(|a| self.versus.get(&a.armor_type))
            .copied()
            .unwrap_or(1.0)
    }

    /// Impact sound for the given surface, falling back to the land sound.
    pub fn impact_sound_for(&self, is_water: bool) -> Option<&str> {
        if is_water {
            if let Some(sound) = &self.water_impact_sound {
                return Some(sound.as_str());
            }
        }
        self.impact_sound.as_deref()
    }

    /// Explosion sequence and palette for the given surface.
    pub fn explosion_for(&self, is_water: bool) -> Option<(&str, Option<&str>)> {
        if is_water {
            let sequence = self.water_explosion.as_deref()?;
            Some((sequence, self.water_explosion_palette.as_deref()))
        } else {
            let sequence = self.explosion.as_deref()?;
            Some((sequence, self.explosion_palette.as_deref()))
        }
    }

    /// Resource type to splatter, treating an empty name as none.
    pub fn resource_to_add(&self) -> Option<&str> {
        self.adds_resource_type.as_deref().filter(|name| !name.is_empty())
    }
}

/// A weapon: report sounds, target filter and an ordered warhead list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponInfo {
    pub report: Vec<String>,
    pub valid_targets: Vec<String>,
    pub invalid_targets: Vec<String>,
    pub warheads: Vec<WarheadInfo>,
}

impl Default for WeaponInfo {
    fn default() -> Self {
        Self {
            report: Vec::new(),
            valid_targets: DEFAULT_VALID_TARGETS.iter().map(|t| t.to_string()).collect(),
            invalid_targets: Vec::new(),
            warheads: Vec::new(),
        }
    }
}

impl WeaponInfo {
    /// Whether this weapon can affect a target at all
    /// (e.g. ground splash never hits aircraft).
    pub fn is_valid_against(&self, targetable: Option<&Targetable>, armor: Option<&Armor>) -> bool {
        let Some(targetable) = targetable else {
            return false;
        };
        let has = |list: &[String]| targetable.target_types.iter().any(|t| list.contains(t));
        if !has(&self.valid_targets) || has(&self.invalid_targets) {
            return false;
        }
        self.warheads
            .iter()
            .any(|w| w.effectiveness_against(armor) > 0.0)
    }
}

/// A resource that warheads can splatter onto the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeInfo {
    pub name: String,
    pub max_density: i32,
    /// Terrain type names the resource may grow on.
    pub allowed_terrain: Vec<String>,
}

/// A smudge layer definition: sprite variants and how deep each may get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmudgeTypeInfo {
    pub name: String,
    pub variants: Vec<String>,
    #[serde(default)]
    pub depths: Vec<u8>,
}

/// Static per-terrain properties used by the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTypeInfo {
    pub name: String,
    /// Character used for this terrain in map rows.
    pub symbol: char,
    #[serde(default)]
    pub is_water: bool,
    /// Smudge types this terrain can display.
    #[serde(default)]
    pub accepts_smudge_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RuleSetData {
    #[serde(default)]
    weapons: BTreeMap<String, WeaponInfo>,
    #[serde(default)]
    resource_types: Vec<ResourceTypeInfo>,
    #[serde(default)]
    smudge_types: Vec<SmudgeTypeInfo>,
}

/// The complete, validated rule set of a game.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RuleSetData")]
pub struct RuleSet {
    /// Weapons keyed by lower-cased name.
    weapons: BTreeMap<String, Arc<WeaponInfo>>,
    pub resource_types: Vec<ResourceTypeInfo>,
    pub smudge_types: Vec<SmudgeTypeInfo>,
}

impl TryFrom<RuleSetData> for RuleSet {
    type Error = RulesError;

    fn try_from(data: RuleSetData) -> Result<Self, Self::Error> {
        let mut rules = RuleSet {
            weapons: BTreeMap::new(),
            resource_types: data.resource_types,
            smudge_types: data.smudge_types,
        };
        for (name, weapon) in data.weapons {
            rules.insert_weapon(&name, weapon)?;
        }
        Ok(rules)
    }
}

impl RuleSet {
    /// Parse and validate a rule set from JSON.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let data: RuleSetData = serde_json::from_str(json)?;
        RuleSet::try_from(data)
    }

    /// Register a weapon under a case-insensitive name.
    pub fn insert_weapon(&mut self, name: &str, weapon: WeaponInfo) -> Result<(), RulesError> {
        for (index, warhead) in weapon.warheads.iter().enumerate() {
            if warhead.spread.range() <= 0 {
                return Err(RulesError::NonPositiveSpread {
                    weapon: name.to_string(),
                    index,
                    spread: warhead.spread.range(),
                });
            }
        }
        let key = name.to_lowercase();
        if self.weapons.contains_key(&key) {
            return Err(RulesError::DuplicateWeapon(name.to_string()));
        }
        self.weapons.insert(key, Arc::new(weapon));
        Ok(())
    }

    /// Look up a weapon by case-insensitive name.
    pub fn weapon(&self, name: &str) -> Option<&Arc<WeaponInfo>> {
        self.weapons.get(&name.to_lowercase())
    }

    pub fn weapons(&self) -> impl Iterator<Item = (&str, &Arc<WeaponInfo>)> {
        self.weapons.iter().map(|(name, weapon)| (name.as_str(), weapon))
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeInfo> {
        self.resource_types.iter().find(|r| r.name == name)
    }
}
