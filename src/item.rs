//! Item description consumed by the decomposer.
//!
//! Items arrive already parsed. The decomposer only reads them.

use crate::stats::Stats;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Equipment category.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ItemType {
    OneHanded,
    HandAndAHalf,
    TwoHanded,
    Ranged,
    Auxiliary,
    Wand,
    Orb,
    Armor,
    Helmet,
    Boots,
    Gloves,
    Ring,
    Necklace,
    Shield,
    Quiver,
}

/// Base item rarity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Unique,
    Heroic,
    Upgraded,
    Legendary,
    Artefact,
}

impl Rarity {
    /// Numeric rarity used by the formulas.
    pub const fn value(self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Unique => 1,
            Rarity::Heroic => 2,
            Rarity::Upgraded => 3,
            Rarity::Legendary => 4,
            Rarity::Artefact => 5,
        }
    }
}

bitflags! {
    /// Character classes allowed to wear an item.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CharClasses: u8 {
        const WARRIOR      = 1 << 0;
        const PALADIN      = 1 << 1;
        const BLADE_DANCER = 1 << 2;
        const MAGE         = 1 << 3;
        const HUNTER       = 1 << 4;
        const TRACKER      = 1 << 5;
    }
}

/// Level-equivalent offset per upgrade (enhancement) level.
///
/// Upgrade levels past the end of the table use the last entry.
pub const UPGRADE_LEVEL_OFFSETS: [u32; 6] = [0, 1, 2, 4, 6, 9];

/// Level-equivalent offset for an upgrade level.
pub fn upgrade_offset(upgrade_level: u32) -> u32 {
    let index = (upgrade_level as usize).min(UPGRADE_LEVEL_OFFSETS.len() - 1);
    UPGRADE_LEVEL_OFFSETS[index]
}

/// A parsed item.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{Item, ItemType, StatName};
///
/// let item = Item::from_json(r#"{
///     "type": "oneHanded",
///     "rarity": "common",
///     "level": 20,
///     "stats": { "physDmgMin": 120, "physDmgMax": 180 }
/// }"#).unwrap();
///
/// assert_eq!(item.item_type, ItemType::OneHanded);
/// assert_eq!(item.stats.get(StatName::PhysDmgMin), Some(120.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub classes: CharClasses,
    /// Required level; `None` for items without a level requirement.
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub upgrade_level: u32,
    /// How far the level requirement was lowered after the item was rolled.
    #[serde(default)]
    pub level_reduction: u32,
    #[serde(default)]
    pub stats: Stats,
}

impl Item {
    /// Create an item without statistics.
    pub fn new(item_type: ItemType, rarity: Rarity, level: u32) -> Self {
        Self {
            item_type,
            rarity,
            classes: CharClasses::empty(),
            level: Some(level),
            upgrade_level: 0,
            level_reduction: 0,
            stats: Stats::new(),
        }
    }

    /// Parse an item from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Level the item's statistics were rolled at.
    ///
    /// Items without a level count as level 1. Saturates at `u32::MAX`.
    pub fn base_level(&self) -> u32 {
        self.level.unwrap_or(1).saturating_add(self.level_reduction)
    }

    /// Level-equivalent offset from the item's upgrade level.
    pub fn upgrade_offset(&self) -> u32 {
        upgrade_offset(self.upgrade_level)
    }

    pub fn with_classes(mut self, classes: CharClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_upgrade_level(mut self, upgrade_level: u32) -> Self {
        self.upgrade_level = upgrade_level;
        self
    }

    pub fn with_level_reduction(mut self, level_reduction: u32) -> Self {
        self.level_reduction = level_reduction;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }
}
