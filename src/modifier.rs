//! Item-wide hidden modifiers discovered during decomposition.

use crate::stats::StatName;
use serde::{Deserialize, Serialize};

/// Item-wide adjustment to the effective rarity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RarityModifier {
    Decreased,
    #[default]
    Regular,
    Increased,
}

impl RarityModifier {
    /// Amount added to the base rarity.
    pub const fn offset(self) -> i32 {
        match self {
            RarityModifier::Decreased => -1,
            RarityModifier::Regular => 0,
            RarityModifier::Increased => 1,
        }
    }
}

/// Element of an item's native magic resistance.
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
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MagicResType {
    Fire,
    Frost,
    Light,
}

impl MagicResType {
    /// All types, in the order used for `level mod 3` defaults.
    pub const ALL: [MagicResType; 3] = [
        MagicResType::Fire,
        MagicResType::Frost,
        MagicResType::Light,
    ];

    /// The resistance statistic of this element.
    pub const fn stat(self) -> StatName {
        match self {
            MagicResType::Fire => StatName::FireRes,
            MagicResType::Frost => StatName::FrostRes,
            MagicResType::Light => StatName::LightRes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_modifier_offsets() {
        assert_eq!(RarityModifier::Decreased.offset(), -1);
        assert_eq!(RarityModifier::default().offset(), 0);
        assert_eq!(RarityModifier::Increased.offset(), 1);
    }

    #[test]
    fn test_magic_res_stat_round_trip() {
        for kind in MagicResType::ALL {
            assert_eq!(kind.stat().magic_res_type(), Some(kind));
        }
    }
}
