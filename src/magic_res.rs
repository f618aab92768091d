//! Native magic resistance disambiguation.
//!
//! Armour pieces carry one native magic resistance, but which element it
//! belongs to is not shown. The element is found by checking which
//! resistance statistic splits into the native value plus whole regular
//! bonus steps.

use crate::evaluator::{formula_level, round_half_away};
use crate::item::Item;
use crate::modifier::MagicResType;
use crate::tables::{MAGIC_RES_NATIVE, MAGIC_RES_STEP, NATIVE_MAGIC_RES_ITEM_TYPES};
use tracing::trace;

/// Element the game assigns by default to an item of the given level.
pub fn default_magic_res_type(level: u32) -> MagicResType {
    MagicResType::ALL[(level % 3) as usize]
}

/// Rounded native magic resistance of `item`, if its type has one.
pub fn native_magic_res_value(item: &Item) -> Option<f64> {
    if !NATIVE_MAGIC_RES_ITEM_TYPES.contains(&item.item_type) {
        return None;
    }
    let x = formula_level(item.base_level().saturating_add(item.upgrade_offset()));
    Some(round_half_away(MAGIC_RES_NATIVE.evaluate(x, item.rarity.value())))
}

/// Detect which element carries the item's native magic resistance.
///
/// Among the resistance statistics whose value minus the native value is a
/// whole number of regular steps, the one closest to the native value wins;
/// ties go to the level default. Returns `None` for item types without a
/// native resistance or when no statistic qualifies.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::magic_res::detect_magic_res_type;
/// use bonus_decomposer::{Item, ItemType, MagicResType, Rarity, StatName, Stats};
///
/// // Level 20: native 7, regular steps of 5.
/// let item = Item::new(ItemType::Helmet, Rarity::Common, 20).with_stats(
///     Stats::new()
///         .with(StatName::FireRes, 10.0)
///         .with(StatName::FrostRes, 12.0),
/// );
/// assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Frost));
/// ```
pub fn detect_magic_res_type(item: &Item) -> Option<MagicResType> {
    let native = native_magic_res_value(item)?;
    let default = default_magic_res_type(item.base_level());

    let mut best: Option<(MagicResType, f64)> = None;
    for kind in MagicResType::ALL {
        let Some(value) = item.stats.get(kind.stat()) else {
            continue;
        };
        if !is_whole_steps(value - native) {
            trace!(%kind, value, native, "magic resistance candidate rejected");
            continue;
        }
        let distance = (value - native).abs();
        let better = match best {
            None => true,
            Some((_, best_distance)) => {
                distance < best_distance || (distance == best_distance && kind == default)
            }
        };
        if better {
            best = Some((kind, distance));
        }
    }

    best.map(|(kind, _)| kind)
}

fn is_whole_steps(difference: f64) -> bool {
    let steps = difference / MAGIC_RES_STEP;
    (steps - steps.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemType, Rarity};
    use crate::stats::{StatName, Stats};

    fn helmet(level: u32, stats: Stats) -> Item {
        Item::new(ItemType::Helmet, Rarity::Common, level).with_stats(stats)
    }

    #[test]
    fn test_default_follows_level() {
        assert_eq!(default_magic_res_type(21), MagicResType::Fire);
        assert_eq!(default_magic_res_type(22), MagicResType::Frost);
        assert_eq!(default_magic_res_type(23), MagicResType::Light);
    }

    #[test]
    fn test_native_value() {
        // 0.2·20 + 3
        let item = helmet(20, Stats::new());
        assert_eq!(native_magic_res_value(&item), Some(7.0));
        assert_eq!(
            native_magic_res_value(&Item::new(ItemType::Ring, Rarity::Common, 20)),
            None
        );
    }

    #[test]
    fn test_only_frost_divides_against_fire_default() {
        // Level 21 defaults to fire. Native is round(7.2) = 7.
        let item = helmet(
            21,
            Stats::new()
                .with(StatName::FireRes, 15.0)
                .with(StatName::FrostRes, 17.0)
                .with(StatName::LightRes, 5.0),
        );
        assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Frost));
    }

    #[test]
    fn test_closest_candidate_wins() {
        // Native 7: fire 17 and light 7 both divide, light is closer.
        let item = helmet(
            20,
            Stats::new()
                .with(StatName::FireRes, 17.0)
                .with(StatName::LightRes, 7.0),
        );
        assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Light));
    }

    #[test]
    fn test_tie_goes_to_default() {
        // Level 22 defaults to frost. Native round(7.4) = 7.
        let item = helmet(
            22,
            Stats::new()
                .with(StatName::FireRes, 12.0)
                .with(StatName::FrostRes, 12.0)
                .with(StatName::LightRes, 12.0),
        );
        assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Frost));

        // Without the default among the tied candidates the first one wins.
        let item = helmet(
            22,
            Stats::new()
                .with(StatName::LightRes, 12.0)
                .with(StatName::FireRes, 12.0),
        );
        assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Fire));
    }

    #[test]
    fn test_negative_difference_divides() {
        // 2 = 7 - 5: a harmful bonus on top of the native value.
        let item = helmet(20, Stats::new().with(StatName::LightRes, 2.0));
        assert_eq!(detect_magic_res_type(&item), Some(MagicResType::Light));
    }

    #[test]
    fn test_no_candidate() {
        let item = helmet(20, Stats::new().with(StatName::FireRes, 10.0));
        assert_eq!(detect_magic_res_type(&item), None);

        let ring = Item::new(ItemType::Ring, Rarity::Common, 20)
            .with_stats(Stats::new().with(StatName::FireRes, 7.0));
        assert_eq!(detect_magic_res_type(&ring), None);
    }
}
