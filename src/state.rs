//! Decomposition state.
//!
//! A `DecompositionState` is created once per (item, statistic) pair and
//! moved through the counters. Every transition returns a new state.

use crate::count::BonusCount;
use crate::evaluator::formula_level;
use crate::item::{CharClasses, Item, ItemType, Rarity};
use crate::modifier::{MagicResType, RarityModifier};

/// Immutable snapshot of one statistic's decomposition.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{BonusCount, DecompositionState, Item, ItemType, Rarity};
///
/// let item = Item::new(ItemType::Ring, Rarity::Heroic, 30);
/// let state = DecompositionState::new(&item, 12.0);
///
/// let next = state.clone().consume(10.0).with_count(BonusCount::Integer(2));
/// assert_eq!(state.remaining_value(), 12.0);
/// assert_eq!(next.remaining_value(), 2.0);
/// assert_eq!(next.original_value(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionState {
    item_type: ItemType,
    base_rarity: Rarity,
    level: u32,
    upgrade: u32,
    classes: CharClasses,
    original_value: f64,
    remaining_value: f64,
    count: BonusCount,
    native: bool,
    rarity_dependent: bool,
    current_rarity_modifier: Option<RarityModifier>,
    detected_rarity_modifier: Option<RarityModifier>,
    native_magic_res_type: Option<MagicResType>,
}

impl DecompositionState {
    /// Fresh state for a statistic of `item` with the given value.
    pub fn new(item: &Item, value: f64) -> Self {
        Self {
            item_type: item.item_type,
            base_rarity: item.rarity,
            level: item.base_level(),
            upgrade: item.upgrade_offset(),
            classes: item.classes,
            original_value: value,
            remaining_value: value,
            count: BonusCount::default(),
            native: false,
            rarity_dependent: false,
            current_rarity_modifier: None,
            detected_rarity_modifier: None,
            native_magic_res_type: None,
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn base_rarity(&self) -> Rarity {
        self.base_rarity
    }

    /// Effective rarity: base rarity plus the current modifier.
    pub fn rarity(&self) -> i32 {
        self.base_rarity.value() + self.current_rarity_modifier.unwrap_or_default().offset()
    }

    /// Level the statistics were rolled at.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Upgrade offset in level equivalents.
    pub fn upgrade(&self) -> u32 {
        self.upgrade
    }

    /// Level with the upgrade offset applied in full.
    pub fn upgraded_level(&self) -> i32 {
        self.level_towards(1.0)
    }

    /// Level with the upgrade offset added in the direction of `sign`:
    /// up for positive, down for negative, not at all for zero.
    pub fn level_towards(&self, sign: f64) -> i32 {
        let level = formula_level(self.level);
        let upgrade = formula_level(self.upgrade);
        if sign > 0.0 {
            level.saturating_add(upgrade)
        } else if sign < 0.0 {
            level.saturating_sub(upgrade)
        } else {
            level
        }
    }

    pub fn classes(&self) -> CharClasses {
        self.classes
    }

    pub fn original_value(&self) -> f64 {
        self.original_value
    }

    pub fn remaining_value(&self) -> f64 {
        self.remaining_value
    }

    /// Whether the whole value has been accounted for.
    pub fn is_complete(&self) -> bool {
        self.remaining_value == 0.0
    }

    pub fn count(&self) -> BonusCount {
        self.count
    }

    pub fn native(&self) -> bool {
        self.native
    }

    pub fn rarity_dependent(&self) -> bool {
        self.rarity_dependent
    }

    pub fn current_rarity_modifier(&self) -> Option<RarityModifier> {
        self.current_rarity_modifier
    }

    pub fn detected_rarity_modifier(&self) -> Option<RarityModifier> {
        self.detected_rarity_modifier
    }

    pub fn native_magic_res_type(&self) -> Option<MagicResType> {
        self.native_magic_res_type
    }

    /// Subtract `amount` from the remaining value.
    #[must_use]
    pub fn consume(self, amount: f64) -> Self {
        Self {
            remaining_value: self.remaining_value - amount,
            ..self
        }
    }

    #[must_use]
    pub fn with_remaining_value(self, remaining_value: f64) -> Self {
        Self {
            remaining_value,
            ..self
        }
    }

    #[must_use]
    pub fn with_count(self, count: BonusCount) -> Self {
        Self { count, ..self }
    }

    #[must_use]
    pub fn with_native(self) -> Self {
        Self {
            native: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_rarity_dependent(self) -> Self {
        Self {
            rarity_dependent: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_current_rarity_modifier(self, modifier: RarityModifier) -> Self {
        Self {
            current_rarity_modifier: Some(modifier),
            ..self
        }
    }

    /// Record an item-wide modifier. Also makes it the current one.
    #[must_use]
    pub fn with_detected_rarity_modifier(self, modifier: RarityModifier) -> Self {
        Self {
            current_rarity_modifier: Some(modifier),
            detected_rarity_modifier: Some(modifier),
            ..self
        }
    }

    #[must_use]
    pub fn with_native_magic_res_type(self, kind: MagicResType) -> Self {
        Self {
            native_magic_res_type: Some(kind),
            ..self
        }
    }
}
