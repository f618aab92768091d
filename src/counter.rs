//! Bonus counters.
//!
//! A `Counter` describes how a statistic's value is assembled. Counters
//! are plain data; `Counter::apply` interprets them against a state,
//! consuming part of the remaining value and recording what it found.

use crate::count::BonusCount;
use crate::error::DecompositionError;
use crate::evaluator::{round_half_away, Evaluator};
use crate::item::ItemType;
use crate::linear::Linear;
use crate::modifier::MagicResType;
use crate::rarity;
use crate::state::DecompositionState;
use crate::stats::StatName;
use std::fmt;

/// Picks the next counter from the current state.
#[derive(Clone, Copy)]
pub struct Selector {
    name: &'static str,
    select: fn(&DecompositionState) -> Counter,
}

impl Selector {
    pub const fn new(name: &'static str, select: fn(&DecompositionState) -> Counter) -> Self {
        Self { name, select }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn select(&self, state: &DecompositionState) -> Counter {
        (self.select)(state)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.name).finish()
    }
}

/// Composable description of a statistic's value.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::counter::Counter;
/// use bonus_decomposer::evaluator::Evaluator;
/// use bonus_decomposer::linear::Linear;
/// use bonus_decomposer::{BonusCount, DecompositionState, Item, ItemType, Rarity};
///
/// // 5x + 20 native on one-handed weapons, then 0.3x + 1 per bonus
/// let counter = Counter::pipe(vec![
///     Counter::native(&[ItemType::OneHanded], Evaluator::level(&[5.0, 20.0])),
///     Counter::linear(Linear::new(Evaluator::level(&[0.3, 1.0]))),
/// ]);
///
/// let item = Item::new(ItemType::OneHanded, Rarity::Common, 20);
/// let state = counter.apply(DecompositionState::new(&item, 134.0)).unwrap();
///
/// assert!(state.native());
/// assert!(state.is_complete());
/// assert_eq!(state.count(), BonusCount::Integer(2));
/// ```
#[derive(Debug, Clone)]
pub enum Counter {
    /// Native bonus present on the listed item types.
    Native {
        item_types: &'static [ItemType],
        evaluator: Evaluator,
        round_result: bool,
    },
    /// Native magic resistance, present only for the detected element.
    NativeMagicRes {
        kind: MagicResType,
        evaluator: Evaluator,
    },
    /// Regular bonuses of per-level magnitude.
    Linear(Linear),
    /// Fixed count; the value itself carries no information.
    Constant(i64),
    /// Count looked up by the remaining value.
    OneOf(Vec<(f64, i64)>),
    /// Left-to-right composition.
    Pipe(Vec<Counter>),
    /// Counter chosen from the current state.
    FlatMap(Selector),
    /// Counter whose formulas depend on the hidden rarity modifier.
    RarityDependent(Box<Counter>),
    /// Placeholder that always fails.
    NotImplemented(StatName),
}

impl Counter {
    pub fn native(item_types: &'static [ItemType], evaluator: Evaluator) -> Self {
        Counter::Native {
            item_types,
            evaluator,
            round_result: false,
        }
    }

    /// Native bonus rounded on its own before the regular bonuses are added.
    pub fn native_rounded(item_types: &'static [ItemType], evaluator: Evaluator) -> Self {
        Counter::Native {
            item_types,
            evaluator,
            round_result: true,
        }
    }

    pub fn native_magic_res(kind: MagicResType, evaluator: Evaluator) -> Self {
        Counter::NativeMagicRes { kind, evaluator }
    }

    pub fn linear(linear: Linear) -> Self {
        Counter::Linear(linear)
    }

    pub fn constant(count: i64) -> Self {
        Counter::Constant(count)
    }

    pub fn one_of(variants: &[(f64, i64)]) -> Self {
        Counter::OneOf(variants.to_vec())
    }

    pub fn pipe(counters: Vec<Counter>) -> Self {
        Counter::Pipe(counters)
    }

    pub fn flat_map(name: &'static str, select: fn(&DecompositionState) -> Counter) -> Self {
        Counter::FlatMap(Selector::new(name, select))
    }

    pub fn rarity_dependent(counter: Counter) -> Self {
        Counter::RarityDependent(Box::new(counter))
    }

    pub fn not_implemented(stat: StatName) -> Self {
        Counter::NotImplemented(stat)
    }

    /// Run the counter.
    pub fn apply(
        &self,
        state: DecompositionState,
    ) -> Result<DecompositionState, DecompositionError> {
        match self {
            Counter::Native {
                item_types,
                evaluator,
                round_result,
            } => {
                if !item_types.contains(&state.item_type()) {
                    return Ok(state);
                }
                let mut value = evaluator.evaluate(state.upgraded_level(), state.rarity());
                if *round_result {
                    value = round_half_away(value);
                }
                Ok(state.consume(value).with_native())
            }
            Counter::NativeMagicRes { kind, evaluator } => {
                if state.native_magic_res_type() != Some(*kind) {
                    return Ok(state);
                }
                let value =
                    round_half_away(evaluator.evaluate(state.upgraded_level(), state.rarity()));
                Ok(state.consume(value).with_native())
            }
            Counter::Linear(linear) => linear.apply(state),
            Counter::Constant(count) => Ok(state
                .with_remaining_value(0.0)
                .with_count(BonusCount::Integer(*count))),
            Counter::OneOf(variants) => {
                let remaining = state.remaining_value();
                let (_, count) = variants
                    .iter()
                    .find(|(key, _)| *key == remaining)
                    .ok_or(DecompositionError::MissingVariant(remaining))?;
                Ok(state
                    .with_remaining_value(0.0)
                    .with_count(BonusCount::Integer(*count)))
            }
            Counter::Pipe(counters) => counters
                .iter()
                .try_fold(state, |state, counter| counter.apply(state)),
            Counter::FlatMap(selector) => selector.select(&state).apply(state),
            Counter::RarityDependent(counter) => rarity::rarity_dependent(counter, state),
            Counter::NotImplemented(stat) => Err(DecompositionError::NotImplemented(*stat)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CharClasses, Item, Rarity};

    fn state(item_type: ItemType, level: u32, value: f64) -> DecompositionState {
        DecompositionState::new(&Item::new(item_type, Rarity::Common, level), value)
    }

    #[test]
    fn test_native_skips_other_item_types() {
        let counter = Counter::native(&[ItemType::Shield], Evaluator::level(&[1.0]));
        let input = state(ItemType::Boots, 10, 30.0);
        let output = counter.apply(input.clone()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_native_consumes_with_upgrade() {
        let counter = Counter::native(&[ItemType::Shield], Evaluator::level(&[1.5, 0.0]));
        let item = Item::new(ItemType::Shield, Rarity::Common, 10).with_upgrade_level(2);
        let output = counter
            .apply(DecompositionState::new(&item, 30.0))
            .unwrap();
        // x = 10 + 2
        assert_eq!(output.remaining_value(), 12.0);
        assert!(output.native());
    }

    #[test]
    fn test_native_rounded() {
        let counter = Counter::native_rounded(&[ItemType::Ring], Evaluator::level(&[0.25, 0.0]));
        let output = counter.apply(state(ItemType::Ring, 10, 5.0)).unwrap();
        // 2.5 rounds to 3
        assert_eq!(output.remaining_value(), 2.0);
    }

    #[test]
    fn test_native_magic_res_requires_matching_type() {
        let counter = Counter::native_magic_res(MagicResType::Frost, Evaluator::level(&[7.0]));
        let input = state(ItemType::Helmet, 10, 12.0);

        let untouched = counter.apply(input.clone()).unwrap();
        assert_eq!(untouched.remaining_value(), 12.0);
        assert!(!untouched.native());

        let fire = counter
            .apply(input.clone().with_native_magic_res_type(MagicResType::Fire))
            .unwrap();
        assert_eq!(fire.remaining_value(), 12.0);

        let frost = counter
            .apply(input.with_native_magic_res_type(MagicResType::Frost))
            .unwrap();
        assert_eq!(frost.remaining_value(), 5.0);
        assert!(frost.native());
    }

    #[test]
    fn test_constant() {
        let output = Counter::constant(1)
            .apply(state(ItemType::Ring, 10, 37.0))
            .unwrap();
        assert!(output.is_complete());
        assert_eq!(output.count(), BonusCount::Integer(1));
    }

    #[test]
    fn test_one_of_every_key() {
        let variants = [(40.0, 0), (50.0, 1), (60.0, 2)];
        let counter = Counter::one_of(&variants);
        for (value, count) in variants {
            let output = counter.apply(state(ItemType::Wand, 10, value)).unwrap();
            assert!(output.is_complete());
            assert_eq!(output.count(), BonusCount::Integer(count));
        }
    }

    #[test]
    fn test_one_of_missing_variant() {
        let counter = Counter::one_of(&[(40.0, 0), (50.0, 1), (60.0, 2)]);
        let err = counter.apply(state(ItemType::Wand, 10, 45.0)).unwrap_err();
        assert_eq!(err, DecompositionError::MissingVariant(45.0));
    }

    #[test]
    fn test_pipe_threads_state() {
        let counter = Counter::pipe(vec![
            Counter::native(&[ItemType::Boots], Evaluator::level(&[2.0, 0.0])),
            Counter::native(&[ItemType::Gloves], Evaluator::level(&[100.0])),
            Counter::linear(Linear::new(Evaluator::level(&[1.0, 0.0]))),
        ]);
        let output = counter.apply(state(ItemType::Boots, 5, 25.0)).unwrap();
        assert!(output.native());
        assert!(output.is_complete());
        assert_eq!(output.count(), BonusCount::Integer(3));
    }

    #[test]
    fn test_pipe_stops_at_first_error() {
        let counter = Counter::pipe(vec![
            Counter::one_of(&[(1.0, 1)]),
            Counter::not_implemented(StatName::Hp),
        ]);
        let err = counter.apply(state(ItemType::Ring, 5, 2.0)).unwrap_err();
        assert_eq!(err, DecompositionError::MissingVariant(2.0));
    }

    fn by_class(state: &DecompositionState) -> Counter {
        let slope = if state.classes().contains(CharClasses::MAGE) {
            Evaluator::level(&[1.0, 0.0])
        } else {
            Evaluator::level(&[2.0, 0.0])
        };
        Counter::linear(Linear::new(slope))
    }

    #[test]
    fn test_flat_map_selects_from_state() {
        let counter = Counter::flat_map("by_class", by_class);
        let mage = Item::new(ItemType::Ring, Rarity::Common, 10).with_classes(CharClasses::MAGE);
        let warrior =
            Item::new(ItemType::Ring, Rarity::Common, 10).with_classes(CharClasses::WARRIOR);

        let mage_state = counter.apply(DecompositionState::new(&mage, 40.0)).unwrap();
        let warrior_state = counter
            .apply(DecompositionState::new(&warrior, 40.0))
            .unwrap();
        assert_eq!(mage_state.count(), BonusCount::Integer(4));
        assert_eq!(warrior_state.count(), BonusCount::Integer(2));
        assert_eq!(format!("{:?}", counter), "FlatMap(Selector(\"by_class\"))");
    }

    #[test]
    fn test_not_implemented() {
        let err = Counter::not_implemented(StatName::DamageReflect)
            .apply(state(ItemType::Ring, 5, 2.0))
            .unwrap_err();
        assert_eq!(err, DecompositionError::NotImplemented(StatName::DamageReflect));
    }
}
