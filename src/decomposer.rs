//! Item decomposition.
//!
//! Provides the `Decomposer` type, the main entry point. It holds one
//! counter per statistic and runs them over an item's statistics in order,
//! carrying the detected rarity modifier and native magic resistance
//! element from one statistic to the next.

use crate::count::BonusCount;
use crate::counter::Counter;
use crate::error::DecompositionError;
use crate::item::Item;
use crate::magic_res::detect_magic_res_type;
use crate::modifier::{MagicResType, RarityModifier};
use crate::state::DecompositionState;
use crate::stats::{ordered_map, StatName};
use crate::tables;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Outcome of decomposing a single statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum DecompositionResult {
    #[serde(rename_all = "camelCase")]
    Success {
        count: BonusCount,
        native: bool,
        rarity_dependent: bool,
    },
    Failure { error: DecompositionError },
}

impl DecompositionResult {
    fn from_state(state: &DecompositionState) -> Self {
        DecompositionResult::Success {
            count: state.count(),
            native: state.native(),
            rarity_dependent: state.rarity_dependent(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DecompositionResult::Success { .. })
    }

    /// Bonus count, if the statistic was decomposed.
    pub fn count(&self) -> Option<BonusCount> {
        match self {
            DecompositionResult::Success { count, .. } => Some(*count),
            DecompositionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&DecompositionError> {
        match self {
            DecompositionResult::Success { .. } => None,
            DecompositionResult::Failure { error } => Some(error),
        }
    }
}

/// Decomposition of every statistic of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposedItem {
    /// Rarity modifier detected on the item, if any statistic revealed it.
    pub rarity_modifier: Option<RarityModifier>,
    /// Per-statistic results in the item's statistic order.
    #[serde(with = "ordered_map")]
    pub results: Vec<(StatName, DecompositionResult)>,
}

impl DecomposedItem {
    pub fn get(&self, stat: StatName) -> Option<&DecompositionResult> {
        self.results
            .iter()
            .find(|(name, _)| *name == stat)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, &DecompositionResult)> + '_ {
        self.results.iter().map(|(stat, result)| (*stat, result))
    }

    /// Whether every statistic was decomposed.
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_success())
    }
}

/// Item-wide facts learned from statistics decomposed so far.
#[derive(Debug, Default)]
struct ItemCache {
    rarity_modifier: Option<RarityModifier>,
    magic_res_type: Option<MagicResType>,
}

/// Counter registry and decomposition driver.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{BonusCount, Decomposer, Item, ItemType, Rarity, StatName, Stats};
///
/// let decomposer = Decomposer::new();
///
/// // Level 20 one-handed weapon: native 120 plus one bonus of 7.
/// let item = Item::new(ItemType::OneHanded, Rarity::Common, 20)
///     .with_stats(Stats::new().with(StatName::PhysDmgMin, 127.0));
///
/// let decomposed = decomposer.decompose(&item);
/// let result = decomposed.get(StatName::PhysDmgMin).unwrap();
/// assert_eq!(result.count(), Some(BonusCount::Integer(1)));
/// ```
#[derive(Debug, Clone)]
pub struct Decomposer {
    counters: HashMap<StatName, Counter>,
}

impl Decomposer {
    /// Create a decomposer with the standard counter of every statistic.
    pub fn new() -> Self {
        Self {
            counters: tables::standard_counters(),
        }
    }

    /// Create a decomposer without any counters.
    pub fn empty() -> Self {
        Self {
            counters: HashMap::new(),
        }
    }

    /// Register the counter of a statistic, replacing any previous one.
    pub fn register(&mut self, stat: StatName, counter: Counter) {
        self.counters.insert(stat, counter);
    }

    pub fn counter(&self, stat: StatName) -> Option<&Counter> {
        self.counters.get(&stat)
    }

    /// Decompose every statistic of `item`.
    ///
    /// A failing statistic is reported in its result and never stops the
    /// remaining ones. Only successful statistics update the detected
    /// rarity modifier and magic resistance element.
    pub fn decompose(&self, item: &Item) -> DecomposedItem {
        let mut cache = ItemCache::default();
        let mut results = Vec::with_capacity(item.stats.len());

        for (stat, value) in item.stats.iter() {
            let result = match self.decompose_stat(item, stat, value, &mut cache) {
                Ok(state) => {
                    debug!(
                        %stat,
                        value,
                        count = %state.count(),
                        native = state.native(),
                        "decomposed statistic"
                    );
                    DecompositionResult::from_state(&state)
                }
                Err(error) => {
                    if let DecompositionError::NonPositiveSlope { .. } = error {
                        warn!(%stat, %error, "coefficient table yields a non-positive slope");
                    } else {
                        debug!(%stat, value, %error, "statistic not decomposed");
                    }
                    DecompositionResult::Failure { error }
                }
            };
            results.push((stat, result));
        }

        DecomposedItem {
            rarity_modifier: cache.rarity_modifier,
            results,
        }
    }

    fn decompose_stat(
        &self,
        item: &Item,
        stat: StatName,
        value: f64,
        cache: &mut ItemCache,
    ) -> Result<DecompositionState, DecompositionError> {
        let counter = self
            .counters
            .get(&stat)
            .ok_or(DecompositionError::NotImplemented(stat))?;

        let is_magic_res = stat.magic_res_type().is_some();
        let magic_res_type = match cache.magic_res_type {
            Some(kind) => Some(kind),
            None if is_magic_res => detect_magic_res_type(item),
            None => None,
        };

        let mut state = DecompositionState::new(item, value);
        if let Some(modifier) = cache.rarity_modifier {
            state = state.with_detected_rarity_modifier(modifier);
        }
        if let Some(kind) = magic_res_type {
            state = state.with_native_magic_res_type(kind);
        }

        let state = counter.apply(state)?;
        if !state.is_complete() {
            return Err(DecompositionError::Incomplete {
                remaining: state.remaining_value(),
            });
        }

        if cache.rarity_modifier.is_none() {
            if let Some(modifier) = state.detected_rarity_modifier() {
                debug!(%stat, %modifier, "rarity modifier detected");
                cache.rarity_modifier = Some(modifier);
            }
        }
        if is_magic_res && cache.magic_res_type.is_none() {
            if let Some(kind) = magic_res_type {
                debug!(%stat, %kind, "native magic resistance element detected");
                cache.magic_res_type = Some(kind);
            }
        }

        Ok(state)
    }
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompose `item` with the standard counters.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{decompose_item, BonusCount, Item};
///
/// let item = Item::from_json(r#"{
///     "type": "oneHanded",
///     "level": 20,
///     "stats": { "physDmgMin": 120 }
/// }"#).unwrap();
///
/// let decomposed = decompose_item(&item);
/// assert!(decomposed.is_complete());
/// assert_eq!(decomposed.results[0].1.count(), Some(BonusCount::Integer(0)));
/// ```
pub fn decompose_item(item: &Item) -> DecomposedItem {
    static STANDARD: OnceLock<Decomposer> = OnceLock::new();
    STANDARD.get_or_init(Decomposer::new).decompose(item)
}
