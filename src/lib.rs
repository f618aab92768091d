//! # bonus-decomposer - Item Statistic Decomposition
//!
//! Reverse-engineers the statistic values shown on an item tooltip into the
//! parts the game combined to produce them:
//! - **Native** bonuses inherent to the item type
//! - **Regular** bonus counts, exact or as an inclusive range
//! - The hidden item-wide **rarity modifier**
//! - The element carrying an armour piece's **native magic resistance**
//!
//! ## Core Concepts
//!
//! ### Counter Pipeline
//!
//! Each statistic has a counter that consumes its value step by step:
//!
//! ```text
//! [Item stat] → [DecompositionState] → [Counter]* → [DecompositionResult]
//! ```
//!
//! 1. **State** holds the remaining value and what was found so far
//! 2. **Counters** subtract natives and invert the regular bonus formula
//! 3. **Results** report the count or why the value could not be explained
//!
//! ### Key Features
//!
//! - **Rounding-aware inversion**: recovers every count consistent with a
//!   value rounded half away from zero
//! - **Hypothesis search**: detects the rarity modifier from the first
//!   statistic it fits and reuses it for the rest of the item
//! - **Failure isolation**: one unexplained statistic never affects others
//! - **Configurable**: counters can be replaced per statistic
//!
//! ## Example
//!
//! ```rust
//! use bonus_decomposer::*;
//!
//! let item = Item::new(ItemType::OneHanded, Rarity::Common, 20).with_stats(
//!     Stats::new()
//!         .with(StatName::PhysDmgMin, 127.0)
//!         .with(StatName::PhysDmgMax, 180.0),
//! );
//!
//! let decomposed = decompose_item(&item);
//! assert_eq!(
//!     decomposed.get(StatName::PhysDmgMin).unwrap().count(),
//!     Some(BonusCount::Integer(1))
//! );
//! assert_eq!(
//!     decomposed.get(StatName::PhysDmgMax).unwrap().count(),
//!     Some(BonusCount::Integer(0))
//! );
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Item description and enumerations
//! - [`stats`] - Statistic names and ordered statistic values
//! - [`evaluator`] - Coefficient formulas
//! - [`state`] - Per-statistic decomposition state
//! - [`linear`] - Inversion of the regular bonus formula
//! - [`counter`] - Composable counters
//! - [`rarity`] - Rarity modifier search
//! - [`magic_res`] - Native magic resistance detection
//! - [`tables`] - Standard counters of every statistic
//! - [`decomposer`] - Item decomposition driver
//! - [`error`] - Error types

pub mod count;
pub mod counter;
pub mod decomposer;
pub mod error;
pub mod evaluator;
pub mod item;
pub mod linear;
pub mod magic_res;
pub mod modifier;
pub mod rarity;
pub mod state;
pub mod stats;
pub mod tables;

// Re-export main types for convenience
pub use count::BonusCount;
pub use decomposer::{decompose_item, DecomposedItem, Decomposer, DecompositionResult};
pub use error::DecompositionError;
pub use item::{CharClasses, Item, ItemType, Rarity};
pub use modifier::{MagicResType, RarityModifier};
pub use state::DecompositionState;
pub use stats::{StatName, Stats};
