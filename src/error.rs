//! Error types for stat decomposition.
//!
//! Every error means "this statistic could not be decomposed". The
//! decomposer turns them into per-statistic failures and keeps going.

use crate::stats::StatName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while decomposing a single statistic.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{DecompositionError, StatName};
///
/// let err = DecompositionError::NotImplemented(StatName::DamageReflect);
/// assert_eq!(err.to_string(), "No counter implemented for stat: damageReflect");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecompositionError {
    /// No bonus count satisfies the rounding constraints of the linear model.
    #[error("No bonus count fits remaining value {remaining} (stat value {original})")]
    InfeasibleInversion { remaining: f64, original: f64 },

    /// A slope evaluator returned zero or less.
    ///
    /// This is an authoring defect in a coefficient table, never a property
    /// of the item being decomposed.
    #[error("Non-positive slope {slope} at level {level}")]
    NonPositiveSlope { slope: f64, level: i32 },

    /// A `one_of` counter has no entry for the remaining value.
    #[error("Missing variant for value {0}")]
    MissingVariant(f64),

    /// None of the rarity modifier hypotheses decomposed the value.
    #[error("No fitting rarity modifier")]
    NoFittingRarityModifier,

    /// The statistic has no counter yet.
    #[error("No counter implemented for stat: {0}")]
    NotImplemented(StatName),

    /// The counter finished without consuming the whole value.
    #[error("Value {remaining} left after decomposition")]
    Incomplete { remaining: f64 },
}

impl DecompositionError {
    /// Whether the rarity search may treat this error as "hypothesis does not
    /// fit" and move on to the next candidate.
    pub fn is_hypothesis_mismatch(&self) -> bool {
        matches!(
            self,
            DecompositionError::InfeasibleInversion { .. } | DecompositionError::Incomplete { .. }
        )
    }
}
