//! Linear inversion.
//!
//! A regular bonus adds `a1(x)` per bonus on top of an optional constant
//! `a0`, and the game rounds the whole statistic half away from zero:
//!
//! ```text
//! value = round(native + a1(x)·n + a0)      n ≠ 0
//! value = round(native + a0_opt)            n = 0
//! ```
//!
//! `a0_opt` is `a0` when the bonus is defined down to zero and `0`
//! otherwise. The upgrade offset is only added to `x` in the direction of
//! the count's sign. Inverting recovers every integer `n` consistent with
//! the observed value.

use crate::count::{to_safe_integer, BonusCount};
use crate::error::DecompositionError;
use crate::evaluator::{sign, Evaluator};
use crate::state::DecompositionState;

/// A regular bonus of per-level magnitude `slope`.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::evaluator::Evaluator;
/// use bonus_decomposer::linear::Linear;
/// use bonus_decomposer::{BonusCount, DecompositionState, Item, ItemType, Rarity};
///
/// // 0.1x + 1 per bonus: 3 per bonus at level 20
/// let linear = Linear::new(Evaluator::level(&[0.1, 1.0]));
/// let item = Item::new(ItemType::Ring, Rarity::Common, 20);
///
/// let count = linear.invert(&DecompositionState::new(&item, 9.0)).unwrap();
/// assert_eq!(count, BonusCount::Integer(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    slope: Evaluator,
    offset: f64,
    extends_to_zero: bool,
    negative_effect: bool,
}

impl Linear {
    /// Bonus with slope `a1` and no constant part.
    pub const fn new(slope: Evaluator) -> Self {
        Self {
            slope,
            offset: 0.0,
            extends_to_zero: false,
            negative_effect: false,
        }
    }

    /// Set the constant part `a0`.
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Apply `a0` even when there are no regular bonuses.
    pub const fn extended_to_zero(mut self) -> Self {
        self.extends_to_zero = true;
        self
    }

    /// The statistic harms its holder; counts are reported negated.
    pub const fn negative_effect(mut self) -> Self {
        self.negative_effect = true;
        self
    }

    pub fn slope(&self) -> Evaluator {
        self.slope
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn extends_to_zero(&self) -> bool {
        self.extends_to_zero
    }

    pub fn is_negative_effect(&self) -> bool {
        self.negative_effect
    }

    /// `a0` as seen by a statistic without regular bonuses.
    fn zero_offset(&self) -> f64 {
        if self.extends_to_zero {
            self.offset
        } else {
            0.0
        }
    }

    /// Recover the bonus count from the state's remaining value.
    pub fn invert(&self, state: &DecompositionState) -> Result<BonusCount, DecompositionError> {
        let remaining = state.remaining_value();
        let original_sign = sign(state.original_value());

        let mut lower = remaining - self.offset - 0.5;
        let mut upper = remaining - self.offset + 0.5;
        let mut y = original_sign;
        if self.negative_effect {
            (lower, upper) = (-upper, -lower);
            y = -y;
        }

        lower /= self.slope_at(state, lower)?;
        upper /= self.slope_at(state, upper)?;

        let lower_inclusive = y > 0.0;
        let upper_inclusive = y < 0.0;
        let mut lo = if lower_inclusive {
            lower.ceil()
        } else {
            lower.floor() + 1.0
        };
        let mut hi = if upper_inclusive {
            upper.floor()
        } else {
            upper.ceil() - 1.0
        };

        // Without a zero-extended domain a zero count does not carry a0.
        // A contiguous range keeps an interior zero.
        if !self.extends_to_zero && self.offset != 0.0 {
            if lo == 0.0 {
                lo = 1.0;
            } else if hi == 0.0 {
                hi = -1.0;
            }
        }

        if self.zero_fits(remaining, original_sign) {
            if lo <= hi {
                lo = lo.min(0.0);
                hi = hi.max(0.0);
            } else {
                (lo, hi) = (0.0, 0.0);
            }
        }

        let infeasible = || DecompositionError::InfeasibleInversion {
            remaining,
            original: state.original_value(),
        };
        if lo > hi {
            return Err(infeasible());
        }
        let lo = to_safe_integer(lo).ok_or_else(infeasible)?;
        let hi = to_safe_integer(hi).ok_or_else(infeasible)?;
        Ok(BonusCount::range(lo, hi))
    }

    /// Apply the inversion: consume the remaining value and record the count.
    pub fn apply(
        &self,
        state: DecompositionState,
    ) -> Result<DecompositionState, DecompositionError> {
        let count = self.invert(&state)?;
        let remaining = state.remaining_value();
        Ok(state.consume(remaining).with_count(count))
    }

    /// Slope at `x = level + sign(bound)·upgrade`.
    fn slope_at(&self, state: &DecompositionState, bound: f64) -> Result<f64, DecompositionError> {
        let level = state.level_towards(bound);
        let slope = self.slope.evaluate(level, state.rarity());
        if slope > 0.0 {
            Ok(slope)
        } else {
            Err(DecompositionError::NonPositiveSlope { slope, level })
        }
    }

    /// Whether `round(a0_opt)` reproduces the remaining value under the
    /// statistic's rounding direction.
    fn zero_fits(&self, remaining: f64, y: f64) -> bool {
        let diff = self.zero_offset() - remaining;
        let above_lower = if y > 0.0 { diff >= -0.5 } else { diff > -0.5 };
        let below_upper = if y < 0.0 { diff <= 0.5 } else { diff < 0.5 };
        above_lower && below_upper
    }
}
