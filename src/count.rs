//! Bonus count module.
//!
//! A decomposed statistic reports how many regular bonuses it carries,
//! either exactly or as an inclusive range when several counts round to
//! the same observed value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest integer exactly representable by an `f64`.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Recovered number of regular bonuses.
///
/// Negative counts are valid and describe harmful bonuses.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::BonusCount;
///
/// let exact = BonusCount::range(3, 3);
/// assert_eq!(exact, BonusCount::Integer(3));
///
/// let ambiguous = BonusCount::range(2, 4);
/// assert!(ambiguous.contains(3));
/// assert_eq!(ambiguous.to_string(), "2-4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusCount {
    /// Exact count.
    Integer(i64),
    /// Inclusive bounds, `lower < upper`.
    Range { lower: i64, upper: i64 },
}

impl BonusCount {
    /// Build a count from inclusive bounds, collapsing equal bounds to
    /// `Integer`. Bounds are swapped if given in reverse.
    pub fn range(lower: i64, upper: i64) -> Self {
        match lower.cmp(&upper) {
            std::cmp::Ordering::Equal => BonusCount::Integer(lower),
            std::cmp::Ordering::Less => BonusCount::Range { lower, upper },
            std::cmp::Ordering::Greater => BonusCount::Range {
                lower: upper,
                upper: lower,
            },
        }
    }

    /// Smallest possible count.
    pub fn lower(self) -> i64 {
        match self {
            BonusCount::Integer(n) => n,
            BonusCount::Range { lower, .. } => lower,
        }
    }

    /// Largest possible count.
    pub fn upper(self) -> i64 {
        match self {
            BonusCount::Integer(n) => n,
            BonusCount::Range { upper, .. } => upper,
        }
    }

    /// Whether `n` is one of the possible counts.
    pub fn contains(self, n: i64) -> bool {
        self.lower() <= n && n <= self.upper()
    }

    /// Whether the count is known exactly.
    pub fn is_exact(self) -> bool {
        matches!(self, BonusCount::Integer(_))
    }
}

impl Default for BonusCount {
    fn default() -> Self {
        BonusCount::Integer(0)
    }
}

impl fmt::Display for BonusCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusCount::Integer(n) => write!(f, "{}", n),
            BonusCount::Range { lower, upper } => write!(f, "{}-{}", lower, upper),
        }
    }
}

/// Convert an integral `f64` into a safe integer.
///
/// Returns `None` for non-finite values and values outside
/// `±MAX_SAFE_INTEGER`. `-0.0` maps to `0`.
pub fn to_safe_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() > MAX_SAFE_INTEGER as f64 {
        return None;
    }
    // `as` truncates toward zero, which also normalizes -0.0.
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_collapses() {
        assert_eq!(BonusCount::range(-2, -2), BonusCount::Integer(-2));
        assert_eq!(
            BonusCount::range(5, 1),
            BonusCount::Range { lower: 1, upper: 5 }
        );
    }

    #[test]
    fn test_bounds_and_contains() {
        let count = BonusCount::range(-1, 2);
        assert_eq!(count.lower(), -1);
        assert_eq!(count.upper(), 2);
        assert!(count.contains(0));
        assert!(!count.contains(3));
        assert!(!count.is_exact());
        assert!(BonusCount::Integer(7).contains(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(BonusCount::Integer(-3).to_string(), "-3");
        assert_eq!(BonusCount::range(1, 3).to_string(), "1-3");
    }

    #[test]
    fn test_to_safe_integer() {
        assert_eq!(to_safe_integer(-0.0), Some(0));
        assert_eq!(to_safe_integer(42.0), Some(42));
        assert_eq!(to_safe_integer(f64::INFINITY), None);
        assert_eq!(to_safe_integer(f64::NAN), None);
        assert_eq!(to_safe_integer(1e300), None);
    }
}
