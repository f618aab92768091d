//! Bonus value formulas.
//!
//! Evaluators are the game's published per-level formulas. They are pure
//! and total: every `(x, r)` pair produces a number.

/// The variable a polynomial is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Effective level (`level + upgrade offset`).
    Level,
    /// Effective rarity (`base rarity + rarity modifier`).
    Rarity,
}

/// A bonus value formula `(x, r) -> value`.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::evaluator::Evaluator;
///
/// // 5x + 20
/// let native = Evaluator::level(&[5.0, 20.0]);
/// assert_eq!(native.evaluate(20, 0), 120.0);
///
/// // 2r + 4
/// let by_rarity = Evaluator::rarity(&[2.0, 4.0]);
/// assert_eq!(by_rarity.evaluate(50, 1), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluator {
    /// Polynomial with coefficients ordered from the highest degree down.
    Polynomial {
        coefficients: &'static [f64],
        variable: Variable,
    },
    /// The three-piece rarity curve used by rarity-scaled natives.
    ///
    /// `R(x, r) = f·x + f·(130 + ceil(10r/3)) + f·sign(r)·(130 + 390r)`
    RCurve { factor: f64 },
}

impl Evaluator {
    /// Polynomial in the effective level.
    pub const fn level(coefficients: &'static [f64]) -> Self {
        Evaluator::Polynomial {
            coefficients,
            variable: Variable::Level,
        }
    }

    /// Polynomial in the effective rarity.
    pub const fn rarity(coefficients: &'static [f64]) -> Self {
        Evaluator::Polynomial {
            coefficients,
            variable: Variable::Rarity,
        }
    }

    /// Rarity curve with the given factor.
    pub const fn r_curve(factor: f64) -> Self {
        Evaluator::RCurve { factor }
    }

    /// Evaluate at level-equivalent `x` and rarity `r`.
    pub fn evaluate(&self, x: i32, r: i32) -> f64 {
        match *self {
            Evaluator::Polynomial {
                coefficients,
                variable,
            } => {
                let at = match variable {
                    Variable::Level => x,
                    Variable::Rarity => r,
                };
                horner(coefficients, at as f64)
            }
            Evaluator::RCurve { factor } => {
                let x = x as f64;
                let r = r as f64;
                factor * x
                    + factor * (130.0 + (10.0 * r / 3.0).ceil())
                    + factor * sign(r) * (130.0 + 390.0 * r)
            }
        }
    }
}

fn horner(coefficients: &[f64], at: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * at + c)
}

/// Level as a formula argument, saturating at `i32::MAX`.
pub fn formula_level(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// Round half away from zero.
pub fn round_half_away(value: f64) -> f64 {
    // f64::round already rounds ties away from zero; -0.0 is normalized.
    value.round() + 0.0
}

/// Sign as `-1.0`, `0.0` or `1.0`.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_level_saturates() {
        assert_eq!(formula_level(60), 60);
        assert_eq!(formula_level(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_polynomial_horner() {
        // 0.5x^2 - x + 3 at x = 4
        let eval = Evaluator::level(&[0.5, -1.0, 3.0]);
        assert_eq!(eval.evaluate(4, 9), 7.0);
    }

    #[test]
    fn test_empty_polynomial_is_zero() {
        assert_eq!(Evaluator::level(&[]).evaluate(10, 1), 0.0);
    }

    #[test]
    fn test_rarity_indexed_polynomial_ignores_level() {
        let eval = Evaluator::rarity(&[3.0, 1.0]);
        assert_eq!(eval.evaluate(1, 2), 7.0);
        assert_eq!(eval.evaluate(300, 2), 7.0);
    }

    #[test]
    fn test_r_curve_regular_rarity() {
        // r = 0: f·x + f·130
        let eval = Evaluator::r_curve(0.5);
        assert_eq!(eval.evaluate(50, 0), 25.0 + 65.0);
    }

    #[test]
    fn test_r_curve_positive_rarity() {
        // r = 1: 0.5·50 + 0.5·(130 + 4) + 0.5·(130 + 390)
        let eval = Evaluator::r_curve(0.5);
        assert_eq!(eval.evaluate(50, 1), 25.0 + 67.0 + 260.0);
    }

    #[test]
    fn test_r_curve_negative_rarity() {
        // r = -1: ceil(-10/3) = -3, sign = -1, 130 - 390 = -260
        let eval = Evaluator::r_curve(1.0);
        assert_eq!(eval.evaluate(10, -1), 10.0 + 127.0 + 260.0);
    }

    #[test]
    fn test_round_half_away() {
        assert_eq!(round_half_away(2.5), 3.0);
        assert_eq!(round_half_away(-2.5), -3.0);
        assert_eq!(round_half_away(2.4), 2.0);
        assert!(round_half_away(-0.4).is_sign_positive());
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-3.2), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(0.1), 1.0);
    }
}
