//! Rarity modifier hypothesis search.
//!
//! Some items carry a hidden item-wide rarity modifier. It is never shown
//! directly but shifts the formulas of several statistics, so it is found
//! by trying each modifier and keeping the first one that decomposes the
//! value completely.

use crate::counter::Counter;
use crate::error::DecompositionError;
use crate::modifier::RarityModifier;
use crate::state::DecompositionState;
use tracing::trace;

/// Order in which rarity modifiers are tried.
pub const HYPOTHESIS_ORDER: [RarityModifier; 3] = [
    RarityModifier::Regular,
    RarityModifier::Decreased,
    RarityModifier::Increased,
];

/// Run `counter` under the item's rarity modifier.
///
/// An already detected modifier is used directly. Otherwise each modifier in
/// [`HYPOTHESIS_ORDER`] is tried; the first one leaving no remaining value is
/// recorded as detected. Errors other than a hypothesis mismatch abort the
/// search.
pub fn rarity_dependent(
    counter: &Counter,
    state: DecompositionState,
) -> Result<DecompositionState, DecompositionError> {
    if let Some(modifier) = state.detected_rarity_modifier() {
        return counter
            .apply(state.with_current_rarity_modifier(modifier))
            .map(DecompositionState::with_rarity_dependent);
    }

    for modifier in HYPOTHESIS_ORDER {
        let attempt = counter.apply(state.clone().with_current_rarity_modifier(modifier));
        match attempt {
            Ok(result) if result.is_complete() => {
                trace!(%modifier, "rarity hypothesis fits");
                return Ok(result
                    .with_detected_rarity_modifier(modifier)
                    .with_rarity_dependent());
            }
            Ok(result) => {
                trace!(
                    %modifier,
                    remaining = result.remaining_value(),
                    "rarity hypothesis incomplete"
                );
            }
            Err(err) if err.is_hypothesis_mismatch() => {
                trace!(%modifier, %err, "rarity hypothesis does not fit");
            }
            Err(err) => return Err(err),
        }
    }

    Err(DecompositionError::NoFittingRarityModifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::BonusCount;
    use crate::evaluator::Evaluator;
    use crate::item::{Item, ItemType, Rarity};
    use crate::linear::Linear;
    use crate::stats::StatName;

    /// Native 10 + 10r with bonuses of 25 each.
    fn counter() -> Counter {
        Counter::rarity_dependent(Counter::pipe(vec![
            Counter::native(&[ItemType::Armor], Evaluator::rarity(&[10.0, 10.0])),
            Counter::linear(Linear::new(Evaluator::level(&[25.0]))),
        ]))
    }

    fn state(value: f64) -> DecompositionState {
        DecompositionState::new(&Item::new(ItemType::Armor, Rarity::Heroic, 30), value)
    }

    #[test]
    fn test_only_increased_fits() {
        // Heroic + Increased: native 10 + 10·3 = 40, plus two bonuses.
        let result = counter().apply(state(90.0)).unwrap();
        assert_eq!(result.detected_rarity_modifier(), Some(RarityModifier::Increased));
        assert_eq!(result.count(), BonusCount::Integer(2));
        assert!(result.rarity_dependent());
        assert!(result.native());
    }

    #[test]
    fn test_regular_preferred_when_it_fits() {
        // Heroic: native 30, plus two bonuses.
        let result = counter().apply(state(80.0)).unwrap();
        assert_eq!(result.detected_rarity_modifier(), Some(RarityModifier::Regular));
    }

    #[test]
    fn test_detected_modifier_bypasses_search() {
        let searched = counter().apply(state(90.0)).unwrap();
        let seeded = counter()
            .apply(state(90.0).with_detected_rarity_modifier(RarityModifier::Increased))
            .unwrap();
        assert_eq!(searched, seeded);

        // With Decreased forced, 90 - 20 = 70 is not a multiple of 25.
        let forced = counter()
            .apply(state(90.0).with_detected_rarity_modifier(RarityModifier::Decreased));
        assert!(matches!(
            forced,
            Err(DecompositionError::InfeasibleInversion { .. })
        ));
    }

    #[test]
    fn test_no_fitting_modifier() {
        // Natives 20, 30 and 40 leave 43, 33 and 23: none is near a multiple of 25.
        let err = counter().apply(state(63.0)).unwrap_err();
        assert_eq!(err, DecompositionError::NoFittingRarityModifier);
    }

    #[test]
    fn test_unexpected_error_aborts_search() {
        let counter = Counter::rarity_dependent(Counter::not_implemented(StatName::Armor));
        let err = counter.apply(state(10.0)).unwrap_err();
        assert_eq!(err, DecompositionError::NotImplemented(StatName::Armor));
    }

    #[test]
    fn test_incomplete_hypothesis_is_skipped() {
        // The native alone never completes, so every hypothesis is skipped.
        let counter = Counter::rarity_dependent(Counter::native(
            &[ItemType::Armor],
            Evaluator::rarity(&[10.0, 10.0]),
        ));
        assert_eq!(
            counter.apply(state(35.0)).unwrap_err(),
            DecompositionError::NoFittingRarityModifier
        );
        // Exactly the Decreased native.
        let result = counter.apply(state(20.0)).unwrap();
        assert_eq!(result.detected_rarity_modifier(), Some(RarityModifier::Decreased));
    }
}
