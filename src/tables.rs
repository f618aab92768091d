//! Per-statistic counter definitions.
//!
//! Coefficients are this crate's own tables. Polynomials list their
//! coefficients from the highest degree down, so `[0.3, 1.0]` is
//! `0.3x + 1`.

use crate::counter::Counter;
use crate::evaluator::Evaluator;
use crate::item::{CharClasses, ItemType};
use crate::linear::Linear;
use crate::modifier::MagicResType;
use crate::state::DecompositionState;
use crate::stats::StatName;
use std::collections::HashMap;
use strum::IntoEnumIterator;

use ItemType::*;

pub const MELEE_WEAPONS: &[ItemType] = &[OneHanded, HandAndAHalf, TwoHanded];
pub const ARMOR_PIECES: &[ItemType] = &[Armor, Helmet, Boots, Gloves, Shield];
pub const NATIVE_MAGIC_RES_ITEM_TYPES: &[ItemType] = ARMOR_PIECES;

/// Native magic resistance, rounded on its own.
pub const MAGIC_RES_NATIVE: Evaluator = Evaluator::level(&[0.2, 3.0]);
/// Magic resistance per regular bonus.
pub const MAGIC_RES_STEP: f64 = 5.0;
const MAGIC_RES_SLOPE: Evaluator = Evaluator::level(&[MAGIC_RES_STEP]);

// Weapon damage natives
const PHYS_DMG_MIN_NATIVES: [(&[ItemType], Evaluator); 4] = [
    (&[OneHanded], Evaluator::level(&[5.0, 20.0])),
    (&[HandAndAHalf], Evaluator::level(&[6.0, 24.0])),
    (&[TwoHanded], Evaluator::level(&[7.5, 30.0])),
    (&[Ranged], Evaluator::level(&[4.5, 18.0])),
];
const PHYS_DMG_MAX_NATIVES: [(&[ItemType], Evaluator); 4] = [
    (&[OneHanded], Evaluator::level(&[7.5, 30.0])),
    (&[HandAndAHalf], Evaluator::level(&[9.0, 36.0])),
    (&[TwoHanded], Evaluator::level(&[11.25, 45.0])),
    (&[Ranged], Evaluator::level(&[6.75, 27.0])),
];

const PHYS_DMG_MIN_SLOPE: Evaluator = Evaluator::level(&[0.3, 1.0]);
const PHYS_DMG_MAX_SLOPE: Evaluator = Evaluator::level(&[0.45, 1.5]);

const FIRE_DMG_NATIVE: Evaluator = Evaluator::level(&[6.0, 25.0]);
const FIRE_DMG_SLOPE: Evaluator = Evaluator::level(&[0.5, 2.0]);
const LIGHT_DMG_MIN_NATIVE: Evaluator = Evaluator::level(&[3.0, 10.0]);
const LIGHT_DMG_MIN_SLOPE: Evaluator = Evaluator::level(&[0.25, 1.0]);
const LIGHT_DMG_MAX_NATIVE: Evaluator = Evaluator::level(&[9.0, 30.0]);
const LIGHT_DMG_MAX_SLOPE: Evaluator = Evaluator::level(&[0.75, 3.0]);
const FROST_DMG_NATIVE: Evaluator = Evaluator::level(&[5.0, 20.0]);
const FROST_DMG_SLOPE: Evaluator = Evaluator::level(&[0.4, 2.0]);

/// Slow of frost damage: 40 natively, 10 more per bonus, at most two.
const FROST_SLOW_VARIANTS: [(f64, i64); 3] = [(40.0, 0), (50.0, 1), (60.0, 2)];
const POISON_SLOW_VARIANTS: [(f64, i64); 3] = [(30.0, 1), (45.0, 2), (60.0, 3)];

/// Armor destruction native on melee weapons.
///
/// The server rounds this native separately from the regular bonuses,
/// which shifts some values by one compared to rounding the sum.
const ARMOR_DEST_NATIVE: Evaluator = Evaluator::level(&[0.4, 5.0]);
const ARMOR_DEST_SLOPE: Evaluator = Evaluator::level(&[0.3, 2.0]);

const ARMOR_NATIVES: [(&[ItemType], Evaluator); 5] = [
    (&[Armor], Evaluator::r_curve(0.5)),
    (&[Helmet], Evaluator::r_curve(0.3)),
    (&[Boots], Evaluator::r_curve(0.2)),
    (&[Gloves], Evaluator::r_curve(0.2)),
    (&[Shield], Evaluator::r_curve(0.4)),
];
const ARMOR_SLOPE: Evaluator = Evaluator::level(&[0.5, 3.0]);

const BLOCK_NATIVE: Evaluator = Evaluator::r_curve(0.1);
const BLOCK_SLOPE: Evaluator = Evaluator::level(&[0.2, 1.0]);

/// Boots evade, by effective rarity.
const EVADE_NATIVE: Evaluator = Evaluator::rarity(&[2.0, 4.0]);
const EVADE_SLOPE: Evaluator = Evaluator::level(&[0.1, 2.0]);

// Hit points per bonus by class group
const HP_SLOPE_HEAVY: Evaluator = Evaluator::level(&[4.0, 20.0]);
const HP_SLOPE_MEDIUM: Evaluator = Evaluator::level(&[3.0, 15.0]);
const HP_SLOPE_LIGHT: Evaluator = Evaluator::level(&[2.0, 10.0]);

const ATTRIBUTE_SLOPE: Evaluator = Evaluator::level(&[0.1, 1.0]);
const ALL_ATTRIBUTES_SLOPE: Evaluator = Evaluator::level(&[0.05, 1.0]);
const RESOURCE_SLOPE: Evaluator = Evaluator::level(&[0.5, 5.0]);
const DESTRUCTION_SLOPE: Evaluator = Evaluator::level(&[0.1, 1.0]);
const ABSORB_SLOPE: Evaluator = Evaluator::level(&[0.5, 5.0]);
const HP_REGEN_SLOPE: Evaluator = Evaluator::level(&[0.2, 2.0]);
const HP_REGEN_BASE: f64 = 1.0;

fn linear(slope: Evaluator) -> Counter {
    Counter::linear(Linear::new(slope))
}

fn flat(step: &'static [f64]) -> Counter {
    linear(Evaluator::level(step))
}

fn harmful(slope: Evaluator) -> Counter {
    Counter::linear(Linear::new(slope).negative_effect())
}

/// Natives by item type followed by regular bonuses.
fn with_natives<const N: usize>(
    natives: [(&'static [ItemType], Evaluator); N],
    slope: Evaluator,
) -> Counter {
    let mut counters: Vec<Counter> = natives
        .into_iter()
        .map(|(item_types, evaluator)| Counter::native(item_types, evaluator))
        .collect();
    counters.push(linear(slope));
    Counter::pipe(counters)
}

fn with_native(item_types: &'static [ItemType], native: Evaluator, slope: Evaluator) -> Counter {
    Counter::pipe(vec![Counter::native(item_types, native), linear(slope)])
}

fn magic_res(kind: MagicResType) -> Counter {
    Counter::pipe(vec![
        Counter::native_magic_res(kind, MAGIC_RES_NATIVE),
        linear(MAGIC_RES_SLOPE),
    ])
}

fn armor(state: &DecompositionState) -> Counter {
    if ARMOR_PIECES.contains(&state.item_type()) {
        Counter::rarity_dependent(with_natives(ARMOR_NATIVES, ARMOR_SLOPE))
    } else {
        linear(ARMOR_SLOPE)
    }
}

fn block(state: &DecompositionState) -> Counter {
    if state.item_type() == Shield {
        Counter::rarity_dependent(with_native(&[Shield], BLOCK_NATIVE, BLOCK_SLOPE))
    } else {
        linear(BLOCK_SLOPE)
    }
}

fn evade(state: &DecompositionState) -> Counter {
    if state.item_type() == Boots {
        Counter::rarity_dependent(with_native(&[Boots], EVADE_NATIVE, EVADE_SLOPE))
    } else {
        linear(EVADE_SLOPE)
    }
}

fn hp(state: &DecompositionState) -> Counter {
    let classes = state.classes();
    let slope = if classes.intersects(CharClasses::WARRIOR | CharClasses::PALADIN) {
        HP_SLOPE_HEAVY
    } else if classes.intersects(CharClasses::BLADE_DANCER | CharClasses::TRACKER) {
        HP_SLOPE_MEDIUM
    } else if classes.intersects(CharClasses::MAGE | CharClasses::HUNTER) {
        HP_SLOPE_LIGHT
    } else {
        HP_SLOPE_MEDIUM
    };
    linear(slope)
}

/// Standard counters of every statistic.
pub fn standard_counters() -> HashMap<StatName, Counter> {
    StatName::iter().map(|stat| (stat, counter_for(stat))).collect()
}

/// The standard counter of a statistic.
pub fn counter_for(stat: StatName) -> Counter {
    use StatName as S;
    match stat {
        S::PhysDmgMin => with_natives(PHYS_DMG_MIN_NATIVES, PHYS_DMG_MIN_SLOPE),
        S::PhysDmgMax => with_natives(PHYS_DMG_MAX_NATIVES, PHYS_DMG_MAX_SLOPE),
        S::FireDmg => with_native(&[Wand], FIRE_DMG_NATIVE, FIRE_DMG_SLOPE),
        S::LightDmgMin => with_native(&[Wand], LIGHT_DMG_MIN_NATIVE, LIGHT_DMG_MIN_SLOPE),
        S::LightDmgMax => with_native(&[Wand], LIGHT_DMG_MAX_NATIVE, LIGHT_DMG_MAX_SLOPE),
        S::FrostDmg => with_native(&[Wand], FROST_DMG_NATIVE, FROST_DMG_SLOPE),
        S::FrostSlow => Counter::one_of(&FROST_SLOW_VARIANTS),
        S::PoisonDmg => flat(&[0.2, 1.0]),
        S::PoisonSlow => Counter::one_of(&POISON_SLOW_VARIANTS),
        S::WoundDmg => flat(&[0.5, 2.0]),
        S::WoundChance => flat(&[2.0]),
        S::ArmorDest => Counter::pipe(vec![
            Counter::native_rounded(MELEE_WEAPONS, ARMOR_DEST_NATIVE),
            linear(ARMOR_DEST_SLOPE),
        ]),

        S::Armor => Counter::flat_map("armor", armor),
        S::Block => Counter::flat_map("block", block),
        S::Evade => Counter::flat_map("evade", evade),
        S::EvadePenalty => harmful(EVADE_SLOPE),
        S::AbsorbPhys | S::AbsorbMagic => linear(ABSORB_SLOPE),
        S::FireRes => magic_res(MagicResType::Fire),
        S::FrostRes => magic_res(MagicResType::Frost),
        S::LightRes => magic_res(MagicResType::Light),
        S::PoisonRes => flat(&[4.0]),

        S::AttackSpeed => flat(&[1.0]),
        S::AttackSpeedPenalty => harmful(Evaluator::level(&[1.0])),
        S::CritChance => flat(&[0.02, 1.0]),
        S::CritPower | S::MagicCritPower => flat(&[0.04, 2.0]),
        S::PhysPierce => flat(&[0.1, 2.0]),
        S::BlockPierce => flat(&[3.0]),
        S::CounterChance => flat(&[2.0]),
        S::EvadeReduction => flat(&[0.06, 1.0]),
        S::CritReduction => flat(&[2.0]),
        S::StunChance => flat(&[1.0]),
        S::ManaDest | S::EnergyDest => linear(DESTRUCTION_SLOPE),

        S::Hp => Counter::flat_map("hp", hp),
        S::HpPerStr => flat(&[1.0]),
        S::HpRegen => Counter::linear(Linear::new(HP_REGEN_SLOPE).with_offset(HP_REGEN_BASE)),
        S::Strength | S::Agility | S::Intellect => linear(ATTRIBUTE_SLOPE),
        S::AllAttributes => linear(ALL_ATTRIBUTES_SLOPE),
        S::ManaBonus | S::EnergyBonus => linear(RESOURCE_SLOPE),

        // Not rolled as regular bonuses.
        S::LegendaryBonus | S::Ammo => Counter::constant(0),
        S::DamageReflect | S::AbsorbDest => Counter::not_implemented(stat),
    }
}
