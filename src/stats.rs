//! Countable statistics and the ordered statistic bag.
//!
//! Order matters: statistics are decomposed in the order they were parsed,
//! because rarity and resistance discoveries are reused by later ones.

use crate::modifier::MagicResType;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name of a countable statistic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StatName {
    // Damage
    PhysDmgMin,
    PhysDmgMax,
    FireDmg,
    LightDmgMin,
    LightDmgMax,
    FrostDmg,
    FrostSlow,
    PoisonDmg,
    PoisonSlow,
    WoundDmg,
    WoundChance,
    ArmorDest,
    // Defence
    Armor,
    Block,
    Evade,
    EvadePenalty,
    AbsorbPhys,
    AbsorbMagic,
    FireRes,
    FrostRes,
    LightRes,
    PoisonRes,
    // Offence
    AttackSpeed,
    AttackSpeedPenalty,
    CritChance,
    CritPower,
    MagicCritPower,
    PhysPierce,
    BlockPierce,
    CounterChance,
    EvadeReduction,
    CritReduction,
    StunChance,
    ManaDest,
    EnergyDest,
    // Attributes and resources
    Hp,
    HpPerStr,
    HpRegen,
    Strength,
    Agility,
    Intellect,
    AllAttributes,
    ManaBonus,
    EnergyBonus,
    // Fixed-count and pending
    LegendaryBonus,
    Ammo,
    DamageReflect,
    AbsorbDest,
}

impl StatName {
    /// The magic resistance type this statistic measures, if any.
    pub fn magic_res_type(self) -> Option<MagicResType> {
        match self {
            StatName::FireRes => Some(MagicResType::Fire),
            StatName::FrostRes => Some(MagicResType::Frost),
            StatName::LightRes => Some(MagicResType::Light),
            _ => None,
        }
    }
}

/// Statistic values of an item, in parse order.
///
/// Inserting an existing statistic replaces its value in place. A missing
/// statistic is not the same as a zero one.
///
/// # Examples
///
/// ```rust
/// use bonus_decomposer::{StatName, Stats};
///
/// let mut stats = Stats::new();
/// stats.insert(StatName::Hp, 150.0);
/// stats.insert(StatName::Armor, 0.0);
///
/// assert_eq!(stats.get(StatName::Armor), Some(0.0));
/// assert_eq!(stats.get(StatName::Evade), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    entries: Vec<(StatName, f64)>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, stat: StatName, value: f64) {
        match self.entries.iter_mut().find(|(name, _)| *name == stat) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((stat, value)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, stat: StatName, value: f64) -> Self {
        self.insert(stat, value);
        self
    }

    pub fn get(&self, stat: StatName) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == stat)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, stat: StatName) -> bool {
        self.get(stat).is_some()
    }

    /// Statistics in parse order.
    pub fn iter(&self) -> impl Iterator<Item = (StatName, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StatName, f64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (StatName, f64)>>(iter: I) -> Self {
        let mut stats = Stats::new();
        for (stat, value) in iter {
            stats.insert(stat, value);
        }
        stats
    }
}

impl Serialize for Stats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ordered_map::serialize(&self.entries, serializer)
    }
}

impl<'de> Deserialize<'de> for Stats {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<(StatName, f64)> = ordered_map::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Serde helpers for `Vec<(K, V)>` stored as an order-preserving map.
pub(crate) mod ordered_map {
    use super::*;
    use std::marker::PhantomData;

    pub fn serialize<K, V, S>(entries: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<Vec<(K, V)>, D::Error>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }

    struct OrderedMapVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_insert_replaces_in_place() {
        let stats = Stats::new()
            .with(StatName::Hp, 100.0)
            .with(StatName::Armor, 20.0)
            .with(StatName::Hp, 150.0);

        let order: Vec<_> = stats.iter().collect();
        assert_eq!(order, vec![(StatName::Hp, 150.0), (StatName::Armor, 20.0)]);
    }

    #[test]
    fn test_json_preserves_order() {
        let stats: Stats =
            serde_json::from_str(r#"{ "strength": 5, "armor": 12, "agility": 3 }"#).unwrap();
        let names: Vec<_> = stats.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![StatName::Strength, StatName::Armor, StatName::Agility]
        );

        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"strength":5.0,"armor":12.0,"agility":3.0}"#);
    }

    #[test]
    fn test_unknown_stat_rejected() {
        let result: Result<Stats, _> = serde_json::from_str(r#"{ "luck": 1 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_match_serde() {
        for stat in StatName::iter() {
            let json = serde_json::to_string(&stat).unwrap();
            assert_eq!(json, format!("\"{}\"", stat));
        }
    }

    #[test]
    fn test_magic_res_stats() {
        assert_eq!(StatName::FrostRes.magic_res_type(), Some(MagicResType::Frost));
        assert_eq!(StatName::PoisonRes.magic_res_type(), None);
    }
}
