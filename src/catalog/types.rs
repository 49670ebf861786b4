//! Effect schema and effect vectors.

use crate::ConfigError;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// A named numeric effect in the fixed schema.
///
/// The schema is closed: every effect vector and weight vector carries
/// exactly one slot per variant, and an effect a resource does not define
/// reads as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    /// Population bonus (%).
    PopulationBonus,
    /// Land bonus (miles).
    LandBonus,
    /// Land purchase cost reduction (%).
    LandCostReduction,
    /// Infrastructure purchase cost reduction (%).
    InfraCostReduction,
    /// Infrastructure upkeep reduction (%).
    InfraUpkeepReduction,
    /// Soldier efficiency (%).
    SoldierEfficiency,
    /// Citizen income bonus ($).
    IncomeBonus,
    /// Happiness.
    Happiness,
    /// Technology cost reduction (%).
    TechCostReduction,
}

impl Effect {
    /// Number of effects in the schema.
    pub const COUNT: usize = 9;

    /// All effects in schema order.
    ///
    /// This is also the column order used when exporting a table.
    pub const ALL: [Effect; Effect::COUNT] = [
        Effect::PopulationBonus,
        Effect::LandBonus,
        Effect::LandCostReduction,
        Effect::InfraCostReduction,
        Effect::InfraUpkeepReduction,
        Effect::SoldierEfficiency,
        Effect::IncomeBonus,
        Effect::Happiness,
        Effect::TechCostReduction,
    ];

    /// The snake_case key of this effect.
    pub fn key(self) -> &'static str {
        match self {
            Effect::PopulationBonus => "population_bonus",
            Effect::LandBonus => "land_bonus",
            Effect::LandCostReduction => "land_cost_reduction",
            Effect::InfraCostReduction => "infra_cost_reduction",
            Effect::InfraUpkeepReduction => "infra_upkeep_reduction",
            Effect::SoldierEfficiency => "soldier_efficiency",
            Effect::IncomeBonus => "income_bonus",
            Effect::Happiness => "happiness",
            Effect::TechCostReduction => "tech_cost_reduction",
        }
    }

    /// Slot of this effect in [`Effect::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Effect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .iter()
            .copied()
            .find(|e| e.key() == s)
            .ok_or_else(|| ConfigError::UnknownEffect(s.to_string()))
    }
}

/// A fixed-schema vector of effect values.
///
/// Missing effects are `0.0`. Serialized as a map holding only the
/// non-zero entries, keyed by [`Effect::key`].
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::catalog::{Effect, EffectVector};
///
/// let coal = EffectVector::new()
///     .with(Effect::LandBonus, 15.0)
///     .with(Effect::InfraCostReduction, 4.0);
/// assert_eq!(coal.get(Effect::LandBonus), 15.0);
/// assert_eq!(coal.get(Effect::Happiness), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<String, f64>",
        into = "BTreeMap<String, f64>"
    )
)]
pub struct EffectVector([f64; Effect::COUNT]);

impl EffectVector {
    /// The zero vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one effect value.
    pub fn with(mut self, effect: Effect, value: f64) -> Self {
        self.0[effect.index()] = value;
        self
    }

    /// Builds a vector from `(effect, value)` pairs. Later pairs win.
    pub fn from_pairs<I: IntoIterator<Item = (Effect, f64)>>(pairs: I) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |v, (effect, value)| v.with(effect, value))
    }

    /// Value of `effect`, `0.0` when undefined.
    pub fn get(&self, effect: Effect) -> f64 {
        self.0[effect.index()]
    }

    /// Non-zero entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        Effect::ALL
            .iter()
            .map(move |&e| (e, self.get(e)))
            .filter(|&(_, v)| v != 0.0)
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// First entry that is NaN or infinite, if any.
    pub(crate) fn first_non_finite(&self) -> Option<(Effect, f64)> {
        Effect::ALL
            .iter()
            .map(|&e| (e, self.get(e)))
            .find(|&(_, v)| !v.is_finite())
    }

    pub(crate) fn as_array(&self) -> &[f64; Effect::COUNT] {
        &self.0
    }
}

impl AddAssign<&EffectVector> for EffectVector {
    fn add_assign(&mut self, rhs: &EffectVector) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for EffectVector {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        map.into_iter().try_fold(Self::new(), |v, (key, value)| {
            Ok(v.with(key.parse()?, value))
        })
    }
}

impl From<EffectVector> for BTreeMap<String, f64> {
    fn from(v: EffectVector) -> Self {
        v.iter().map(|(e, value)| (e.key().to_string(), value)).collect()
    }
}

/// A named catalog entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    /// Unique resource name.
    pub name: String,
    /// Effects granted by holding this resource.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: EffectVector,
}

impl Resource {
    /// Creates a resource entry.
    pub fn new(name: impl Into<String>, effects: EffectVector) -> Self {
        Self {
            name: name.into(),
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_keys_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(effect.key().parse::<Effect>(), Ok(effect));
        }
    }

    #[test]
    fn test_effect_index_matches_all() {
        for (i, effect) in Effect::ALL.iter().enumerate() {
            assert_eq!(effect.index(), i);
        }
    }

    #[test]
    fn test_unknown_effect_key() {
        assert_eq!(
            "morale".parse::<Effect>(),
            Err(ConfigError::UnknownEffect("morale".into()))
        );
    }

    #[test]
    fn test_missing_effect_is_zero() {
        let v = EffectVector::new().with(Effect::IncomeBonus, 3.0);
        assert!((v.get(Effect::IncomeBonus) - 3.0).abs() < 1e-10);
        assert_eq!(v.get(Effect::PopulationBonus), 0.0);
        assert_eq!(v.get(Effect::TechCostReduction), 0.0);
    }

    #[test]
    fn test_iter_skips_zeros() {
        let v = EffectVector::from_pairs([
            (Effect::Happiness, 2.5),
            (Effect::IncomeBonus, 1.5),
            (Effect::LandBonus, 0.0),
        ]);
        let entries: Vec<_> = v.iter().collect();
        // schema order, not insertion order
        assert_eq!(
            entries,
            vec![(Effect::IncomeBonus, 1.5), (Effect::Happiness, 2.5)]
        );
    }

    #[test]
    fn test_add_assign() {
        let mut total = EffectVector::new().with(Effect::InfraCostReduction, 4.0);
        total += &EffectVector::new()
            .with(Effect::InfraCostReduction, 5.0)
            .with(Effect::SoldierEfficiency, 8.0);
        assert!((total.get(Effect::InfraCostReduction) - 9.0).abs() < 1e-10);
        assert!((total.get(Effect::SoldierEfficiency) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_first_non_finite() {
        let ok = EffectVector::new().with(Effect::Happiness, 1.0);
        assert!(ok.first_non_finite().is_none());

        let bad = ok.with(Effect::LandBonus, f64::NAN);
        let (effect, value) = bad.first_non_finite().unwrap();
        assert_eq!(effect, Effect::LandBonus);
        assert!(value.is_nan());
    }

    #[test]
    fn test_map_conversion_rejects_unknown_key() {
        let mut map = BTreeMap::new();
        map.insert("happiness".to_string(), 2.0);
        assert!(EffectVector::try_from(map.clone()).is_ok());

        map.insert("morale".to_string(), 1.0);
        assert!(EffectVector::try_from(map).is_err());
    }

    #[test]
    fn test_map_conversion_drops_zeros() {
        let v = EffectVector::new()
            .with(Effect::Happiness, 2.0)
            .with(Effect::LandBonus, 0.0);
        let map: BTreeMap<String, f64> = v.into();
        assert_eq!(map.len(), 1);
        assert!((map["happiness"] - 2.0).abs() < 1e-10);
    }
}
