//! Weight vectors.

use crate::catalog::{Effect, EffectVector};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-effect multipliers reducing an effect vector to a scalar score.
///
/// Every effect not set weighs `0.0`. Weights are non-negative: negative
/// and non-finite values are clamped to `0.0` when set.
///
/// # Presets
///
/// ```
/// use cn_resource_optimizer::catalog::Effect;
/// use cn_resource_optimizer::scoring::WeightVector;
///
/// let w = WeightVector::dashboard();
/// assert_eq!(w.get(Effect::PopulationBonus), 4.0);
/// assert_eq!(w.get(Effect::IncomeBonus), 2.5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cn_resource_optimizer::catalog::Effect;
/// use cn_resource_optimizer::scoring::WeightVector;
///
/// let w = WeightVector::new()
///     .with(Effect::InfraCostReduction, 1.0)
///     .with(Effect::Happiness, -3.0);
/// assert_eq!(w.get(Effect::Happiness), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")
)]
pub struct WeightVector([f64; Effect::COUNT]);

impl WeightVector {
    /// All weights zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one weight, clamping negative and non-finite values to zero.
    pub fn with(mut self, effect: Effect, weight: f64) -> Self {
        self.set(effect, weight);
        self
    }

    /// Sets one weight in place, with the same clamping as [`with`](Self::with).
    pub fn set(&mut self, effect: Effect, weight: f64) {
        self.0[effect.index()] = if weight.is_finite() {
            weight.max(0.0)
        } else {
            0.0
        };
    }

    /// Builds weights from string keys. Unknown keys are ignored.
    pub fn from_keys<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut w = Self::new();
        for (key, weight) in pairs {
            match key.as_ref().parse::<Effect>() {
                Ok(effect) => w.set(effect, weight),
                Err(_) => debug!(key = key.as_ref(), "ignoring unknown weight key"),
            }
        }
        w
    }

    /// The dashboard's default weights.
    ///
    /// - Population 4, Land 4, Income 2.5
    /// - Infra cost 1, Soldier efficiency 1, Happiness 1
    pub fn dashboard() -> Self {
        Self::new()
            .with(Effect::PopulationBonus, 4.0)
            .with(Effect::LandBonus, 4.0)
            .with(Effect::InfraCostReduction, 1.0)
            .with(Effect::SoldierEfficiency, 1.0)
            .with(Effect::IncomeBonus, 2.5)
            .with(Effect::Happiness, 1.0)
    }

    /// Preset favouring income and happiness.
    pub fn economic() -> Self {
        Self::new()
            .with(Effect::IncomeBonus, 4.0)
            .with(Effect::Happiness, 3.0)
            .with(Effect::InfraCostReduction, 2.0)
            .with(Effect::InfraUpkeepReduction, 2.0)
            .with(Effect::TechCostReduction, 1.0)
            .with(Effect::PopulationBonus, 1.0)
    }

    /// Preset favouring soldier efficiency.
    pub fn military() -> Self {
        Self::new()
            .with(Effect::SoldierEfficiency, 4.0)
            .with(Effect::PopulationBonus, 2.0)
            .with(Effect::LandBonus, 1.0)
            .with(Effect::InfraCostReduction, 1.0)
    }

    /// Preset favouring land, population and cheap infrastructure.
    pub fn growth() -> Self {
        Self::new()
            .with(Effect::PopulationBonus, 3.0)
            .with(Effect::LandBonus, 3.0)
            .with(Effect::LandCostReduction, 2.0)
            .with(Effect::InfraCostReduction, 3.0)
            .with(Effect::InfraUpkeepReduction, 1.0)
    }

    /// Weight of `effect`.
    pub fn get(&self, effect: Effect) -> f64 {
        self.0[effect.index()]
    }

    /// Non-zero weights in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        Effect::ALL
            .iter()
            .map(move |&e| (e, self.get(e)))
            .filter(|&(_, w)| w != 0.0)
    }

    /// Dot product with an effect vector, summed in schema order.
    pub fn weigh(&self, effects: &EffectVector) -> f64 {
        effects
            .as_array()
            .iter()
            .zip(self.0.iter())
            .map(|(v, w)| v * w)
            .sum()
    }

    /// Exact bit pattern, usable as a hash key.
    pub(crate) fn bits(&self) -> [u64; Effect::COUNT] {
        self.0.map(f64::to_bits)
    }
}

impl From<BTreeMap<String, f64>> for WeightVector {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self::from_keys(map)
    }
}

impl From<WeightVector> for BTreeMap<String, f64> {
    fn from(w: WeightVector) -> Self {
        w.iter().map(|(e, v)| (e.key().to_string(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let w = WeightVector::default();
        for effect in Effect::ALL {
            assert_eq!(w.get(effect), 0.0);
        }
        assert_eq!(w.iter().count(), 0);
    }

    #[test]
    fn test_dashboard_preset() {
        let w = WeightVector::dashboard();
        assert!((w.get(Effect::PopulationBonus) - 4.0).abs() < 1e-10);
        assert!((w.get(Effect::LandBonus) - 4.0).abs() < 1e-10);
        assert!((w.get(Effect::InfraCostReduction) - 1.0).abs() < 1e-10);
        assert!((w.get(Effect::SoldierEfficiency) - 1.0).abs() < 1e-10);
        assert!((w.get(Effect::IncomeBonus) - 2.5).abs() < 1e-10);
        assert!((w.get(Effect::Happiness) - 1.0).abs() < 1e-10);
        assert_eq!(w.get(Effect::LandCostReduction), 0.0);
        assert_eq!(w.get(Effect::TechCostReduction), 0.0);
    }

    #[test]
    fn test_presets_are_non_negative() {
        for w in [
            WeightVector::dashboard(),
            WeightVector::economic(),
            WeightVector::military(),
            WeightVector::growth(),
        ] {
            assert!(w.iter().all(|(_, v)| v > 0.0));
        }
    }

    #[test]
    fn test_clamping() {
        let w = WeightVector::new()
            .with(Effect::Happiness, -1.0)
            .with(Effect::LandBonus, f64::NAN)
            .with(Effect::IncomeBonus, f64::INFINITY)
            .with(Effect::PopulationBonus, 0.5);
        assert_eq!(w.get(Effect::Happiness), 0.0);
        assert_eq!(w.get(Effect::LandBonus), 0.0);
        assert_eq!(w.get(Effect::IncomeBonus), 0.0);
        assert!((w.get(Effect::PopulationBonus) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_from_keys_ignores_unknown() {
        let w = WeightVector::from_keys([
            ("infra_cost_reduction", 1.0),
            ("income_bonus", 1.0),
            ("nuclear_readiness", 9.0),
        ]);
        assert!((w.get(Effect::InfraCostReduction) - 1.0).abs() < 1e-10);
        assert!((w.get(Effect::IncomeBonus) - 1.0).abs() < 1e-10);
        assert_eq!(w.iter().count(), 2);
    }

    #[test]
    fn test_weigh() {
        let w = WeightVector::new()
            .with(Effect::InfraCostReduction, 1.0)
            .with(Effect::IncomeBonus, 2.0);
        let v = EffectVector::new()
            .with(Effect::InfraCostReduction, 9.0)
            .with(Effect::IncomeBonus, 3.0)
            .with(Effect::Happiness, 100.0);
        // 9*1 + 3*2, happiness unweighted
        assert!((w.weigh(&v) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_bits_distinguish_weights() {
        let a = WeightVector::new().with(Effect::Happiness, 1.0);
        let b = WeightVector::new().with(Effect::Happiness, 1.0 + 1e-12);
        assert_ne!(a.bits(), b.bits());
        assert_eq!(a.bits(), a.bits());
    }

    #[test]
    fn test_map_round_trip() {
        let w = WeightVector::economic();
        let map: BTreeMap<String, f64> = w.into();
        assert_eq!(WeightVector::from(map), w);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_keys() {
        let w: WeightVector =
            serde_json::from_str(r#"{"income_bonus": 2.5, "happiness": -1, "unknown": 9}"#).unwrap();
        assert!((w.get(Effect::IncomeBonus) - 2.5).abs() < 1e-10);
        assert_eq!(w.get(Effect::Happiness), 0.0);
        assert_eq!(w.get(Effect::LandBonus), 0.0);
    }
}
