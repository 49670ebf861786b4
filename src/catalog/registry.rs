//! The resource catalog.

use super::types::{Effect, EffectVector, Resource};
use crate::ConfigError;
use std::collections::HashMap;

/// Read-only mapping from resource name to its effect vector.
///
/// Built once and never mutated. Resource order is declaration order, which
/// is also the order members are listed in within a scored result.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::catalog::{Catalog, Effect};
///
/// let catalog = Catalog::cybernations();
/// assert_eq!(catalog.len(), 20);
/// assert_eq!(catalog.effect("Gold", Effect::IncomeBonus), 3.0);
/// assert_eq!(catalog.effect("Gold", Effect::Happiness), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Resource>", into = "Vec<Resource>")
)]
pub struct Catalog {
    names: Vec<String>,
    effects: Vec<EffectVector>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Largest supported catalog. Subsets are tracked as 128-bit masks.
    pub const MAX_RESOURCES: usize = 128;

    /// Builds a catalog from resource entries.
    ///
    /// # Errors
    ///
    /// Rejects empty or duplicate names, non-finite effect values, and
    /// catalogs larger than [`Catalog::MAX_RESOURCES`].
    pub fn new<I: IntoIterator<Item = Resource>>(resources: I) -> Result<Self, ConfigError> {
        let mut names = Vec::new();
        let mut effects = Vec::new();
        let mut index = HashMap::new();

        for resource in resources {
            if resource.name.is_empty() {
                return Err(ConfigError::EmptyResourceName);
            }
            if index.contains_key(&resource.name) {
                return Err(ConfigError::DuplicateResource(resource.name));
            }
            if let Some((effect, value)) = resource.effects.first_non_finite() {
                return Err(ConfigError::NonFiniteEffect {
                    owner: resource.name,
                    effect,
                    value,
                });
            }
            index.insert(resource.name.clone(), names.len());
            names.push(resource.name);
            effects.push(resource.effects);
        }

        if names.len() > Self::MAX_RESOURCES {
            return Err(ConfigError::CatalogTooLarge(names.len()));
        }

        Ok(Self {
            names,
            effects,
            index,
        })
    }

    /// The 20 standard CyberNations trade resources.
    pub fn cybernations() -> Self {
        use Effect::*;

        let table: [(&str, &[(Effect, f64)]); 20] = [
            ("Aluminum", &[(InfraCostReduction, 7.0), (SoldierEfficiency, 20.0)]),
            ("Cattle", &[(PopulationBonus, 5.0), (LandCostReduction, 10.0)]),
            (
                "Coal",
                &[(LandBonus, 15.0), (InfraCostReduction, 4.0), (SoldierEfficiency, 8.0)],
            ),
            ("Fish", &[(PopulationBonus, 8.0), (LandCostReduction, 5.0)]),
            ("Furs", &[(IncomeBonus, 3.5)]),
            ("Gems", &[(IncomeBonus, 1.5), (Happiness, 2.5)]),
            ("Gold", &[(IncomeBonus, 3.0)]),
            ("Iron", &[(InfraCostReduction, 5.0)]),
            ("Lead", &[]),
            ("Lumber", &[(InfraCostReduction, 6.0)]),
            ("Marble", &[(InfraCostReduction, 10.0)]),
            ("Oil", &[(SoldierEfficiency, 10.0)]),
            ("Pigs", &[(PopulationBonus, 3.5), (SoldierEfficiency, 15.0)]),
            (
                "Rubber",
                &[(LandBonus, 20.0), (LandCostReduction, 10.0), (InfraCostReduction, 3.0)],
            ),
            ("Silver", &[(IncomeBonus, 2.0), (Happiness, 2.0)]),
            ("Spices", &[(LandBonus, 8.0), (Happiness, 2.0)]),
            ("Sugar", &[(PopulationBonus, 3.0), (Happiness, 1.0)]),
            ("Uranium", &[]),
            ("Water", &[(Happiness, 2.5)]),
            ("Wheat", &[(PopulationBonus, 8.0)]),
        ];

        let mut names = Vec::with_capacity(table.len());
        let mut effects = Vec::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());
        for (i, (name, pairs)) in table.iter().enumerate() {
            names.push(name.to_string());
            effects.push(EffectVector::from_pairs(pairs.iter().copied()));
            index.insert(name.to_string(), i);
        }

        Self {
            names,
            effects,
            index,
        }
    }

    /// A smaller catalog holding only `names`, in this catalog's order.
    ///
    /// Names not present here are ignored.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let keep: Vec<usize> = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, n)| names.iter().any(|k| k.as_ref() == n.as_str()))
            .map(|(i, _)| i)
            .collect();

        let index = keep
            .iter()
            .enumerate()
            .map(|(new, &old)| (self.names[old].clone(), new))
            .collect();

        Self {
            names: keep.iter().map(|&i| self.names[i].clone()).collect(),
            effects: keep.iter().map(|&i| self.effects[i]).collect(),
            index,
        }
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resource names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `name` is a catalog resource.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declaration index of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name at declaration index `i`.
    pub fn name(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    /// Effect vector of `name`, or `None` for an unknown resource.
    pub fn effects(&self, name: &str) -> Option<&EffectVector> {
        self.index_of(name).map(|i| &self.effects[i])
    }

    /// One effect of one resource. Unknown resources and undefined effects
    /// both read as `0.0`.
    pub fn effect(&self, name: &str, effect: Effect) -> f64 {
        self.effects(name).map_or(0.0, |v| v.get(effect))
    }

    /// Iterates `(name, effects)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EffectVector)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.effects.iter())
    }

    pub(crate) fn effects_at(&self, i: usize) -> &EffectVector {
        &self.effects[i]
    }
}

impl TryFrom<Vec<Resource>> for Catalog {
    type Error = ConfigError;

    fn try_from(resources: Vec<Resource>) -> Result<Self, Self::Error> {
        Self::new(resources)
    }
}

impl From<Catalog> for Vec<Resource> {
    fn from(catalog: Catalog) -> Self {
        catalog
            .names
            .into_iter()
            .zip(catalog.effects)
            .map(|(name, effects)| Resource { name, effects })
            .collect()
    }
}
