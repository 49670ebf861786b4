//! Bonus rule definitions.

use crate::catalog::{Effect, EffectVector};

/// One condition of a bonus unlock predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Requirement {
    /// The subset must contain this resource.
    Resource(String),
    /// This bonus must already be unlocked earlier in the same pass.
    Bonus(String),
}

impl Requirement {
    /// The resource or bonus name this requirement refers to.
    pub fn name(&self) -> &str {
        match self {
            Requirement::Resource(n) | Requirement::Bonus(n) => n,
        }
    }
}

/// A derived bonus and the condition that unlocks it.
///
/// The predicate is the conjunction of all `requires` entries. A rule with
/// no requirements always unlocks.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::bonus::BonusRule;
/// use cn_resource_optimizer::catalog::Effect;
///
/// let asphalt = BonusRule::new("Asphalt")
///     .requires_bonus("Construction")
///     .requires_resources(&["Oil", "Rubber"])
///     .with_effect(Effect::InfraUpkeepReduction, 5.0);
/// assert_eq!(asphalt.requires.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusRule {
    /// Unique bonus name. Must not collide with a resource name.
    pub name: String,
    /// Conditions that must all hold for the bonus to unlock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires: Vec<Requirement>,
    /// Effects granted while the bonus is unlocked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: EffectVector,
}

impl BonusRule {
    /// Creates a rule with no requirements and no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires: Vec::new(),
            effects: EffectVector::new(),
        }
    }

    /// Adds a required resource.
    pub fn requires_resource(mut self, name: impl Into<String>) -> Self {
        self.requires.push(Requirement::Resource(name.into()));
        self
    }

    /// Adds several required resources.
    pub fn requires_resources(self, names: &[&str]) -> Self {
        names
            .iter()
            .fold(self, |rule, name| rule.requires_resource(*name))
    }

    /// Adds a required, earlier-declared bonus.
    pub fn requires_bonus(mut self, name: impl Into<String>) -> Self {
        self.requires.push(Requirement::Bonus(name.into()));
        self
    }

    /// Sets one effect of the bonus.
    pub fn with_effect(mut self, effect: Effect, value: f64) -> Self {
        self.effects = self.effects.with(effect, value);
        self
    }

    /// Names of the bonuses this rule depends on.
    pub fn bonus_dependencies(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().filter_map(|r| match r {
            Requirement::Bonus(n) => Some(n.as_str()),
            Requirement::Resource(_) => None,
        })
    }
}
