//! Ordered bonus rule list and its resolution pass.

use super::types::{BonusRule, Requirement};
use crate::catalog::Effect;
use crate::ConfigError;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// An ordered list of bonus rules.
///
/// Rules are evaluated strictly in declaration order, each one against the
/// subset and the bonuses unlocked *earlier in the same pass*. A rule that
/// depends on a bonus declared later (or on itself) can therefore never
/// unlock; such rules are accepted but reported with a `tracing` warning.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::bonus::BonusRuleSet;
///
/// let rules = BonusRuleSet::cybernations();
/// let unlocked = rules.resolve(["Lumber", "Iron", "Marble", "Aluminum", "Oil", "Rubber"]);
/// assert_eq!(unlocked, vec!["Construction", "Asphalt"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<BonusRule>", into = "Vec<BonusRule>")
)]
pub struct BonusRuleSet {
    rules: Vec<BonusRule>,
    index: HashMap<String, usize>,
}

impl BonusRuleSet {
    /// Builds a rule set, keeping the given order.
    ///
    /// # Errors
    ///
    /// Rejects empty or duplicate bonus names, non-finite effect values,
    /// and bonus requirements naming a bonus that is never declared.
    pub fn new<I: IntoIterator<Item = BonusRule>>(rules: I) -> Result<Self, ConfigError> {
        let rules: Vec<BonusRule> = rules.into_iter().collect();
        let mut index = HashMap::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            if rule.name.is_empty() {
                return Err(ConfigError::EmptyBonusName);
            }
            if index.insert(rule.name.clone(), i).is_some() {
                return Err(ConfigError::DuplicateBonus(rule.name.clone()));
            }
            if let Some((effect, value)) = rule.effects.first_non_finite() {
                return Err(ConfigError::NonFiniteEffect {
                    owner: rule.name.clone(),
                    effect,
                    value,
                });
            }
        }

        for (i, rule) in rules.iter().enumerate() {
            for dep in rule.bonus_dependencies() {
                match index.get(dep) {
                    None => {
                        return Err(ConfigError::UnknownBonus {
                            bonus: rule.name.clone(),
                            missing: dep.to_string(),
                        })
                    }
                    Some(&j) if j >= i => {
                        warn!(
                            bonus = %rule.name,
                            requires = dep,
                            "bonus depends on a bonus declared at or after it and can never unlock"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(Self { rules, index })
    }

    /// An empty rule set.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The standard CyberNations bonus resources reachable from the
    /// 20-resource catalog, in dependency order.
    pub fn cybernations() -> Self {
        use Effect::*;

        let rules = vec![
            BonusRule::new("Beer")
                .requires_resources(&["Water", "Wheat", "Lumber", "Aluminum"])
                .with_effect(Happiness, 2.0),
            BonusRule::new("Construction")
                .requires_resources(&["Lumber", "Iron", "Marble", "Aluminum"])
                .with_effect(InfraCostReduction, 5.0),
            BonusRule::new("Fast Food")
                .requires_resources(&["Cattle", "Sugar", "Spices", "Pigs"])
                .with_effect(Happiness, 2.0),
            BonusRule::new("Fine Jewelry")
                .requires_resources(&["Gold", "Silver", "Gems", "Coal"])
                .with_effect(Happiness, 3.0),
            BonusRule::new("Microchips")
                .requires_resources(&["Gold", "Lead", "Oil"])
                .with_effect(TechCostReduction, 8.0),
            BonusRule::new("Scholars")
                .requires_resources(&["Lumber", "Lead"])
                .with_effect(IncomeBonus, 3.0),
            BonusRule::new("Steel")
                .requires_resources(&["Coal", "Iron"])
                .with_effect(InfraCostReduction, 2.0),
            BonusRule::new("Asphalt")
                .requires_bonus("Construction")
                .requires_resources(&["Oil", "Rubber"])
                .with_effect(InfraUpkeepReduction, 5.0),
            BonusRule::new("Automobile")
                .requires_bonus("Asphalt")
                .requires_bonus("Steel")
                .with_effect(Happiness, 3.0),
            BonusRule::new("Radiation Cleanup")
                .requires_bonus("Construction")
                .requires_bonus("Microchips")
                .requires_bonus("Steel")
                .with_effect(Happiness, 1.0),
        ];

        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        Self { rules, index }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[BonusRule] {
        &self.rules
    }

    /// Looks up a rule by bonus name.
    pub fn get(&self, name: &str) -> Option<&BonusRule> {
        self.index_of(name).map(|i| &self.rules[i])
    }

    /// Evaluation position of a bonus.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether `name` is a declared bonus.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bonus names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Resolves the bonuses unlocked by a set of member names.
    ///
    /// Returns bonus names in evaluation order. Duplicate members are
    /// harmless; unknown names simply never satisfy a requirement.
    pub fn resolve<'a, I>(&self, members: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let members: HashSet<&str> = members.into_iter().collect();
        let mut unlocked = vec![false; self.rules.len()];

        for (i, rule) in self.rules.iter().enumerate() {
            let satisfied = rule.requires.iter().all(|req| match req {
                Requirement::Resource(name) => members.contains(name.as_str()),
                Requirement::Bonus(name) => self
                    .index_of(name)
                    .is_some_and(|j| j < i && unlocked[j]),
            });
            unlocked[i] = satisfied;
        }

        self.rules
            .iter()
            .zip(unlocked)
            .filter(|(_, on)| *on)
            .map(|(r, _)| r.name.as_str())
            .collect()
    }
}

impl Default for BonusRuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<BonusRule>> for BonusRuleSet {
    type Error = ConfigError;

    fn try_from(rules: Vec<BonusRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<BonusRuleSet> for Vec<BonusRule> {
    fn from(set: BonusRuleSet) -> Self {
        set.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_pass_validation() {
        let builtin = BonusRuleSet::cybernations();
        let validated = BonusRuleSet::new(builtin.rules().to_vec()).unwrap();
        assert_eq!(validated, builtin);
        assert_eq!(builtin.len(), 10);
    }

    #[test]
    fn test_simple_unlock() {
        let rules = BonusRuleSet::cybernations();
        assert_eq!(rules.resolve(["Coal", "Iron"]), vec!["Steel"]);
        assert!(rules.resolve(["Coal", "Gold"]).is_empty());
    }

    #[test]
    fn test_construction_then_asphalt() {
        let rules = BonusRuleSet::cybernations();
        let unlocked = rules.resolve(["Oil", "Rubber", "Lumber", "Iron", "Marble", "Aluminum"]);
        assert_eq!(unlocked, vec!["Construction", "Asphalt"]);
    }

    #[test]
    fn test_asphalt_needs_construction() {
        let rules = BonusRuleSet::cybernations();
        // Oil + Rubber alone do not unlock the chain bonus
        let unlocked = rules.resolve(["Oil", "Rubber", "Lumber", "Iron", "Marble"]);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_three_level_chain() {
        let rules = BonusRuleSet::cybernations();
        let unlocked = rules.resolve([
            "Lumber", "Iron", "Marble", "Aluminum", "Oil", "Rubber", "Coal",
        ]);
        assert_eq!(
            unlocked,
            vec!["Construction", "Steel", "Asphalt", "Automobile"]
        );
    }

    #[test]
    fn test_radiation_cleanup() {
        let rules = BonusRuleSet::cybernations();
        let unlocked = rules.resolve([
            "Lumber", "Iron", "Marble", "Aluminum", "Gold", "Lead", "Oil", "Coal",
        ]);
        assert!(unlocked.contains(&"Radiation Cleanup"));
        assert_eq!(unlocked.last(), Some(&"Radiation Cleanup"));

        // Missing Microchips (no Gold): no cleanup
        let unlocked = rules.resolve(["Lumber", "Iron", "Marble", "Aluminum", "Lead", "Oil", "Coal"]);
        assert!(!unlocked.contains(&"Radiation Cleanup"));
    }

    #[test]
    fn test_bonus_name_as_member_does_not_count() {
        let rules = BonusRuleSet::cybernations();
        // Naming the bonus in the member list is not the same as unlocking it
        let unlocked = rules.resolve(["Construction", "Oil", "Rubber"]);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let rules = BonusRuleSet::cybernations();
        let members = [
            "Gold", "Silver", "Gems", "Coal", "Iron", "Lumber", "Lead", "Oil",
        ];
        let first = rules.resolve(members);
        let second = rules.resolve(members.iter().rev().copied());
        assert_eq!(first, second);
        assert_eq!(first, vec!["Fine Jewelry", "Microchips", "Scholars", "Steel"]);
    }

    #[test]
    fn test_forward_reference_never_unlocks() {
        let rules = BonusRuleSet::new(vec![
            BonusRule::new("Early").requires_bonus("Late"),
            BonusRule::new("Late").requires_resource("Coal"),
        ])
        .unwrap();
        assert_eq!(rules.resolve(["Coal"]), vec!["Late"]);
    }

    #[test]
    fn test_self_reference_never_unlocks() {
        let rules = BonusRuleSet::new(vec![BonusRule::new("Loop")
            .requires_bonus("Loop")
            .requires_resource("Coal")])
        .unwrap();
        assert!(rules.resolve(["Coal"]).is_empty());
    }

    #[test]
    fn test_empty_requirements_always_unlock() {
        let rules = BonusRuleSet::new(vec![BonusRule::new("Free")]).unwrap();
        assert_eq!(rules.resolve(std::iter::empty()), vec!["Free"]);
    }

    #[test]
    fn test_undeclared_dependency_rejected() {
        let err = BonusRuleSet::new(vec![BonusRule::new("Asphalt").requires_bonus("Construction")])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownBonus {
                bonus: "Asphalt".into(),
                missing: "Construction".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_bonus_rejected() {
        let err = BonusRuleSet::new(vec![BonusRule::new("Steel"), BonusRule::new("Steel")])
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateBonus("Steel".into()));
    }

    #[test]
    fn test_empty_bonus_name_rejected() {
        let err = BonusRuleSet::new(vec![BonusRule::new("")]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyBonusName);
    }

    #[test]
    fn test_non_finite_bonus_effect_rejected() {
        let err = BonusRuleSet::new(vec![
            BonusRule::new("Beer").with_effect(Effect::Happiness, f64::NAN)
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteEffect { .. }));
    }

    #[test]
    fn test_lookup() {
        let rules = BonusRuleSet::cybernations();
        assert_eq!(rules.index_of("Beer"), Some(0));
        assert_eq!(rules.index_of("Radiation Cleanup"), Some(9));
        assert!(rules.get("Steel").is_some());
        assert!(!rules.contains("Wine"));
        assert_eq!(rules.names().count(), 10);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rule_set() {
        let json = r#"[
            {"name": "Steel", "requires": [{"resource": "Coal"}, {"resource": "Iron"}],
             "effects": {"infra_cost_reduction": 2}},
            {"name": "Rail", "requires": [{"bonus": "Steel"}]}
        ]"#;
        let rules: BonusRuleSet = serde_json::from_str(json).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.resolve(["Coal", "Iron"]), vec!["Steel", "Rail"]);

        let again: BonusRuleSet = serde_json::from_str(&serde_json::to_string(&rules).unwrap()).unwrap();
        assert_eq!(again, rules);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_undeclared_bonus() {
        let json = r#"[{"name": "Rail", "requires": [{"bonus": "Steel"}]}]"#;
        assert!(serde_json::from_str::<BonusRuleSet>(json).is_err());
    }
}
