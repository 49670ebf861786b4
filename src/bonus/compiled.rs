//! Rule list lowered onto catalog indices.
//!
//! The ranker resolves bonuses for every candidate subset, so the name-based
//! predicates of [`BonusRuleSet`] are lowered once into bit masks over the
//! catalog's declaration indices.

use super::rules::BonusRuleSet;
use super::types::Requirement;
use crate::catalog::Catalog;
use tracing::debug;

#[derive(Debug, Clone)]
struct CompiledRule {
    /// Catalog resources the subset must contain.
    resources: u128,
    /// Earlier rule positions that must already be unlocked.
    bonuses: Vec<usize>,
    /// False when a requirement can never hold for this catalog.
    reachable: bool,
}

/// A [`BonusRuleSet`] bound to one [`Catalog`].
#[derive(Debug, Clone)]
pub(crate) struct CompiledRules {
    rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub(crate) fn compile(rules: &BonusRuleSet, catalog: &Catalog) -> Self {
        let compiled = rules
            .rules()
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let mut out = CompiledRule {
                    resources: 0,
                    bonuses: Vec::new(),
                    reachable: true,
                };
                for req in &rule.requires {
                    match req {
                        Requirement::Resource(name) => match catalog.index_of(name) {
                            Some(r) => out.resources |= 1u128 << r,
                            None => out.reachable = false,
                        },
                        Requirement::Bonus(name) => match rules.index_of(name) {
                            Some(j) if j < i => out.bonuses.push(j),
                            _ => out.reachable = false,
                        },
                    }
                }
                if !out.reachable {
                    debug!(bonus = %rule.name, "bonus unreachable for this catalog");
                }
                out
            })
            .collect();

        Self { rules: compiled }
    }

    /// Positions of the rules unlocked by a member mask, in evaluation order.
    pub(crate) fn resolve(&self, members: u128) -> Vec<usize> {
        let mut unlocked = vec![false; self.rules.len()];
        let mut order = Vec::new();

        for (i, rule) in self.rules.iter().enumerate() {
            let on = rule.reachable
                && members & rule.resources == rule.resources
                && rule.bonuses.iter().all(|&j| unlocked[j]);
            if on {
                unlocked[i] = true;
                order.push(i);
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusRule;

    fn mask(catalog: &Catalog, names: &[&str]) -> u128 {
        names
            .iter()
            .map(|n| 1u128 << catalog.index_of(n).unwrap())
            .fold(0, |m, b| m | b)
    }

    fn resolved_names<'r>(rules: &'r BonusRuleSet, positions: &[usize]) -> Vec<&'r str> {
        positions
            .iter()
            .map(|&i| rules.rules()[i].name.as_str())
            .collect()
    }

    #[test]
    fn test_matches_named_resolution() {
        let catalog = Catalog::cybernations();
        let rules = BonusRuleSet::cybernations();
        let compiled = CompiledRules::compile(&rules, &catalog);

        let members = [
            "Lumber", "Iron", "Marble", "Aluminum", "Oil", "Rubber", "Coal", "Gold", "Lead",
        ];
        let positions = compiled.resolve(mask(&catalog, &members));
        assert_eq!(resolved_names(&rules, &positions), rules.resolve(members));
    }

    #[test]
    fn test_missing_catalog_resource_unreachable() {
        let catalog = Catalog::cybernations().subset(&["Coal", "Iron", "Lumber", "Marble"]);
        let rules = BonusRuleSet::cybernations();
        let compiled = CompiledRules::compile(&rules, &catalog);

        // Construction needs Aluminum, which this catalog lacks
        let positions = compiled.resolve(mask(&catalog, &["Coal", "Iron", "Lumber", "Marble"]));
        assert_eq!(resolved_names(&rules, &positions), vec!["Steel"]);
    }

    #[test]
    fn test_forward_reference_unreachable() {
        let catalog = Catalog::cybernations();
        let rules = BonusRuleSet::new(vec![
            BonusRule::new("Early").requires_bonus("Late"),
            BonusRule::new("Late").requires_resource("Coal"),
        ])
        .unwrap();
        let compiled = CompiledRules::compile(&rules, &catalog);
        assert_eq!(compiled.resolve(mask(&catalog, &["Coal"])), vec![1]);
    }

    #[test]
    fn test_empty_mask() {
        let catalog = Catalog::cybernations();
        let rules = BonusRuleSet::cybernations();
        let compiled = CompiledRules::compile(&rules, &catalog);
        assert!(compiled.resolve(0).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn compiled_matches_named(picks in prop::collection::btree_set(0usize..20, 0..=12)) {
                let catalog = Catalog::cybernations();
                let rules = BonusRuleSet::cybernations();
                let compiled = CompiledRules::compile(&rules, &catalog);

                let members: Vec<&str> = picks.iter().filter_map(|&i| catalog.name(i)).collect();
                let positions = compiled.resolve(mask(&catalog, &members));
                prop_assert_eq!(resolved_names(&rules, &positions), rules.resolve(members.iter().copied()));
            }
        }
    }
}
