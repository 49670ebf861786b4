//! Single-subset evaluation.

use super::weights::WeightVector;
use crate::bonus::{BonusRuleSet, CompiledRules};
use crate::catalog::{Catalog, EffectVector};
use crate::table::ScoredResult;
use crate::ConfigError;

/// An unordered selection of distinct catalog resources.
///
/// Obtained from [`Evaluator::subset`], which guarantees every member is a
/// catalog resource and none is repeated. Two subsets are equal iff they
/// hold the same resources, whatever order the names were given in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subset {
    /// Catalog indices, ascending.
    indices: Vec<usize>,
    mask: u128,
}

impl Subset {
    pub(crate) fn from_sorted(indices: Vec<usize>) -> Self {
        let mask = indices.iter().fold(0u128, |m, &i| m | 1u128 << i);
        Self { indices, mask }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the subset is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub(crate) fn mask(&self) -> u128 {
        self.mask
    }
}

/// Scores subsets of a catalog under a bonus rule list.
///
/// The evaluator owns the static inputs of a computation and is a pure
/// function of `(subset, weights)`; it holds no mutable state and is
/// `Send + Sync`, so a single instance can serve parallel rankings.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::catalog::Effect;
/// use cn_resource_optimizer::scoring::{Evaluator, WeightVector};
///
/// let evaluator = Evaluator::cybernations();
/// let weights = WeightVector::new().with(Effect::InfraCostReduction, 1.0);
///
/// let subset = evaluator.subset(&["Coal", "Iron"]).unwrap();
/// let result = evaluator.evaluate(&subset, &weights);
///
/// // Coal 4 + Iron 5, plus Steel's 2
/// assert_eq!(result.score(), 11.0);
/// assert_eq!(result.bonuses(), ["Steel"]);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    catalog: Catalog,
    rules: BonusRuleSet,
    compiled: CompiledRules,
    /// Alphabetical rank of each catalog resource, by declaration index.
    name_rank: Vec<usize>,
}

impl Evaluator {
    /// Binds a catalog to a bonus rule list.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NameCollision`] if a bonus shares its name with a
    /// catalog resource.
    pub fn new(catalog: Catalog, rules: BonusRuleSet) -> Result<Self, ConfigError> {
        if let Some(name) = rules.names().find(|n| catalog.contains(n)) {
            return Err(ConfigError::NameCollision(name.to_string()));
        }
        Ok(Self::assemble(catalog, rules))
    }

    /// The built-in CyberNations catalog and bonus rules.
    pub fn cybernations() -> Self {
        Self::assemble(Catalog::cybernations(), BonusRuleSet::cybernations())
    }

    fn assemble(catalog: Catalog, rules: BonusRuleSet) -> Self {
        let compiled = CompiledRules::compile(&rules, &catalog);

        let mut alphabetical: Vec<usize> = (0..catalog.len()).collect();
        alphabetical.sort_by(|&a, &b| catalog.name(a).cmp(&catalog.name(b)));
        let mut name_rank = vec![0; catalog.len()];
        for (rank, &i) in alphabetical.iter().enumerate() {
            name_rank[i] = rank;
        }

        Self {
            catalog,
            rules,
            compiled,
            name_rank,
        }
    }

    /// The catalog being evaluated.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The bonus rules being applied.
    pub fn rules(&self) -> &BonusRuleSet {
        &self.rules
    }

    /// Builds a subset from member names.
    ///
    /// Returns `None` if a name is not in the catalog or appears twice.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Option<Subset> {
        let mut indices = names
            .iter()
            .map(|n| self.catalog.index_of(n.as_ref()))
            .collect::<Option<Vec<usize>>>()?;
        indices.sort_unstable();
        if indices.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }
        Some(Subset::from_sorted(indices))
    }

    /// Scores one subset.
    ///
    /// - base totals: member effect vectors summed per effect
    /// - base score: base totals weighed by `weights`
    /// - bonuses: rules resolved in declaration order
    /// - bonus score: each unlocked bonus's effects weighed by `weights`
    /// - score: base score + bonus score
    pub fn evaluate(&self, subset: &Subset, weights: &WeightVector) -> ScoredResult {
        self.evaluate_parts(subset.indices(), subset.mask(), weights)
    }

    /// Scores catalog indices given in ascending order.
    pub(crate) fn evaluate_indices(&self, indices: &[usize], weights: &WeightVector) -> ScoredResult {
        let mask = indices.iter().fold(0u128, |m, &i| m | 1u128 << i);
        self.evaluate_parts(indices, mask, weights)
    }

    fn evaluate_parts(&self, indices: &[usize], mask: u128, weights: &WeightVector) -> ScoredResult {
        let mut totals = EffectVector::new();
        for &i in indices {
            totals += self.catalog.effects_at(i);
        }
        let base_score = weights.weigh(&totals);

        let mut bonus_totals = EffectVector::new();
        let mut bonus_score = 0.0;
        let mut bonuses = Vec::new();
        for pos in self.compiled.resolve(mask) {
            let rule = &self.rules.rules()[pos];
            bonus_totals += &rule.effects;
            bonus_score += weights.weigh(&rule.effects);
            bonuses.push(rule.name.clone());
        }

        let members = indices
            .iter()
            .filter_map(|&i| self.catalog.name(i))
            .map(str::to_string)
            .collect();

        ScoredResult::new(members, totals, bonus_totals, bonuses, base_score, bonus_score)
    }

    /// Tie-break key: the subset's alphabetical ranks, ascending.
    ///
    /// Comparing keys of equal-size subsets orders them exactly as comparing
    /// their sorted member names.
    pub(crate) fn order_key(&self, indices: &[usize]) -> Vec<usize> {
        let mut key: Vec<usize> = indices.iter().map(|&i| self.name_rank[i]).collect();
        key.sort_unstable();
        key
    }
}
