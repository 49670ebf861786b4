//! Ranking configuration.
//!
//! [`RankConfig`] holds every input of a ranking besides the evaluator and
//! the weights: which resources may appear, how many per subset, and which
//! filters apply.

use std::collections::BTreeSet;

/// Configuration for [`Ranker`](super::Ranker).
///
/// # Defaults
///
/// ```
/// use cn_resource_optimizer::rank::RankConfig;
///
/// let config = RankConfig::default();
/// assert_eq!(config.subset_size, 12);
/// assert!(config.pool.is_none());
/// assert!(config.required_member.is_none());
/// assert!(config.required_bonuses.is_empty());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cn_resource_optimizer::rank::RankConfig;
///
/// let config = RankConfig::default()
///     .with_subset_size(10)
///     .with_required_member("Uranium")
///     .with_required_bonus("Steel")
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankConfig {
    /// Number of resources per subset (K).
    pub subset_size: usize,

    /// Candidate resource names. `None` uses the whole catalog.
    ///
    /// Names absent from the catalog are ignored.
    pub pool: Option<Vec<String>>,

    /// A resource every subset must contain.
    pub required_member: Option<String>,

    /// Bonuses every kept subset must unlock.
    pub required_bonuses: BTreeSet<String>,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Output is identical
    /// either way.
    pub parallel: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            subset_size: 12,
            pool: None,
            required_member: None,
            required_bonuses: BTreeSet::new(),
            parallel: true,
        }
    }
}

impl RankConfig {
    /// Sets the subset size.
    pub fn with_subset_size(mut self, k: usize) -> Self {
        self.subset_size = k;
        self
    }

    /// Restricts candidates to the given resource names.
    pub fn with_pool<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Requires every subset to contain `name`.
    pub fn with_required_member(mut self, name: impl Into<String>) -> Self {
        self.required_member = Some(name.into());
        self
    }

    /// Adds a bonus every kept subset must unlock.
    pub fn with_required_bonus(mut self, name: impl Into<String>) -> Self {
        self.required_bonuses.insert(name.into());
        self
    }

    /// Replaces the required-bonus set.
    pub fn with_required_bonuses<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_bonuses = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks settings that can never produce a result.
    ///
    /// Returns `Err` with a description if any parameter is unusable. The
    /// ranker treats such configurations as an empty ranking rather than a
    /// failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.subset_size == 0 {
            return Err("subset_size must be at least 1".into());
        }
        if self.pool.as_ref().is_some_and(|p| p.is_empty()) {
            return Err("pool must not be empty".into());
        }
        if let (Some(member), Some(pool)) = (&self.required_member, &self.pool) {
            if !pool.contains(member) {
                return Err(format!("required member `{member}` is not in the pool"));
            }
        }
        Ok(())
    }

    /// Copy with execution-only settings normalized, for cache keys.
    pub(crate) fn cache_key(&self) -> Self {
        let mut key = self.clone();
        key.parallel = false;
        if let Some(pool) = key.pool.as_mut() {
            pool.sort();
            pool.dedup();
        }
        key
    }
}
