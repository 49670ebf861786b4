//! Memoized rankings.

use super::config::RankConfig;
use super::runner::Ranker;
use crate::catalog::Effect;
use crate::scoring::{Evaluator, WeightVector};
use crate::table::ResultTable;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    weights: [u64; Effect::COUNT],
    config: RankConfig,
}

/// Memoizes rankings for one evaluator.
///
/// A ranking is a pure function of the evaluator, the weights and the
/// config, so identical requests can share one table. Weights are matched
/// by exact bit pattern; the `parallel` flag and pool order are not part
/// of the key.
///
/// A K = 12 table over the built-in catalog holds about 126k rows, so the
/// cache keeps at most [`RankCache::DEFAULT_CAPACITY`] tables unless
/// [`with_capacity`](RankCache::with_capacity) says otherwise. When full,
/// every stored table is dropped before the next one is inserted.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::prelude::*;
/// use std::sync::Arc;
///
/// let evaluator = Evaluator::cybernations();
/// let mut cache = RankCache::new(&evaluator);
/// let config = RankConfig::default().with_subset_size(2);
///
/// let a = cache.rank(&WeightVector::dashboard(), &config);
/// let b = cache.rank(&WeightVector::dashboard(), &config);
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct RankCache<'e> {
    evaluator: &'e Evaluator,
    entries: HashMap<CacheKey, Arc<ResultTable>>,
    capacity: usize,
}

impl<'e> RankCache<'e> {
    /// Tables kept by a cache built with [`RankCache::new`].
    pub const DEFAULT_CAPACITY: usize = 8;

    /// A cache holding up to [`RankCache::DEFAULT_CAPACITY`] tables.
    pub fn new(evaluator: &'e Evaluator) -> Self {
        Self {
            evaluator,
            entries: HashMap::new(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Sets the maximum number of stored tables (at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Maximum number of stored tables.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached table or computes and stores it.
    pub fn rank(&mut self, weights: &WeightVector, config: &RankConfig) -> Arc<ResultTable> {
        let key = CacheKey {
            weights: weights.bits(),
            config: config.cache_key(),
        };
        if let Some(table) = self.entries.get(&key) {
            debug!("rank cache hit");
            return Arc::clone(table);
        }

        let table = Arc::new(Ranker::rank(self.evaluator, weights, config));
        if self.entries.len() >= self.capacity {
            debug!(evicted = self.entries.len(), "rank cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(key, Arc::clone(&table));
        table
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every stored table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
