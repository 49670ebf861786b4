//! Exhaustive enumeration and ranking.
//!
//! [`Ranker`] drives the evaluator over every K-combination of the pool:
//! enumerate → evaluate → filter → sort.

use super::config::RankConfig;
use crate::catalog::Catalog;
use crate::scoring::{Evaluator, WeightVector};
use crate::table::{ResultTable, ScoredResult};
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A scored candidate with its tie-break key.
type Row = (Vec<usize>, ScoredResult);

/// Ranks every subset of a pool.
///
/// # Usage
///
/// ```
/// use cn_resource_optimizer::prelude::*;
///
/// let evaluator = Evaluator::cybernations();
/// let config = RankConfig::default()
///     .with_subset_size(3)
///     .with_required_member("Uranium")
///     .with_parallel(false);
///
/// let table = Ranker::rank(&evaluator, &WeightVector::dashboard(), &config);
/// assert_eq!(table.len(), 171); // C(19, 2)
/// assert!(table.iter().all(|r| r.contains("Uranium")));
/// ```
pub struct Ranker;

impl Ranker {
    /// Runs the ranking.
    ///
    /// Never fails: a zero subset size, a subset size larger than the pool,
    /// or a required member outside the catalog or pool all produce an
    /// empty table.
    pub fn rank(evaluator: &Evaluator, weights: &WeightVector, config: &RankConfig) -> ResultTable {
        if let Err(reason) = config.validate() {
            debug!(%reason, "empty ranking");
            return ResultTable::empty();
        }

        let catalog = evaluator.catalog();
        let mut pool = resolve_pool(catalog, config);

        let (fixed, k) = match &config.required_member {
            Some(name) => match catalog.index_of(name) {
                Some(i) if pool.contains(&i) => {
                    pool.retain(|&j| j != i);
                    (Some(i), config.subset_size - 1)
                }
                _ => {
                    debug!(member = %name, "required member not in catalog or pool");
                    return ResultTable::empty();
                }
            },
            None => (None, config.subset_size),
        };

        if k > pool.len() {
            debug!(
                subset_size = config.subset_size,
                pool = pool.len() + usize::from(fixed.is_some()),
                "subset size exceeds pool"
            );
            return ResultTable::empty();
        }

        if let Some(missing) = config
            .required_bonuses
            .iter()
            .find(|b| !evaluator.rules().contains(b))
        {
            debug!(bonus = %missing, "required bonus is not declared");
            return ResultTable::empty();
        }

        let score = |rest: Vec<usize>| -> Option<Row> {
            let indices = with_fixed(rest, fixed);
            let result = evaluator.evaluate_indices(&indices, weights);
            config
                .required_bonuses
                .iter()
                .all(|b| result.unlocked(b))
                .then(|| (evaluator.order_key(&indices), result))
        };

        let candidates = pool.iter().copied().combinations(k);
        let rows = collect_rows(candidates, score, config.parallel);

        debug!(
            pool = pool.len() + usize::from(fixed.is_some()),
            subset_size = config.subset_size,
            kept = rows.len(),
            parallel = config.parallel,
            "ranking complete"
        );

        ResultTable::from_sorted(rows.into_iter().map(|(_, r)| r).collect())
    }
}

/// Catalog indices of the configured pool, ascending and deduplicated.
fn resolve_pool(catalog: &Catalog, config: &RankConfig) -> Vec<usize> {
    let Some(names) = &config.pool else {
        return (0..catalog.len()).collect();
    };

    let mut pool: Vec<usize> = names
        .iter()
        .filter_map(|name| {
            let index = catalog.index_of(name);
            if index.is_none() {
                debug!(resource = %name, "ignoring pool name outside the catalog");
            }
            index
        })
        .collect();
    pool.sort_unstable();
    pool.dedup();
    pool
}

/// Inserts the fixed member, keeping indices ascending.
fn with_fixed(mut rest: Vec<usize>, fixed: Option<usize>) -> Vec<usize> {
    if let Some(i) = fixed {
        let at = rest.partition_point(|&j| j < i);
        rest.insert(at, i);
    }
    rest
}

/// Score descending, then the alphabetical member key.
fn row_order((ka, a): &Row, (kb, b): &Row) -> Ordering {
    b.score().total_cmp(&a.score()).then_with(|| ka.cmp(kb))
}

fn sort_rows(rows: &mut [Row]) {
    rows.sort_unstable_by(row_order);
}

#[cfg(feature = "parallel")]
fn collect_rows<C, F>(candidates: C, score: F, parallel: bool) -> Vec<Row>
where
    C: Iterator<Item = Vec<usize>> + Send,
    F: Fn(Vec<usize>) -> Option<Row> + Sync + Send,
{
    if parallel {
        let mut rows: Vec<Row> = candidates.par_bridge().filter_map(&score).collect();
        rows.par_sort_unstable_by(row_order);
        rows
    } else {
        let mut rows: Vec<Row> = candidates.filter_map(score).collect();
        sort_rows(&mut rows);
        rows
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_rows<C, F>(candidates: C, score: F, _parallel: bool) -> Vec<Row>
where
    C: Iterator<Item = Vec<usize>>,
    F: Fn(Vec<usize>) -> Option<Row>,
{
    let mut rows: Vec<Row> = candidates.filter_map(score).collect();
    sort_rows(&mut rows);
    rows
}

// ============================================================================
// Tests
// ============================================================================
