//! Exhaustive resource-combination ranking engine.
//!
//! Given a fixed catalog of trade resources (each with a vector of numeric
//! effects) and a user-supplied weight vector, the engine enumerates every
//! fixed-size subset of the catalog, scores it, and returns the subsets
//! ranked best first:
//!
//! - **Catalog**: read-only mapping from resource name to its
//!   [`EffectVector`](catalog::EffectVector).
//! - **Bonus rules**: an ordered rule list. A bonus unlocks when the subset
//!   holds its ingredient resources and every prerequisite bonus declared
//!   earlier in the list has already unlocked.
//! - **Scoring**: [`Evaluator`](scoring::Evaluator) sums base effects and
//!   unlocked bonus effects, then reduces them with a
//!   [`WeightVector`](scoring::WeightVector).
//! - **Ranking**: [`Ranker`](rank::Ranker) drives the evaluator over every
//!   candidate subset, applies the required-member and required-bonus
//!   filters, and sorts deterministically.
//! - **Result table**: [`ResultTable`](table::ResultTable) is what the
//!   presentation layer consumes; with the `export` feature it can be
//!   written to and read back from CSV.
//!
//! # Quick start
//!
//! ```
//! use cn_resource_optimizer::prelude::*;
//!
//! let evaluator = Evaluator::cybernations();
//! let weights = WeightVector::new()
//!     .with(Effect::InfraCostReduction, 1.0)
//!     .with(Effect::IncomeBonus, 1.0);
//! let config = RankConfig::default()
//!     .with_pool(["Coal", "Iron", "Gold", "Lead", "Oil", "Lumber", "Marble"])
//!     .with_subset_size(2);
//!
//! let table = Ranker::rank(&evaluator, &weights, &config);
//! assert_eq!(table.len(), 21);
//! ```
//!
//! # Determinism
//!
//! Every computation is a pure function of the catalog, the rule list, the
//! subset size, the weights, and the filters. Ties in score are broken by
//! the lexicographic order of each subset's sorted member names, so parallel
//! and sequential rankings are identical.

pub mod bonus;
pub mod catalog;
mod error;
pub mod rank;
pub mod scoring;
pub mod table;

pub use error::ConfigError;

/// Commonly used types.
pub mod prelude {
    pub use crate::bonus::{BonusRule, BonusRuleSet, Requirement};
    pub use crate::catalog::{Catalog, Effect, EffectVector, Resource};
    pub use crate::rank::{RankCache, RankConfig, Ranker};
    pub use crate::scoring::{Evaluator, Subset, WeightVector};
    pub use crate::table::{ResultTable, ScoredResult};
    pub use crate::ConfigError;
}
