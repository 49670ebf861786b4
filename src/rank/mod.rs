//! Exhaustive ranking.
//!
//! Enumerates every K-combination of a resource pool, scores each with an
//! [`Evaluator`](crate::scoring::Evaluator), applies the optional
//! required-member and required-bonus filters, and sorts the survivors.
//!
//! - [`RankConfig`]: subset size, pool and filters
//! - [`Ranker`]: runs one ranking
//! - [`RankCache`]: memoizes rankings by input
//!
//! A required member is fixed up front and only the remaining K−1 slots are
//! enumerated, so the work is C(n−1, K−1) rather than C(n, K).
//!
//! With the `parallel` feature, candidates are evaluated across the rayon
//! thread pool. The final sort uses a total order, so parallel and
//! sequential runs return identical tables.

mod cache;
mod config;
mod runner;

pub use cache::RankCache;
pub use config::RankConfig;
pub use runner::Ranker;
