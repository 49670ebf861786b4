//! Subset scoring.
//!
//! [`Evaluator`] turns a [`Subset`] and a [`WeightVector`] into a
//! [`ScoredResult`](crate::table::ScoredResult):
//!
//! ```text
//! score = Σ_effect base_total[effect] · w[effect]
//!       + Σ_bonus Σ_effect bonus[effect] · w[effect]
//! ```
//!
//! Weights are always an explicit argument; the evaluator reads no ambient
//! state.

mod evaluator;
mod weights;

pub use evaluator::{Evaluator, Subset};
pub use weights::WeightVector;
