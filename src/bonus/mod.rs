//! Bonus rules.
//!
//! A bonus is a derived entity unlocked when a subset holds a set of
//! ingredient resources and, for multi-level bonuses, when prerequisite
//! bonuses have already unlocked. Rules form a dependency order rather than
//! a set: [`BonusRuleSet::resolve`] walks them once, in declaration order,
//! into an accumulating unlocked set, so a rule may only depend on bonuses
//! declared before it.
//!
//! # Built-in chains
//!
//! ```text
//! Construction + Oil + Rubber             -> Asphalt
//! Asphalt + Steel                         -> Automobile
//! Construction + Microchips + Steel       -> Radiation Cleanup
//! ```

mod compiled;
mod rules;
mod types;

pub(crate) use compiled::CompiledRules;
pub use rules::BonusRuleSet;
pub use types::{BonusRule, Requirement};
