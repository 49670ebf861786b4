//! Configuration errors raised while building a catalog or rule list.

use crate::catalog::{Catalog, Effect};
use thiserror::Error;

/// A malformed catalog or bonus rule definition.
///
/// These are rejected when the catalog, the rule list, or the
/// [`Evaluator`](crate::scoring::Evaluator) is built. Ranking itself never
/// fails: unusable ranking inputs produce an empty table instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Two catalog entries share a name.
    #[error("duplicate resource `{0}`")]
    DuplicateResource(String),

    /// A catalog entry has an empty name.
    #[error("resource name must not be empty")]
    EmptyResourceName,

    /// Two bonus rules share a name.
    #[error("duplicate bonus `{0}`")]
    DuplicateBonus(String),

    /// A bonus rule has an empty name.
    #[error("bonus name must not be empty")]
    EmptyBonusName,

    /// A bonus shares its name with a catalog resource.
    #[error("bonus `{0}` collides with a resource of the same name")]
    NameCollision(String),

    /// A bonus requires another bonus that is never declared.
    #[error("bonus `{bonus}` requires undeclared bonus `{missing}`")]
    UnknownBonus {
        /// The rule holding the requirement.
        bonus: String,
        /// The bonus name that could not be found.
        missing: String,
    },

    /// An effect value is NaN or infinite.
    #[error("`{owner}` has non-finite {effect} value {value}")]
    NonFiniteEffect {
        /// Resource or bonus carrying the value.
        owner: String,
        /// Offending effect.
        effect: Effect,
        /// Offending value.
        value: f64,
    },

    /// The catalog exceeds [`Catalog::MAX_RESOURCES`].
    #[error("catalog holds {0} resources, at most {max} are supported", max = Catalog::MAX_RESOURCES)]
    CatalogTooLarge(usize),

    /// An effect key outside the fixed schema.
    #[error("unknown effect key `{0}`")]
    UnknownEffect(String),
}
