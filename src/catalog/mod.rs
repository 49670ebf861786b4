//! Resource catalog.
//!
//! The catalog is the static input of every computation: a fixed list of
//! named resources, each carrying an [`EffectVector`] over the closed
//! [`Effect`] schema. Effects a resource does not define read as zero.

mod registry;
mod types;

pub use registry::Catalog;
pub use types::{Effect, EffectVector, Resource};
