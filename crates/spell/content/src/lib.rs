//! Authored-content loading for the spell rules engine.
//!
//! `spell-content` sits at the system boundary: it reads loosely-typed RON
//! catalog files (rune registry, named-spell blueprints) and converts them
//! into `spell-core`'s closed, strongly-typed entities through explicit
//! conversion functions. The core never sees the raw file representation.
pub mod loaders;

pub use loaders::{BlueprintLoader, ContentFactory, LoadResult, RuneLoader};
