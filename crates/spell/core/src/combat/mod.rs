//! Combat derivation and encounter resolution.

pub mod resolve;
pub mod stats;

pub use resolve::{SpellHitOutcome, resolve_spell_hit};
pub use stats::{CombatStats, derive};
