//! Deterministic spell-crafting and combat-resolution rules engine.
//!
//! `spell-core` derives combat statistics from rune sequences, tracks
//! long-term mastery growth for casting actors, matches crafted spells
//! against a catalog of named-spell blueprints, and resolves spell hits.
//! Every operation is a synchronous in-process call over plain data: the
//! rune registry and blueprint catalog are read-only inputs supplied once by
//! the host, and the only mutations are the documented ones on spells
//! (derived stats) and actors (mastery XP, HP, effects). Hosts serving
//! concurrent requests must serialize mutating calls per actor/spell id.
pub mod actor;
pub mod combat;
pub mod config;
pub mod cost;
pub mod damage;
pub mod effect;
pub mod error;
pub mod evolution;
pub mod mastery;
pub mod rune;
pub mod spell;
pub use actor::{AchievementFlags, Actor, ActorId, ResourceMeter};
pub use combat::{CombatStats, SpellHitOutcome, derive, resolve_spell_hit};
pub use config::EngineConfig;
pub use cost::spell_mana_cost;
pub use damage::{DamageType, DamageVector};
pub use effect::{EffectBlueprint, EffectInstance, EffectKind};
pub use error::{CoreError, ErrorSeverity};
pub use evolution::{
    BlueprintCatalog, BlueprintId, EvolutionCandidate, SpellBlueprint, evolve_spell,
    list_possible_evolutions,
};
pub use mastery::{
    record_spell_cast, record_spell_cast_weighted, record_spell_use, total_familiarity_for_spell,
};
pub use rune::{
    OverchargeTier, RegistryError, RuneDefinition, RuneId, RuneParseError, RuneRegistry, RuneTable,
    RuneTags, parse_rune_sequence,
};
pub use spell::{GrowthStats, Infusion, Spell, SpellId, SpellIdGen};
