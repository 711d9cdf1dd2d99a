//! Per-rune familiarity tracking.
//!
//! Familiarity gates advanced spell evolutions only; it never feeds damage.
//! Experience accrues per rune *occurrence* (casting `FFR` teaches F twice),
//! while [`total_familiarity_for_spell`] sums over *distinct* runes.

use crate::actor::Actor;
use crate::config::EngineConfig;
use crate::spell::Spell;

/// Records one cast with the default weight for the spell's naming state.
///
/// Named spells use a strictly higher weight than nameless ones: discovering
/// and committing to a named spell accelerates mastery of its constituent
/// runes relative to idly casting unnamed combinations.
pub fn record_spell_cast(actor: &mut Actor, spell: &Spell, config: &EngineConfig) {
    let weight = if spell.is_named() {
        config.named_cast_weight
    } else {
        config.nameless_cast_weight
    };
    record_spell_cast_weighted(actor, spell, weight);
}

/// Records one cast with an explicit weight.
///
/// Every occurrence in the sequence grants experience for its rune, so
/// repeated letters teach faster than singletons.
pub fn record_spell_cast_weighted(actor: &mut Actor, spell: &Spell, weight: f32) {
    for &rune in &spell.runes {
        actor
            .familiarity_xp
            .add(rune, EngineConfig::FAMILIARITY_XP_PER_OCCURRENCE * weight);
    }
}

/// Sum of the actor's familiarity over the distinct runes the spell uses.
///
/// Duplicates count once, and familiarity for runes the spell does not use
/// is ignored. Used by the evolution matcher to gate advanced tiers.
pub fn total_familiarity_for_spell(actor: &Actor, spell: &Spell) -> f32 {
    spell
        .distinct_runes()
        .into_iter()
        .map(|rune| actor.familiarity(rune))
        .sum()
}
