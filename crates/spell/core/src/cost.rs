//! Mana cost calculation.

use crate::actor::Actor;
use crate::config::EngineConfig;
use crate::rune::RuneRegistry;
use crate::spell::Spell;

/// Computes the mana cost of casting a spell.
///
/// # Formula
///
/// ```text
/// base = Σ rune mana cost per occurrence + Σ infused extra mana
/// efficiency_factor = clamp(1 − cost_efficiency, 0.7, 1.0)
/// cost = base × efficiency_factor
/// ```
///
/// Efficiency discounts cost by at most 30%, so casting is never free.
pub fn spell_mana_cost(actor: &Actor, spell: &Spell, registry: &RuneRegistry) -> f32 {
    let rune_cost: f32 = spell
        .runes
        .iter()
        .map(|&rune| registry.get(rune).mana_cost)
        .sum();
    let infused: f32 = spell
        .infusions
        .iter()
        .map(|infusion| infusion.extra_mana.max(0.0))
        .sum();

    let efficiency_factor = (1.0 - actor.cost_efficiency.clamp(0.0, 1.0))
        .clamp(EngineConfig::EFFICIENCY_FLOOR, 1.0);

    (rune_cost + infused) * efficiency_factor
}
