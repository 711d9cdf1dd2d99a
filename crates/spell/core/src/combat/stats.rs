//! Combat stats derivation.
//!
//! Turns a spell's rune sequence, infusions, growth stats, and the caster's
//! elemental affinities into concrete burst damage, damage-over-time, and an
//! on-hit effect list. Derivation is a pure function of its inputs and always
//! recomputes the whole result; stats are never incrementally patched.

use crate::actor::Actor;
use crate::config::EngineConfig;
use crate::damage::DamageVector;
use crate::effect::EffectBlueprint;
use crate::rune::{RuneRegistry, RuneTags};
use crate::spell::Spell;

// ============================================================================
// Combat Stats
// ============================================================================

/// Derived combat output of a spell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    /// Instantaneous damage per type.
    pub burst: DamageVector,
    /// Damage-over-time rate per type (per second).
    pub dot: DamageVector,
    /// Duration of the DoT component, in seconds. Zero when `dot` is zero.
    pub dot_duration_secs: f32,
    /// On-hit effects, attached to the target as fresh copies per hit.
    pub effects: Vec<EffectBlueprint>,
}

impl CombatStats {
    /// Total power: burst plus DoT rate integrated over its duration,
    /// summed across all damage types. Used for evolution thresholds.
    pub fn total_power(&self) -> f32 {
        self.burst.total() + self.dot.total() * self.dot_duration_secs
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Recomputes and overwrites `spell.combat`.
///
/// # Formula
///
/// Per rune occurrence at sequence position `p` with definition `r`:
///
/// ```text
/// infusion_mult = 1 + gain × ln(1 + extra_mana(p) / mana_unit)
/// amount(t) = r.damage[t] × r.power_factor
///             × infusion_mult
///             × (1 + caster_affinity[t])
///             × (1 + power_growth_gain × growth.power)
/// ```
///
/// Runes tagged `SUSTAINED` route their damage into the DoT rate; everything
/// else lands in burst. Effect magnitudes scale with the rune's control
/// factor and the control growth stat. The infusion bonus is logarithmic:
/// strictly increasing in extra mana, with diminishing returns so a single
/// investment cannot scale without bound.
///
/// An empty rune sequence derives to all-zero output and no effects; that is
/// an ordinary input, never an error. Mutates only `spell.combat`.
pub fn derive(spell: &mut Spell, caster: &Actor, registry: &RuneRegistry, config: &EngineConfig) {
    let mut stats = CombatStats::default();

    let power_mult = 1.0 + config.power_growth_gain * spell.growth.power.max(0.0);
    let control_mult = 1.0 + config.control_growth_gain * spell.growth.control.max(0.0);

    for (position, &rune) in spell.runes.iter().enumerate() {
        let definition = registry.get(rune);
        let extra_mana = spell.extra_mana_at(position);
        let infusion_mult = infusion_multiplier(extra_mana, config);

        if let Some(damage) = &definition.damage {
            let sustained = definition.tags.contains(RuneTags::SUSTAINED);
            for (damage_type, base) in damage.iter_nonzero() {
                let amount = base
                    * definition.power_factor
                    * infusion_mult
                    * (1.0 + caster.affinity(damage_type))
                    * power_mult;
                if sustained {
                    stats.dot.add(damage_type, amount);
                } else {
                    stats.burst.add(damage_type, amount);
                }
            }
        }

        for effect in &definition.effects {
            stats
                .effects
                .push(effect.scaled(definition.control_factor * control_mult));
        }

        // Only the highest qualifying overcharge tier applies per occurrence.
        if let Some(tier) = definition.overcharge_tier(extra_mana) {
            stats
                .effects
                .push(tier.effect.scaled(definition.control_factor * control_mult));
        }
    }

    stats.dot_duration_secs = if stats.dot.is_zero() {
        0.0
    } else {
        config.dot_base_secs * control_mult
    };

    spell.combat = Some(stats);
}

/// Diminishing-returns bonus from infused extra mana.
///
/// `1` at zero extra mana, strictly increasing, logarithmic growth.
fn infusion_multiplier(extra_mana: f32, config: &EngineConfig) -> f32 {
    1.0 + config.infusion_gain * (1.0 + extra_mana.max(0.0) / config.infusion_mana_unit).ln()
}
