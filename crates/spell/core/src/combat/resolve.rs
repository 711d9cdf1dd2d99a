//! Encounter resolution: one spell striking one target.

use crate::actor::Actor;
use crate::combat::stats;
use crate::config::EngineConfig;
use crate::damage::DamageVector;
use crate::effect::EffectInstance;
use crate::rune::RuneRegistry;
use crate::spell::Spell;

/// Result of resolving a single spell hit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellHitOutcome {
    /// Mitigated damage dealt, broken down per type.
    pub per_type_damage: DamageVector,
    /// Total mitigated damage applied to the target's HP.
    pub total_damage: f32,
    pub target_hp_before: f32,
    pub target_hp_after: f32,
}

/// Resolves one spell hit against a target.
///
/// Burst damage of each type is mitigated by the target's affinity for that
/// type: `1 − 0.5 × clamp(affinity, 0, 1)`. Affinity 0 takes full damage,
/// affinity 1 exactly half, linear in between. Target HP floors at zero, and
/// each on-hit effect is attached as a fresh, independent instance.
///
/// Mutates only the target (HP, effects), plus `spell.combat` when the stats
/// were absent or effect-free. Caster mana, affinity, and familiarity updates
/// are explicit separate calls made by the orchestrating host.
pub fn resolve_spell_hit(
    caster: &Actor,
    spell: &mut Spell,
    target: &mut Actor,
    registry: &RuneRegistry,
    config: &EngineConfig,
) -> SpellHitOutcome {
    // Lazily derive when stats are absent or carry no effects; a present but
    // effect-free record may be a host-seeded placeholder or stale, so it is
    // recomputed against the current caster before applying the hit.
    if spell.combat.as_ref().is_none_or(|c| c.effects.is_empty()) {
        stats::derive(spell, caster, registry, config);
    }
    let combat = spell.combat.clone().unwrap_or_default();

    let mut per_type_damage = DamageVector::ZERO;
    let mut total_damage = 0.0;
    for (damage_type, burst) in combat.burst.iter_nonzero() {
        if burst <= 0.0 {
            continue;
        }
        let mitigation = 1.0
            - EngineConfig::AFFINITY_MITIGATION_SCALE * target.affinity(damage_type).clamp(0.0, 1.0);
        let dealt = burst * mitigation;
        per_type_damage.add(damage_type, dealt);
        total_damage += dealt;
    }

    let target_hp_before = target.hp.current;
    target.hp.deplete(total_damage);

    for effect in &combat.effects {
        target.attach_effect(EffectInstance::from(effect));
    }

    SpellHitOutcome {
        per_type_damage,
        total_damage,
        target_hp_before,
        target_hp_after: target.hp.current,
    }
}
