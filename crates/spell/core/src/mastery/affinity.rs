//! Per-damage-type affinity tracking.
//!
//! A single mastery value per element serves both roles: the combat deriver
//! reads it offensively (higher affinity hits harder) and the encounter
//! resolver reads it defensively (higher affinity takes less).

use crate::actor::Actor;
use crate::config::EngineConfig;
use crate::spell::Spell;

/// Records one use of a spell, growing the caster's elemental affinity.
///
/// For each damage type present in the spell's derived combat stats, the
/// actor gains experience proportional to that type's total output (burst
/// plus DoT over its duration). A spell whose stats were never derived
/// teaches nothing; there is no output to learn from.
pub fn record_spell_use(actor: &mut Actor, spell: &Spell) {
    let Some(combat) = &spell.combat else {
        return;
    };

    for (damage_type, burst) in combat.burst.iter_nonzero() {
        actor
            .affinity_xp
            .add(damage_type, burst * EngineConfig::AFFINITY_XP_RATE);
    }
    for (damage_type, rate) in combat.dot.iter_nonzero() {
        actor.affinity_xp.add(
            damage_type,
            rate * combat.dot_duration_secs * EngineConfig::AFFINITY_XP_RATE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use crate::combat::CombatStats;
    use crate::damage::{DamageType, DamageVector};
    use crate::spell::{Spell, SpellId};

    fn spell_with_output(burst_fire: f32) -> Spell {
        let mut spell = Spell::create_nameless(SpellId(0), ActorId(1), Vec::new(), Vec::new());
        spell.combat = Some(CombatStats {
            burst: DamageVector::single(DamageType::Fire, burst_fire),
            dot: DamageVector::ZERO,
            dot_duration_secs: 0.0,
            effects: Vec::new(),
        });
        spell
    }

    #[test]
    fn underived_spell_teaches_nothing() {
        let mut actor = Actor::new(ActorId(1), 100.0, 50.0);
        let spell = Spell::create_nameless(SpellId(0), ActorId(1), Vec::new(), Vec::new());
        record_spell_use(&mut actor, &spell);
        assert_eq!(actor.affinity(DamageType::Fire), 0.0);
    }

    #[test]
    fn affinity_stays_bounded_under_heavy_use() {
        let mut actor = Actor::new(ActorId(1), 100.0, 50.0);
        let spell = spell_with_output(500.0);

        let mut previous = 0.0;
        for _ in 0..1000 {
            record_spell_use(&mut actor, &spell);
            let affinity = actor.affinity(DamageType::Fire);
            assert!((0.0..1.0).contains(&affinity));
            assert!(affinity > previous);
            previous = affinity;
        }
    }

    #[test]
    fn only_present_damage_types_grow() {
        let mut actor = Actor::new(ActorId(1), 100.0, 50.0);
        record_spell_use(&mut actor, &spell_with_output(40.0));

        assert!(actor.affinity(DamageType::Fire) > 0.0);
        assert_eq!(actor.affinity(DamageType::Cold), 0.0);
    }
}
