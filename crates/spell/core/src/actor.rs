//! Actors: players and creatures that cast and receive spells.
//!
//! An actor stores the raw mastery experience scalars as the source of truth;
//! the displayed [0,1] affinity/familiarity values are recomputed fresh on
//! every read through the soft-cap curve. Storing the curve output and
//! back-solving XP would compound rounding error across updates.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::damage::{DamageType, DamageVector};
use crate::effect::EffectInstance;
use crate::mastery::soft_cap;
use crate::rune::{RuneId, RuneTable};

// ============================================================================
// Identity and Resources
// ============================================================================

/// Unique identifier for an actor. Assigned by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

/// Float resource meter (health, mana) tracked per actor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: f32,
    pub maximum: f32,
}

impl ResourceMeter {
    /// Creates a full meter.
    pub fn full(maximum: f32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Removes up to `amount`, flooring at zero.
    pub fn deplete(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// True once the meter reaches zero.
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

// ============================================================================
// Achievement Flags
// ============================================================================

/// Externally tracked unlock tokens, passed by value into eligibility checks.
///
/// The core never mutates this set; it only asks superset questions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementFlags(BTreeSet<String>);

impl AchievementFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag (host-side bookkeeping; the core only reads).
    pub fn insert(&mut self, flag: impl Into<String>) {
        self.0.insert(flag.into());
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    /// True if every flag in `required` is present.
    pub fn contains_all<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> bool {
        required.into_iter().all(|flag| self.0.contains(flag))
    }
}

impl FromIterator<String> for AchievementFlags {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Actor
// ============================================================================

/// A player or creature record, owned and persisted by the host.
///
/// The core mutates actors only where documented: the mastery trackers grow
/// the XP scalars, and the encounter resolver depletes HP and attaches
/// effects on the target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub hp: ResourceMeter,
    pub mana: ResourceMeter,

    /// Raw per-damage-type affinity experience (source of truth).
    pub affinity_xp: DamageVector,

    /// Raw per-rune familiarity experience (source of truth).
    pub familiarity_xp: RuneTable,

    /// Mana-cost efficiency in [0,1]; discounts casting cost, capped at 30%.
    pub cost_efficiency: f32,

    /// Live effects attached by incoming hits. Ticked down by the host.
    pub active_effects: ArrayVec<EffectInstance, { EngineConfig::MAX_ACTIVE_EFFECTS }>,
}

impl Actor {
    /// Creates an actor at full health and mana with no mastery.
    pub fn new(id: ActorId, max_hp: f32, max_mana: f32) -> Self {
        Self {
            id,
            hp: ResourceMeter::full(max_hp),
            mana: ResourceMeter::full(max_mana),
            affinity_xp: DamageVector::ZERO,
            familiarity_xp: RuneTable::default(),
            cost_efficiency: 0.0,
            active_effects: ArrayVec::new(),
        }
    }

    /// Sets the mana-cost efficiency stat (builder pattern).
    #[must_use]
    pub fn with_cost_efficiency(mut self, cost_efficiency: f32) -> Self {
        self.cost_efficiency = cost_efficiency;
        self
    }

    /// Displayed affinity for one damage type, in [0,1].
    ///
    /// Recomputed from raw XP on every read and clamped to [0,1], so even a
    /// corrupted persisted value stays in bounds. Never-recorded types read
    /// as 0.
    pub fn affinity(&self, damage_type: DamageType) -> f32 {
        soft_cap(
            self.affinity_xp.get(damage_type),
            EngineConfig::AFFINITY_CURVE_K,
        )
    }

    /// Displayed familiarity for one rune, in [0,1].
    pub fn familiarity(&self, rune: RuneId) -> f32 {
        soft_cap(
            self.familiarity_xp.get(rune),
            EngineConfig::FAMILIARITY_CURVE_K,
        )
    }

    /// Attaches an effect instance, honoring its stack limit.
    ///
    /// Instances beyond the per-kind stack limit, or beyond the actor's
    /// effect capacity, are dropped.
    pub fn attach_effect(&mut self, instance: EffectInstance) {
        if let Some(max_stacks) = instance.max_stacks {
            let stacks = self
                .active_effects
                .iter()
                .filter(|e| e.kind == instance.kind)
                .count();
            if stacks >= max_stacks as usize {
                return;
            }
        }
        if !self.active_effects.is_full() {
            self.active_effects.push(instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectBlueprint, EffectKind};

    #[test]
    fn meter_floors_at_zero() {
        let mut hp = ResourceMeter::full(10.0);
        hp.deplete(25.0);
        assert_eq!(hp.current, 0.0);
        assert!(hp.is_depleted());
    }

    #[test]
    fn unrecorded_affinity_reads_as_zero() {
        let actor = Actor::new(ActorId(1), 100.0, 50.0);
        assert_eq!(actor.affinity(DamageType::Fire), 0.0);
        assert_eq!(actor.familiarity(RuneId::from_letter('F').unwrap()), 0.0);
    }

    #[test]
    fn corrupted_negative_xp_still_reads_in_bounds() {
        let mut actor = Actor::new(ActorId(1), 100.0, 50.0);
        actor.affinity_xp.set(DamageType::Fire, -500.0);
        let affinity = actor.affinity(DamageType::Fire);
        assert!((0.0..=1.0).contains(&affinity));
    }

    #[test]
    fn attach_effect_respects_stack_limit() {
        let mut actor = Actor::new(ActorId(1), 100.0, 50.0);
        let blueprint = EffectBlueprint::debuff(EffectKind::Burn, 2.0, 3.0).with_max_stacks(2);

        for _ in 0..5 {
            actor.attach_effect(EffectInstance::from(&blueprint));
        }
        assert_eq!(actor.active_effects.len(), 2);
    }
}
