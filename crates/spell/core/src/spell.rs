//! Spells: rune sequences with growth state, infusions, and derived stats.

use std::collections::BTreeSet;

use crate::actor::ActorId;
use crate::combat::CombatStats;
use crate::rune::{RuneId, RuneRegistry, RuneTable};

// ============================================================================
// Identity
// ============================================================================

/// Unique identifier for a spell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub u64);

/// Monotonic spell-id source, owned by the host.
///
/// The core holds no global state, so fresh ids for `create_nameless` and
/// `evolve_spell` come from an explicit generator the host threads through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellIdGen {
    next: u64,
}

impl SpellIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a persisted high-water mark.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Returns a fresh, never-before-issued id.
    pub fn next(&mut self) -> SpellId {
        let id = SpellId(self.next);
        self.next += 1;
        id
    }
}

// ============================================================================
// Infusions and Growth
// ============================================================================

/// Extra mana invested into one position of a spell's rune sequence.
///
/// Infusions are keyed by sequence position, not rune identity: two
/// occurrences of the same letter are infused independently.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Infusion {
    /// Index into the spell's rune sequence.
    pub position: usize,
    /// Extra mana invested, >= 0.
    pub extra_mana: f32,
}

/// Long-term growth stats of a spell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthStats {
    pub power: f32,
    pub control: f32,
    pub stability: f32,
    pub affinity: f32,
    pub versatility: f32,
}

// ============================================================================
// Spell
// ============================================================================

/// A player-authored spell: an ordered rune sequence plus growth state.
///
/// Spells start nameless; evolving produces a *new* record with a fresh id
/// and an `evolved_from` back-link, never a mutation of the source. The chain
/// is therefore acyclic and append-only.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub id: SpellId,
    pub owner: ActorId,

    /// Blueprint name once evolved; `None` while nameless/undiscovered.
    pub name: Option<String>,

    /// Ordered rune sequence; repeats allowed, may be empty.
    pub runes: Vec<RuneId>,

    /// Normalized rune-frequency profile (sums to 1, or all-zero when the
    /// sequence is empty).
    pub profile: RuneTable,

    pub growth: GrowthStats,

    pub infusions: Vec<Infusion>,

    /// Derived combat stats; absent until the deriver runs, may be stale
    /// after affinity growth. Always recomputed whole, never patched.
    pub combat: Option<CombatStats>,

    /// Id of the spell this one evolved from, if any.
    pub evolved_from: Option<SpellId>,
}

impl Spell {
    /// Builds a fresh, nameless spell from a rune sequence.
    ///
    /// Growth stats start at zero and combat stats are absent until derived.
    /// Rune validity is enforced by `RuneId` construction at the host
    /// boundary, so this cannot fail.
    pub fn create_nameless(
        id: SpellId,
        owner: ActorId,
        runes: Vec<RuneId>,
        infusions: Vec<Infusion>,
    ) -> Self {
        let profile = Self::profile_of(&runes);
        Self {
            id,
            owner,
            name: None,
            runes,
            profile,
            growth: GrowthStats::default(),
            infusions,
            combat: None,
            evolved_from: None,
        }
    }

    /// Normalized rune-frequency profile of a sequence.
    ///
    /// Pure: count occurrences per letter, divide by total count. An empty
    /// sequence yields the all-zero table.
    pub fn profile_of(runes: &[RuneId]) -> RuneTable {
        let mut profile = RuneTable::default();
        if runes.is_empty() {
            return profile;
        }
        let share = 1.0 / runes.len() as f32;
        for &rune in runes {
            profile.add(rune, share);
        }
        profile
    }

    /// True once the spell has evolved into a named blueprint.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Set of distinct runes in the sequence.
    pub fn distinct_runes(&self) -> BTreeSet<RuneId> {
        self.runes.iter().copied().collect()
    }

    /// Total extra mana infused into one sequence position.
    pub fn extra_mana_at(&self, position: usize) -> f32 {
        self.infusions
            .iter()
            .filter(|infusion| infusion.position == position)
            .map(|infusion| infusion.extra_mana.max(0.0))
            .sum()
    }

    /// Aggregate wildness of the spell: summed rune instability, damped by
    /// the stability growth stat.
    pub fn instability(&self, registry: &RuneRegistry) -> f32 {
        let raw: f32 = self
            .runes
            .iter()
            .map(|&rune| registry.get(rune).instability)
            .sum();
        raw * (1.0 - self.growth.stability.clamp(0.0, 1.0))
    }
}
