//! Rune identities, definitions, and the static rune registry.
//!
//! Runes are the primitive tokens of spell-crafting: one definition per
//! letter A–Z, loaded once by the host and treated as read-only afterwards.
//! The registry is total by construction, so lookups never fail.

use std::fmt;

use crate::damage::DamageVector;
use crate::effect::EffectBlueprint;
use crate::error::{CoreError, ErrorSeverity};

// ============================================================================
// Rune Identity
// ============================================================================

/// Identity of a rune: a single uppercase letter A–Z.
///
/// Construction is validated, so a `RuneId` held anywhere in the core is
/// always in range and can index dense per-rune tables directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneId(u8);

impl RuneId {
    /// Number of runes (length of every dense per-rune table).
    pub const COUNT: usize = 26;

    /// Parses a letter into a rune id.
    ///
    /// A letter outside A–Z signals corrupt catalog data or malformed input
    /// upstream, never a normal runtime condition.
    pub fn from_letter(letter: char) -> Result<Self, RuneParseError> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter as u8 - b'A'))
        } else {
            Err(RuneParseError::InvalidLetter(letter))
        }
    }

    /// The uppercase letter naming this rune.
    pub const fn letter(self) -> char {
        (self.0 + b'A') as char
    }

    /// Dense table index (0 for A, 25 for Z).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates all 26 rune ids in letter order.
    pub fn all() -> impl Iterator<Item = RuneId> {
        (0..Self::COUNT as u8).map(RuneId)
    }
}

impl fmt::Display for RuneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Parses an entire rune sequence from its letter string.
///
/// This is the host boundary for raw spell input: it fails loudly on the
/// first letter outside A–Z.
pub fn parse_rune_sequence(letters: &str) -> Result<Vec<RuneId>, RuneParseError> {
    letters.chars().map(RuneId::from_letter).collect()
}

/// Error for rune letters outside A–Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuneParseError {
    /// The letter does not name any rune.
    #[error("invalid rune letter '{0}': expected an uppercase letter A-Z")]
    InvalidLetter(char),
}

impl CoreError for RuneParseError {
    fn severity(&self) -> ErrorSeverity {
        // Bad input at the host boundary; the sequence must be corrected
        // before retrying.
        ErrorSeverity::Validation
    }
}

// ============================================================================
// Rune Tags
// ============================================================================

bitflags::bitflags! {
    /// Behavioral tags on a rune definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RuneTags: u8 {
        /// Damage is delivered over time instead of instantly.
        const SUSTAINED = 1 << 0;
        /// Travels to the target (can be intercepted by the host's rules).
        const PROJECTILE = 1 << 1;
        /// Affects an area rather than a single target.
        const AREA = 1 << 2;
        /// Applies to the caster.
        const SELF_CAST = 1 << 3;
        /// Slow, high-commitment casting.
        const RITUAL = 1 << 4;
    }
}

// Serialize as flag names ("SUSTAINED | AREA"), not the raw bit pattern.
#[cfg(feature = "serde")]
impl serde::Serialize for RuneTags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RuneTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bitflags::serde::deserialize(deserializer)
    }
}

// ============================================================================
// Rune Definition
// ============================================================================

/// An overcharge effect tier, unlocked by infused extra mana.
///
/// Tiers on a rune are kept sorted by ascending threshold; only the highest
/// qualifying tier applies per rune occurrence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverchargeTier {
    /// Minimum extra mana infused into the occurrence to unlock this tier.
    pub min_extra_mana: f32,
    /// Effect attached when the tier is unlocked.
    pub effect: EffectBlueprint,
}

/// Static definition of one rune. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneDefinition {
    pub id: RuneId,
    /// Scales the rune's damage contribution.
    pub power_factor: f32,
    /// Scales the rune's effect magnitudes.
    pub control_factor: f32,
    /// Base wildness of the rune; damped by a spell's stability growth.
    pub instability: f32,
    /// Mana cost per occurrence in a sequence.
    pub mana_cost: f32,
    pub tags: RuneTags,
    /// Damage contributed per occurrence, if the rune deals damage.
    pub damage: Option<DamageVector>,
    /// On-hit effects contributed per occurrence.
    pub effects: Vec<EffectBlueprint>,
    /// Overcharge tiers, sorted by ascending `min_extra_mana`.
    pub overcharge: Vec<OverchargeTier>,
}

impl RuneDefinition {
    /// Creates a minimal utility rune (no damage, no effects).
    pub fn new(id: RuneId, power_factor: f32, control_factor: f32, mana_cost: f32) -> Self {
        Self {
            id,
            power_factor,
            control_factor,
            instability: 0.0,
            mana_cost,
            tags: RuneTags::empty(),
            damage: None,
            effects: Vec::new(),
            overcharge: Vec::new(),
        }
    }

    /// Sets the damage vector (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: DamageVector) -> Self {
        self.damage = Some(damage);
        self
    }

    /// Sets the tag set (builder pattern).
    #[must_use]
    pub fn with_tags(mut self, tags: RuneTags) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the base instability (builder pattern).
    #[must_use]
    pub fn with_instability(mut self, instability: f32) -> Self {
        self.instability = instability;
        self
    }

    /// Adds an on-hit effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectBlueprint) -> Self {
        self.effects.push(effect);
        self
    }

    /// Adds an overcharge tier, keeping tiers sorted by threshold.
    #[must_use]
    pub fn with_overcharge(mut self, min_extra_mana: f32, effect: EffectBlueprint) -> Self {
        self.overcharge.push(OverchargeTier {
            min_extra_mana,
            effect,
        });
        self.overcharge
            .sort_by(|a, b| a.min_extra_mana.total_cmp(&b.min_extra_mana));
        self
    }

    /// The highest overcharge tier unlocked by `extra_mana`, if any.
    pub fn overcharge_tier(&self, extra_mana: f32) -> Option<&OverchargeTier> {
        self.overcharge
            .iter()
            .rev()
            .find(|tier| extra_mana >= tier.min_extra_mana)
    }
}

// ============================================================================
// Rune Registry
// ============================================================================

/// Read-only catalog of all 26 rune definitions.
///
/// Constructed once by the host and passed by reference into every operation
/// that needs it, never held as a global. Lookup is total: every `RuneId`
/// resolves to a definition.
#[derive(Clone, Debug)]
pub struct RuneRegistry {
    /// Exactly [`RuneId::COUNT`] definitions, in letter order.
    definitions: Box<[RuneDefinition]>,
}

impl RuneRegistry {
    /// Builds a registry from exactly one definition per letter.
    ///
    /// Fails loudly on a missing or duplicated letter; an incomplete registry
    /// is a data-integrity bug, not a runtime condition.
    pub fn new(definitions: Vec<RuneDefinition>) -> Result<Self, RegistryError> {
        let mut slots: [Option<RuneDefinition>; RuneId::COUNT] = std::array::from_fn(|_| None);

        for definition in definitions {
            let slot = &mut slots[definition.id.index()];
            if slot.is_some() {
                return Err(RegistryError::DuplicateRune(definition.id.letter()));
            }
            *slot = Some(definition);
        }

        let mut complete = Vec::with_capacity(RuneId::COUNT);
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(definition) => complete.push(definition),
                None => return Err(RegistryError::MissingRune((index as u8 + b'A') as char)),
            }
        }

        Ok(Self {
            definitions: complete.into_boxed_slice(),
        })
    }

    /// Looks up the definition of a rune. Total by construction.
    pub fn get(&self, id: RuneId) -> &RuneDefinition {
        &self.definitions[id.index()]
    }

    /// Iterates all definitions in letter order.
    pub fn iter(&self) -> impl Iterator<Item = &RuneDefinition> {
        self.definitions.iter()
    }
}

/// Error for malformed registry input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No definition supplied for a letter.
    #[error("rune registry is missing a definition for letter '{0}'")]
    MissingRune(char),

    /// More than one definition supplied for a letter.
    #[error("rune registry has more than one definition for letter '{0}'")]
    DuplicateRune(char),
}

impl CoreError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}

// ============================================================================
// Dense Per-Rune Table
// ============================================================================

/// Dense mapping from every rune to an `f32`, defaulting to zero.
///
/// Backs both spell profile vectors (normalized rune frequencies) and
/// per-rune familiarity experience.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneTable([f32; RuneId::COUNT]);

impl Default for RuneTable {
    fn default() -> Self {
        Self([0.0; RuneId::COUNT])
    }
}

impl RuneTable {
    /// Value for one rune.
    pub fn get(&self, id: RuneId) -> f32 {
        self.0[id.index()]
    }

    /// Overwrites the value for one rune.
    pub fn set(&mut self, id: RuneId, value: f32) {
        self.0[id.index()] = value;
    }

    /// Adds to the value for one rune.
    pub fn add(&mut self, id: RuneId, value: f32) {
        self.0[id.index()] += value;
    }

    /// Iterates `(rune, value)` pairs with non-zero values, in letter order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (RuneId, f32)> + '_ {
        RuneId::all()
            .map(|id| (id, self.get(id)))
            .filter(|(_, value)| *value != 0.0)
    }

    /// Sum over all runes.
    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }
}
