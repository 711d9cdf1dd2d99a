//! Damage types and dense damage vectors.
//!
//! The damage-type set is closed: every vector is a dense array indexed by
//! [`DamageType`], so arithmetic is total and missing entries are simply zero.
//! No call site ever needs to null-coalesce a sparse map.

use strum::IntoEnumIterator;

// ============================================================================
// Damage Type
// ============================================================================

/// Elemental damage classification.
///
/// Actors track a mastery (affinity) value per damage type; the same value
/// amplifies outgoing damage of that type and mitigates incoming damage.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Physical damage (force, impact).
    Physical,
    /// Fire damage (burns, embers).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
    /// Arcane damage (pure magic).
    Arcane,
}

impl DamageType {
    /// Number of damage types (length of every dense vector).
    pub const COUNT: usize = 6;

    /// Dense array index for this type.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Damage Vector
// ============================================================================

/// Dense mapping from every damage type to a non-negative amount.
///
/// Used for rune base damage, derived burst/DoT output, and per-type affinity
/// experience. Entries for types a spell does not deal are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageVector([f32; DamageType::COUNT]);

impl DamageVector {
    /// All-zero vector.
    pub const ZERO: Self = Self([0.0; DamageType::COUNT]);

    /// Creates a vector with a single non-zero entry.
    pub fn single(damage_type: DamageType, amount: f32) -> Self {
        let mut v = Self::ZERO;
        v.set(damage_type, amount);
        v
    }

    /// Amount for one damage type.
    pub fn get(&self, damage_type: DamageType) -> f32 {
        self.0[damage_type.index()]
    }

    /// Overwrites the amount for one damage type.
    pub fn set(&mut self, damage_type: DamageType, amount: f32) {
        self.0[damage_type.index()] = amount;
    }

    /// Adds to the amount for one damage type.
    pub fn add(&mut self, damage_type: DamageType, amount: f32) {
        self.0[damage_type.index()] += amount;
    }

    /// Sum over all damage types.
    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }

    /// True if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&amount| amount == 0.0)
    }

    /// Iterates `(type, amount)` pairs with non-zero amounts.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (DamageType, f32)> + '_ {
        DamageType::iter()
            .map(|t| (t, self.get(t)))
            .filter(|(_, amount)| *amount != 0.0)
    }

    /// Share of the total carried by one damage type.
    ///
    /// Returns 0 when the vector is all-zero, so the ratio is always defined.
    pub fn share(&self, damage_type: DamageType) -> f32 {
        let total = self.total();
        if total <= 0.0 {
            0.0
        } else {
            self.get(damage_type) / total
        }
    }
}
