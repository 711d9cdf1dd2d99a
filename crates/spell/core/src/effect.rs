//! On-hit effect blueprints and live instances.
//!
//! Runes declare [`EffectBlueprint`]s; the combat deriver copies them into a
//! spell's combat stats, and the encounter resolver attaches a fresh
//! [`EffectInstance`] per hit. Instances are independent copies: mutating one
//! never touches the blueprint it came from.

// ============================================================================
// Effect Kind
// ============================================================================

/// Types of spell effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    // ========================================================================
    // Debuffs (applied to targets)
    // ========================================================================
    /// Fire damage over time.
    Burn,

    /// Movement and action speed reduced.
    Chill,

    /// Periodic interruption.
    Shock,

    /// Outgoing damage reduced.
    Weaken,

    /// Cannot cast.
    Silence,

    // ========================================================================
    // Buffs (applied to allies or self)
    // ========================================================================
    /// Absorbs incoming damage.
    Shield,

    /// Increased action speed.
    Haste,

    /// HP recovery over time.
    Regenerate,
}

// ============================================================================
// Blueprint and Instance
// ============================================================================

/// Authored effect template carried by a rune definition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectBlueprint {
    pub kind: EffectKind,
    /// Strength of the effect (damage per second, absorb amount, etc.).
    pub magnitude: f32,
    /// How long the effect lasts once attached, in seconds.
    pub duration_secs: f32,
    /// True for beneficial effects, false for debuffs.
    pub is_buff: bool,
    /// Maximum simultaneous instances of this kind on one actor.
    pub max_stacks: Option<u8>,
}

impl EffectBlueprint {
    /// Creates a debuff blueprint with unlimited stacking.
    pub fn debuff(kind: EffectKind, magnitude: f32, duration_secs: f32) -> Self {
        Self {
            kind,
            magnitude,
            duration_secs,
            is_buff: false,
            max_stacks: None,
        }
    }

    /// Creates a buff blueprint with unlimited stacking.
    pub fn buff(kind: EffectKind, magnitude: f32, duration_secs: f32) -> Self {
        Self {
            kind,
            magnitude,
            duration_secs,
            is_buff: true,
            max_stacks: None,
        }
    }

    /// Limits simultaneous instances of this effect (builder pattern).
    #[must_use]
    pub fn with_max_stacks(mut self, max_stacks: u8) -> Self {
        self.max_stacks = Some(max_stacks);
        self
    }

    /// Scales the magnitude (builder pattern, used by the combat deriver).
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.magnitude *= factor;
        self
    }
}

/// A live effect attached to an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub kind: EffectKind,
    pub magnitude: f32,
    /// Seconds until the effect expires; ticked down by the host.
    pub remaining_secs: f32,
    pub is_buff: bool,
    pub max_stacks: Option<u8>,
}

impl From<&EffectBlueprint> for EffectInstance {
    fn from(blueprint: &EffectBlueprint) -> Self {
        Self {
            kind: blueprint.kind,
            magnitude: blueprint.magnitude,
            remaining_secs: blueprint.duration_secs,
            is_buff: blueprint.is_buff,
            max_stacks: blueprint.max_stacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_an_independent_copy() {
        let blueprint = EffectBlueprint::debuff(EffectKind::Burn, 4.0, 3.0);
        let mut instance = EffectInstance::from(&blueprint);

        instance.magnitude = 99.0;
        instance.remaining_secs = 0.0;

        assert_eq!(blueprint.magnitude, 4.0);
        assert_eq!(blueprint.duration_secs, 3.0);
    }

    #[test]
    fn scaled_multiplies_magnitude_only() {
        let blueprint = EffectBlueprint::buff(EffectKind::Shield, 10.0, 6.0).scaled(1.5);
        assert_eq!(blueprint.magnitude, 15.0);
        assert_eq!(blueprint.duration_secs, 6.0);
    }
}
