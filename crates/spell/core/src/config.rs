//! Engine configuration constants and tunable balance parameters.

/// Balance knobs for the rules engine.
///
/// Runtime fields are the parameters content designers are expected to tune
/// per deployment; everything with a fixed behavioral contract (mitigation
/// scale, efficiency floor, mastery curve shape) lives in the associated
/// constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Familiarity weight for casting a named spell.
    ///
    /// Committing to a discovered spell teaches its runes faster than idly
    /// casting nameless combinations, so this stays above
    /// `nameless_cast_weight`.
    pub named_cast_weight: f32,

    /// Familiarity weight for casting a nameless spell.
    pub nameless_cast_weight: f32,

    /// Strength of the logarithmic infusion damage bonus.
    pub infusion_gain: f32,

    /// Extra mana that counts as "one unit" in the infusion bonus curve.
    pub infusion_mana_unit: f32,

    /// Burst/DoT scaling per point of the power growth stat.
    pub power_growth_gain: f32,

    /// Effect-magnitude and DoT-duration scaling per point of the control
    /// growth stat.
    pub control_growth_gain: f32,

    /// Base duration of damage-over-time output, in seconds.
    pub dot_base_secs: f32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous effect instances on one actor.
    pub const MAX_ACTIVE_EFFECTS: usize = 32;

    // ===== fixed behavioral contracts =====
    /// Soft-cap constant for per-damage-type affinity: `xp / (xp + K)`.
    pub const AFFINITY_CURVE_K: f32 = 100.0;
    /// Soft-cap constant for per-rune familiarity: `xp / (xp + K)`.
    pub const FAMILIARITY_CURVE_K: f32 = 50.0;
    /// Affinity experience granted per point of damage output.
    pub const AFFINITY_XP_RATE: f32 = 1.0;
    /// Familiarity experience granted per rune occurrence (before weight).
    pub const FAMILIARITY_XP_PER_OCCURRENCE: f32 = 1.0;
    /// Fraction of damage removed by full (1.0) defensive affinity.
    pub const AFFINITY_MITIGATION_SCALE: f32 = 0.5;
    /// Lower bound on the mana-cost efficiency factor: casting is never
    /// discounted by more than 30%.
    pub const EFFICIENCY_FLOOR: f32 = 0.7;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NAMED_CAST_WEIGHT: f32 = 3.0;
    pub const DEFAULT_NAMELESS_CAST_WEIGHT: f32 = 1.0;
    pub const DEFAULT_INFUSION_GAIN: f32 = 0.35;
    pub const DEFAULT_INFUSION_MANA_UNIT: f32 = 10.0;
    pub const DEFAULT_POWER_GROWTH_GAIN: f32 = 0.1;
    pub const DEFAULT_CONTROL_GROWTH_GAIN: f32 = 0.1;
    pub const DEFAULT_DOT_BASE_SECS: f32 = 4.0;

    pub fn new() -> Self {
        Self {
            named_cast_weight: Self::DEFAULT_NAMED_CAST_WEIGHT,
            nameless_cast_weight: Self::DEFAULT_NAMELESS_CAST_WEIGHT,
            infusion_gain: Self::DEFAULT_INFUSION_GAIN,
            infusion_mana_unit: Self::DEFAULT_INFUSION_MANA_UNIT,
            power_growth_gain: Self::DEFAULT_POWER_GROWTH_GAIN,
            control_growth_gain: Self::DEFAULT_CONTROL_GROWTH_GAIN,
            dot_base_secs: Self::DEFAULT_DOT_BASE_SECS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
