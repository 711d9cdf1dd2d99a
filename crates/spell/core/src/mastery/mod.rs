//! Long-term mastery growth: elemental affinity and rune familiarity.
//!
//! Both trackers share the same mathematics: raw experience accumulates
//! without bound, and the displayed [0,1] mastery value is the asymptote
//! `xp / (xp + K)`. Mastery keeps growing forever with ever-smaller
//! increments and no exploitable ceiling.

pub mod affinity;
pub mod familiarity;

pub use affinity::record_spell_use;
pub use familiarity::{record_spell_cast, record_spell_cast_weighted, total_familiarity_for_spell};

/// Soft-cap curve mapping unbounded experience to [0,1].
///
/// Negative XP (corrupted persisted data) clamps to 0 rather than producing
/// an out-of-range mastery value.
pub fn soft_cap(xp: f32, k: f32) -> f32 {
    let xp = xp.max(0.0);
    (xp / (xp + k)).clamp(0.0, 1.0)
}
