//! Named-spell blueprints and evolution matching.
//!
//! A crafted spell stays nameless until its rune multiset and derived damage
//! profile satisfy a blueprint from the authored catalog. Evolving renames
//! and unlocks; it never alters mechanics. The new spell carries the source
//! spell's runes, growth, and combat stats verbatim under a fresh id.

use std::collections::{BTreeMap, BTreeSet};

use crate::actor::{Actor, AchievementFlags};
use crate::damage::DamageType;
use crate::rune::RuneId;
use crate::spell::{Spell, SpellIdGen};

// ============================================================================
// Blueprint Catalog
// ============================================================================

/// Unique identifier of an authored blueprint.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlueprintId(pub String);

impl BlueprintId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authored named-spell blueprint. Immutable catalog entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellBlueprint {
    pub id: BlueprintId,
    pub name: String,
    pub description: String,

    /// Exact set of distinct runes the spell must be built from.
    pub required_runes: BTreeSet<RuneId>,

    /// Minimum total power (burst + DoT × duration) across all types.
    pub min_total_power: f32,

    /// The damage type this blueprint is themed around.
    pub focus: DamageType,

    /// Minimum share of total burst the focus type must carry. Large
    /// off-type damage disqualifies a spell even with the correct runes.
    pub min_focus_ratio: f32,

    /// Per-rune familiarity minimums (advanced tiers only).
    pub min_familiarity: BTreeMap<RuneId, f32>,

    /// Achievement flags the actor must hold (advanced tiers only).
    pub required_flags: BTreeSet<String>,

    /// Blueprint the spell must already be evolved into (tiered evolutions).
    pub prerequisite: Option<BlueprintId>,

    /// Hidden blueprints are matched normally but excluded from player-facing
    /// hints by the host.
    pub hidden: bool,
}

impl SpellBlueprint {
    /// Creates a base-tier blueprint with no advanced gates.
    pub fn base(
        id: impl Into<String>,
        name: impl Into<String>,
        required_runes: impl IntoIterator<Item = RuneId>,
        focus: DamageType,
        min_total_power: f32,
        min_focus_ratio: f32,
    ) -> Self {
        Self {
            id: BlueprintId::new(id),
            name: name.into(),
            description: String::new(),
            required_runes: required_runes.into_iter().collect(),
            min_total_power,
            focus,
            min_focus_ratio,
            min_familiarity: BTreeMap::new(),
            required_flags: BTreeSet::new(),
            prerequisite: None,
            hidden: false,
        }
    }

    /// Marks this blueprint as a tiered evolution of `prerequisite`
    /// (builder pattern).
    #[must_use]
    pub fn with_prerequisite(mut self, prerequisite: BlueprintId) -> Self {
        self.prerequisite = Some(prerequisite);
        self
    }

    /// Adds a per-rune familiarity minimum (builder pattern).
    #[must_use]
    pub fn with_min_familiarity(mut self, rune: RuneId, minimum: f32) -> Self {
        self.min_familiarity.insert(rune, minimum);
        self
    }

    /// Adds a required achievement flag (builder pattern).
    #[must_use]
    pub fn with_required_flag(mut self, flag: impl Into<String>) -> Self {
        self.required_flags.insert(flag.into());
        self
    }

    /// True if this blueprint carries any advanced gate (prerequisite,
    /// familiarity minimums, or achievement flags). Matching a tiered
    /// blueprint requires actor and achievement context.
    pub fn is_tiered(&self) -> bool {
        self.prerequisite.is_some()
            || !self.min_familiarity.is_empty()
            || !self.required_flags.is_empty()
    }
}

/// Read-only catalog of authored blueprints, supplied once by the host.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlueprintCatalog {
    blueprints: Vec<SpellBlueprint>,
}

impl BlueprintCatalog {
    pub fn new(blueprints: Vec<SpellBlueprint>) -> Self {
        Self { blueprints }
    }

    pub fn get(&self, id: &BlueprintId) -> Option<&SpellBlueprint> {
        self.blueprints.iter().find(|b| &b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellBlueprint> {
        self.blueprints.iter()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

// ============================================================================
// Matching
// ============================================================================

/// A blueprint the spell currently satisfies, with its fit score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvolutionCandidate<'a> {
    pub blueprint: &'a SpellBlueprint,
    /// Proximity between the spell's damage profile and the blueprint's
    /// declared focus; only the ordering is load-bearing.
    pub score: f32,
}

/// Lists every blueprint the spell currently satisfies, best fit first.
///
/// Omitting `actor` or `flags` implicitly excludes all tiered blueprints.
/// Ties are broken by blueprint id so the ranking is deterministic.
pub fn list_possible_evolutions<'a>(
    spell: &Spell,
    catalog: &'a BlueprintCatalog,
    actor: Option<&Actor>,
    flags: Option<&AchievementFlags>,
) -> Vec<EvolutionCandidate<'a>> {
    let mut candidates: Vec<EvolutionCandidate<'a>> = catalog
        .iter()
        .filter(|blueprint| is_eligible(spell, blueprint, catalog, actor, flags))
        .map(|blueprint| EvolutionCandidate {
            blueprint,
            score: fit_score(spell, blueprint),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.blueprint.id.cmp(&b.blueprint.id))
    });
    candidates
}

/// Re-validates eligibility and performs the stat-preserving evolve.
///
/// Never trusts a stale candidate list: eligibility is checked again at call
/// time with the given context. Returns `None` when the blueprint is unknown
/// or not currently eligible; that is routine branching for the host, not an
/// error.
pub fn evolve_spell(
    spell: &Spell,
    blueprint_id: &BlueprintId,
    catalog: &BlueprintCatalog,
    ids: &mut SpellIdGen,
    actor: Option<&Actor>,
    flags: Option<&AchievementFlags>,
) -> Option<Spell> {
    let blueprint = catalog.get(blueprint_id)?;
    if !is_eligible(spell, blueprint, catalog, actor, flags) {
        return None;
    }

    Some(Spell {
        id: ids.next(),
        owner: spell.owner,
        name: Some(blueprint.name.clone()),
        runes: spell.runes.clone(),
        profile: spell.profile,
        growth: spell.growth,
        infusions: spell.infusions.clone(),
        combat: spell.combat.clone(),
        evolved_from: Some(spell.id),
    })
}

/// The full eligibility predicate; all conditions are mandatory.
fn is_eligible(
    spell: &Spell,
    blueprint: &SpellBlueprint,
    catalog: &BlueprintCatalog,
    actor: Option<&Actor>,
    flags: Option<&AchievementFlags>,
) -> bool {
    // A spell never re-evolves into the name it already carries.
    if spell.name.as_deref() == Some(blueprint.name.as_str()) {
        return false;
    }

    // 1. Rune set equality: not superset, not subset.
    if spell.distinct_runes() != blueprint.required_runes {
        return false;
    }

    // 2-3. Power and focus thresholds against the derived damage profile.
    // A spell without derived stats has zero output and fails any positive
    // threshold naturally.
    let (total_power, focus_ratio) = match &spell.combat {
        Some(combat) => (combat.total_power(), combat.burst.share(blueprint.focus)),
        None => (0.0, 0.0),
    };
    if total_power < blueprint.min_total_power {
        return false;
    }
    if focus_ratio < blueprint.min_focus_ratio {
        return false;
    }

    // 4. Tiered gates require actor and achievement context; omitting either
    // excludes every tiered blueprint.
    if blueprint.is_tiered() {
        let (Some(actor), Some(flags)) = (actor, flags) else {
            return false;
        };

        if let Some(prerequisite) = &blueprint.prerequisite {
            let Some(ancestor) = catalog.get(prerequisite) else {
                return false;
            };
            if spell.name.as_deref() != Some(ancestor.name.as_str()) {
                return false;
            }
        }

        for (&rune, &minimum) in &blueprint.min_familiarity {
            if actor.familiarity(rune) < minimum {
                return false;
            }
        }

        if !flags.contains_all(&blueprint.required_flags) {
            return false;
        }
    }

    true
}

/// Fit metric: how much of the spell's burst lands on the blueprint's focus
/// type. Only ordering and membership are load-bearing.
fn fit_score(spell: &Spell, blueprint: &SpellBlueprint) -> f32 {
    match &spell.combat {
        Some(combat) => combat.burst.share(blueprint.focus),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use crate::combat::CombatStats;
    use crate::damage::DamageVector;
    use crate::rune::parse_rune_sequence;
    use crate::spell::SpellId;

    fn rune(letter: char) -> RuneId {
        RuneId::from_letter(letter).unwrap()
    }

    fn catalog() -> BlueprintCatalog {
        BlueprintCatalog::new(vec![
            SpellBlueprint::base(
                "ember_ray",
                "Ember Ray",
                [rune('F'), rune('R')],
                DamageType::Fire,
                15.0,
                0.6,
            ),
            SpellBlueprint::base(
                "searing_ember_ray",
                "Searing Ember Ray",
                [rune('F'), rune('R')],
                DamageType::Fire,
                15.0,
                0.6,
            )
            .with_prerequisite(BlueprintId::new("ember_ray"))
            .with_min_familiarity(rune('F'), 0.5)
            .with_required_flag("trial_of_flame"),
        ])
    }

    fn candidate_spell() -> Spell {
        let mut spell = Spell::create_nameless(
            SpellId(7),
            ActorId(1),
            parse_rune_sequence("FFR").unwrap(),
            Vec::new(),
        );
        spell.combat = Some(CombatStats {
            burst: DamageVector::single(DamageType::Fire, 20.0),
            dot: DamageVector::ZERO,
            dot_duration_secs: 0.0,
            effects: Vec::new(),
        });
        spell
    }

    #[test]
    fn base_tier_requires_exact_rune_set() {
        let catalog = catalog();
        let spell = candidate_spell();
        let listed = list_possible_evolutions(&spell, &catalog, None, None);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].blueprint.id.as_str(), "ember_ray");

        // Superset: extra rune disqualifies.
        let mut superset = spell.clone();
        superset.runes = parse_rune_sequence("FFRG").unwrap();
        assert!(list_possible_evolutions(&superset, &catalog, None, None).is_empty());

        // Subset: missing rune disqualifies.
        let mut subset = spell.clone();
        subset.runes = parse_rune_sequence("FF").unwrap();
        assert!(list_possible_evolutions(&subset, &catalog, None, None).is_empty());
    }

    #[test]
    fn off_type_damage_breaks_focus_gate() {
        let catalog = catalog();
        let mut spell = candidate_spell();
        spell
            .combat
            .as_mut()
            .unwrap()
            .burst
            .add(DamageType::Poison, 50.0);

        assert!(list_possible_evolutions(&spell, &catalog, None, None).is_empty());
    }

    #[test]
    fn power_threshold_is_enforced() {
        let catalog = catalog();
        let mut spell = candidate_spell();
        spell.combat.as_mut().unwrap().burst = DamageVector::single(DamageType::Fire, 5.0);

        assert!(list_possible_evolutions(&spell, &catalog, None, None).is_empty());
    }

    #[test]
    fn underived_spell_matches_nothing() {
        let catalog = catalog();
        let mut spell = candidate_spell();
        spell.combat = None;
        assert!(list_possible_evolutions(&spell, &catalog, None, None).is_empty());
    }

    #[test]
    fn tiered_blueprints_need_full_context() {
        let catalog = catalog();
        let mut ids = SpellIdGen::starting_at(100);

        let nameless = candidate_spell();
        let evolved = evolve_spell(
            &nameless,
            &BlueprintId::new("ember_ray"),
            &catalog,
            &mut ids,
            None,
            None,
        )
        .unwrap();

        let mut adept = Actor::new(ActorId(1), 100.0, 50.0);
        adept.familiarity_xp.set(rune('F'), 1000.0);
        let mut flags = AchievementFlags::new();
        flags.insert("trial_of_flame");

        // Without context the tiered blueprint is invisible.
        assert!(list_possible_evolutions(&evolved, &catalog, None, None).is_empty());

        // With context it appears.
        let listed = list_possible_evolutions(&evolved, &catalog, Some(&adept), Some(&flags));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].blueprint.id.as_str(), "searing_ember_ray");

        // Missing flag keeps it gated even with familiarity.
        let empty_flags = AchievementFlags::new();
        assert!(
            list_possible_evolutions(&evolved, &catalog, Some(&adept), Some(&empty_flags))
                .is_empty()
        );
    }

    #[test]
    fn evolve_preserves_mechanics_and_links_ancestry() {
        let catalog = catalog();
        let mut ids = SpellIdGen::starting_at(100);
        let spell = candidate_spell();

        let evolved = evolve_spell(
            &spell,
            &BlueprintId::new("ember_ray"),
            &catalog,
            &mut ids,
            None,
            None,
        )
        .unwrap();

        assert_ne!(evolved.id, spell.id);
        assert_eq!(evolved.name.as_deref(), Some("Ember Ray"));
        assert_eq!(evolved.evolved_from, Some(spell.id));
        assert_eq!(evolved.runes, spell.runes);
        assert_eq!(evolved.growth, spell.growth);
        assert_eq!(evolved.combat, spell.combat);
        // The source spell is untouched; the chain is append-only.
        assert!(spell.name.is_none());
    }

    #[test]
    fn evolve_fails_closed_on_ineligible_blueprint() {
        let catalog = catalog();
        let mut ids = SpellIdGen::new();
        let mut spell = candidate_spell();
        spell.runes = parse_rune_sequence("FF").unwrap();

        assert!(
            evolve_spell(
                &spell,
                &BlueprintId::new("ember_ray"),
                &catalog,
                &mut ids,
                None,
                None,
            )
            .is_none()
        );
        assert!(
            evolve_spell(
                &spell,
                &BlueprintId::new("no_such_blueprint"),
                &catalog,
                &mut ids,
                None,
                None,
            )
            .is_none()
        );
    }

    #[test]
    fn ranking_is_descending_and_deterministic() {
        let mut spell = candidate_spell();
        spell
            .combat
            .as_mut()
            .unwrap()
            .burst
            .add(DamageType::Poison, 5.0);

        let catalog = BlueprintCatalog::new(vec![
            SpellBlueprint::base(
                "toxin_lash",
                "Toxin Lash",
                [rune('F'), rune('R')],
                DamageType::Poison,
                5.0,
                0.1,
            ),
            SpellBlueprint::base(
                "ember_ray",
                "Ember Ray",
                [rune('F'), rune('R')],
                DamageType::Fire,
                5.0,
                0.1,
            ),
        ]);

        let listed = list_possible_evolutions(&spell, &catalog, None, None);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].blueprint.id.as_str(), "ember_ray");
        assert!(listed[0].score > listed[1].score);
    }
}
