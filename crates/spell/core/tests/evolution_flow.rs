//! End-to-end evolution scenario: discover a named spell, master its runes,
//! and unlock its tiered successor.

use spell_core::{
    AchievementFlags, Actor, ActorId, BlueprintCatalog, BlueprintId, DamageType, DamageVector,
    EngineConfig, RuneDefinition, RuneId, RuneRegistry, Spell, SpellBlueprint, SpellIdGen, derive,
    evolve_spell, list_possible_evolutions, parse_rune_sequence, record_spell_cast,
};

fn rune(letter: char) -> RuneId {
    RuneId::from_letter(letter).unwrap()
}

fn registry() -> RuneRegistry {
    let definitions = RuneId::all()
        .map(|id| {
            let base = RuneDefinition::new(id, 1.0, 1.0, 2.0);
            match id.letter() {
                'F' => base.with_damage(DamageVector::single(DamageType::Fire, 10.0)),
                _ => base,
            }
        })
        .collect();
    RuneRegistry::new(definitions).unwrap()
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
        .with_min_familiarity(rune('F'), 0.6)
        .with_min_familiarity(rune('R'), 0.6)
        .with_required_flag("trial_of_flame"),
    ])
}

#[test]
fn mastery_unlocks_the_tiered_successor() {
    let registry = registry();
    let catalog = catalog();
    let config = EngineConfig::default();
    let mut ids = SpellIdGen::new();

    let mut caster = Actor::new(ActorId(1), 100.0, 80.0);
    let mut flags = AchievementFlags::new();

    // Craft a candidate from exactly the blueprint's runes and derive it.
    let mut spell = Spell::create_nameless(
        ids.next(),
        caster.id,
        parse_rune_sequence("FFR").unwrap(),
        Vec::new(),
    );
    derive(&mut spell, &caster, &registry, &config);

    // The base blueprint appears immediately.
    let listed = list_possible_evolutions(&spell, &catalog, Some(&caster), Some(&flags));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].blueprint.id.as_str(), "ember_ray");

    // Evolving returns only what the list promised, and the tier-2 entry is
    // still gated: no casts recorded, no achievement earned.
    let ember_ray = evolve_spell(
        &spell,
        &BlueprintId::new("ember_ray"),
        &catalog,
        &mut ids,
        Some(&caster),
        Some(&flags),
    )
    .unwrap();
    assert_eq!(ember_ray.evolved_from, Some(spell.id));
    assert!(
        list_possible_evolutions(&ember_ray, &catalog, Some(&caster), Some(&flags)).is_empty()
    );

    // 80 recorded casts of the named spell plus the prerequisite achievement.
    for _ in 0..80 {
        record_spell_cast(&mut caster, &ember_ray, &config);
    }
    flags.insert("trial_of_flame");

    let unlocked = list_possible_evolutions(&ember_ray, &catalog, Some(&caster), Some(&flags));
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].blueprint.id.as_str(), "searing_ember_ray");

    let searing = evolve_spell(
        &ember_ray,
        &BlueprintId::new("searing_ember_ray"),
        &catalog,
        &mut ids,
        Some(&caster),
        Some(&flags),
    )
    .unwrap();
    assert_eq!(searing.name.as_deref(), Some("Searing Ember Ray"));
    assert_eq!(searing.evolved_from, Some(ember_ray.id));
    assert_eq!(searing.combat, ember_ray.combat);
}

#[test]
fn evolve_agrees_with_listing_at_the_same_moment() {
    let registry = registry();
    let catalog = catalog();
    let config = EngineConfig::default();
    let mut ids = SpellIdGen::new();

    let caster = Actor::new(ActorId(1), 100.0, 80.0);
    let flags = AchievementFlags::new();

    let mut spell = Spell::create_nameless(
        ids.next(),
        caster.id,
        parse_rune_sequence("FFR").unwrap(),
        Vec::new(),
    );
    derive(&mut spell, &caster, &registry, &config);

    for blueprint in catalog.iter() {
        let listed = list_possible_evolutions(&spell, &catalog, Some(&caster), Some(&flags))
            .iter()
            .any(|c| c.blueprint.id == blueprint.id);
        let evolved = evolve_spell(
            &spell,
            &blueprint.id,
            &catalog,
            &mut ids,
            Some(&caster),
            Some(&flags),
        );
        assert_eq!(listed, evolved.is_some());
    }
}

#[test]
fn empty_spell_is_ordinary_but_unevolvable() {
    let registry = registry();
    let catalog = catalog();
    let config = EngineConfig::default();
    let mut ids = SpellIdGen::new();

    let caster = Actor::new(ActorId(1), 100.0, 80.0);
    let mut empty = Spell::create_nameless(ids.next(), caster.id, Vec::new(), Vec::new());

    // Deriving an empty sequence is not an error.
    derive(&mut empty, &caster, &registry, &config);
    assert!(empty.combat.as_ref().unwrap().burst.is_zero());

    assert!(list_possible_evolutions(&empty, &catalog, None, None).is_empty());
}
