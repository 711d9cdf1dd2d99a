//! Rune registry loader.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spell_core::{
    DamageType, DamageVector, EffectBlueprint, EffectKind, RuneDefinition, RuneId, RuneRegistry,
    RuneTags,
};

use crate::loaders::{LoadResult, read_file};

// ============================================================================
// File Format
// ============================================================================

/// Rune catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneCatalogFile {
    pub runes: Vec<RuneSpec>,
}

/// One rune entry as authored in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneSpec {
    pub letter: char,
    pub power_factor: f32,
    pub control_factor: f32,
    #[serde(default)]
    pub instability: f32,
    pub mana_cost: f32,
    /// Tag names: "sustained", "projectile", "area", "self_cast", "ritual".
    #[serde(default)]
    pub tags: Vec<String>,
    /// Damage entries as `(damage_type_name, amount)` pairs.
    #[serde(default)]
    pub damage: Vec<(String, f32)>,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    #[serde(default)]
    pub overcharge: Vec<OverchargeSpec>,
}

/// One effect blueprint as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: String,
    pub magnitude: f32,
    pub duration_secs: f32,
    #[serde(default)]
    pub buff: bool,
    #[serde(default)]
    pub max_stacks: Option<u8>,
}

/// One overcharge tier as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverchargeSpec {
    pub min_extra_mana: f32,
    pub effect: EffectSpec,
}

// ============================================================================
// Loader
// ============================================================================

/// Loader for the rune registry from RON files.
pub struct RuneLoader;

impl RuneLoader {
    /// Load the rune registry from a RON file.
    ///
    /// The file must define exactly one rune per letter A-Z; a missing or
    /// duplicated letter is rejected by `RuneRegistry::new`.
    pub fn load(path: &Path) -> LoadResult<RuneRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a rune registry from RON text.
    pub fn parse(content: &str) -> LoadResult<RuneRegistry> {
        let catalog: RuneCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rune catalog RON: {}", e))?;

        let definitions = catalog
            .runes
            .into_iter()
            .map(convert_rune)
            .collect::<LoadResult<Vec<_>>>()?;

        RuneRegistry::new(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid rune catalog: {}", e))
    }
}

/// Converts one authored rune entry into the core's validated definition.
fn convert_rune(spec: RuneSpec) -> LoadResult<RuneDefinition> {
    let id = RuneId::from_letter(spec.letter)
        .map_err(|e| anyhow::anyhow!("Invalid rune entry: {}", e))?;

    let mut definition = RuneDefinition::new(id, spec.power_factor, spec.control_factor, spec.mana_cost)
        .with_instability(spec.instability)
        .with_tags(convert_tags(&spec.tags)?);

    if !spec.damage.is_empty() {
        let mut damage = DamageVector::ZERO;
        for (name, amount) in &spec.damage {
            let damage_type = parse_damage_type(name)?;
            if *amount < 0.0 {
                anyhow::bail!(
                    "Rune '{}': negative damage amount {} for '{}'",
                    spec.letter,
                    amount,
                    name
                );
            }
            damage.add(damage_type, *amount);
        }
        definition = definition.with_damage(damage);
    }

    for effect in &spec.effects {
        definition = definition.with_effect(convert_effect(effect)?);
    }
    for tier in &spec.overcharge {
        definition = definition.with_overcharge(tier.min_extra_mana, convert_effect(&tier.effect)?);
    }

    Ok(definition)
}

fn convert_tags(names: &[String]) -> LoadResult<RuneTags> {
    let mut tags = RuneTags::empty();
    for name in names {
        tags |= match name.as_str() {
            "sustained" => RuneTags::SUSTAINED,
            "projectile" => RuneTags::PROJECTILE,
            "area" => RuneTags::AREA,
            "self_cast" => RuneTags::SELF_CAST,
            "ritual" => RuneTags::RITUAL,
            other => anyhow::bail!("Unknown rune tag '{}'", other),
        };
    }
    Ok(tags)
}

fn parse_damage_type(name: &str) -> LoadResult<DamageType> {
    DamageType::from_str(name).map_err(|_| anyhow::anyhow!("Unknown damage type '{}'", name))
}

pub(crate) fn convert_effect(spec: &EffectSpec) -> LoadResult<EffectBlueprint> {
    let kind = EffectKind::from_str(&spec.kind)
        .map_err(|_| anyhow::anyhow!("Unknown effect kind '{}'", spec.kind))?;
    if spec.magnitude < 0.0 {
        anyhow::bail!(
            "Effect '{}': negative magnitude {}",
            spec.kind,
            spec.magnitude
        );
    }

    let mut blueprint = if spec.buff {
        EffectBlueprint::buff(kind, spec.magnitude, spec.duration_secs)
    } else {
        EffectBlueprint::debuff(kind, spec.magnitude, spec.duration_secs)
    };
    if let Some(max_stacks) = spec.max_stacks {
        blueprint = blueprint.with_max_stacks(max_stacks);
    }
    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A full catalog with one interesting rune and 25 filler entries.
    fn catalog_ron() -> String {
        let mut runes = vec![
            r#"(
                letter: 'F',
                power_factor: 1.2,
                control_factor: 1.0,
                instability: 0.3,
                mana_cost: 2.5,
                tags: ["projectile"],
                damage: [("fire", 10.0)],
                effects: [(kind: "burn", magnitude: 2.0, duration_secs: 3.0)],
                overcharge: [
                    (min_extra_mana: 10.0, effect: (kind: "burn", magnitude: 5.0, duration_secs: 4.0)),
                ],
            )"#
            .to_owned(),
        ];
        for letter in ('A'..='Z').filter(|&l| l != 'F') {
            runes.push(format!(
                "(letter: '{letter}', power_factor: 1.0, control_factor: 1.0, mana_cost: 1.0)"
            ));
        }
        format!("(runes: [{}])", runes.join(","))
    }

    #[test]
    fn parses_a_complete_catalog() {
        let registry = RuneLoader::parse(&catalog_ron()).unwrap();

        let fire = registry.get(RuneId::from_letter('F').unwrap());
        assert_eq!(fire.power_factor, 1.2);
        assert!(fire.tags.contains(RuneTags::PROJECTILE));
        assert_eq!(fire.damage.unwrap().get(DamageType::Fire), 10.0);
        assert_eq!(fire.effects.len(), 1);
        assert_eq!(fire.overcharge.len(), 1);
    }

    #[test]
    fn rejects_incomplete_catalog() {
        let ron = "(runes: [(letter: 'A', power_factor: 1.0, control_factor: 1.0, mana_cost: 1.0)])";
        let err = RuneLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn rejects_negative_amounts() {
        let negative_damage = catalog_ron().replace("(\"fire\", 10.0)", "(\"fire\", -10.0)");
        assert!(RuneLoader::parse(&negative_damage).is_err());

        let negative_magnitude = catalog_ron().replace("magnitude: 2.0", "magnitude: -2.0");
        assert!(RuneLoader::parse(&negative_magnitude).is_err());
    }

    #[test]
    fn rejects_unknown_names() {
        let bad_type = catalog_ron().replace("\"fire\"", "\"shadow\"");
        assert!(RuneLoader::parse(&bad_type).is_err());

        let bad_tag = catalog_ron().replace("\"projectile\"", "\"sticky\"");
        assert!(RuneLoader::parse(&bad_tag).is_err());
    }
}
