//! Named-spell blueprint catalog loader.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spell_core::{BlueprintCatalog, BlueprintId, DamageType, RuneId, SpellBlueprint};

use crate::loaders::{LoadResult, read_file};

// ============================================================================
// File Format
// ============================================================================

/// Blueprint catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintCatalogFile {
    pub blueprints: Vec<BlueprintSpec>,
}

/// One blueprint entry as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Required rune set as a letter string, e.g. "FR".
    pub runes: String,
    pub focus: String,
    pub min_total_power: f32,
    pub min_focus_ratio: f32,
    /// Per-rune familiarity minimums as `(letter, minimum)` pairs.
    #[serde(default)]
    pub min_familiarity: Vec<(char, f32)>,
    #[serde(default)]
    pub required_flags: Vec<String>,
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

// ============================================================================
// Loader
// ============================================================================

/// Loader for the blueprint catalog from RON files.
pub struct BlueprintLoader;

impl BlueprintLoader {
    /// Load the blueprint catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<BlueprintCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a blueprint catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<BlueprintCatalog> {
        let catalog: BlueprintCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse blueprint catalog RON: {}", e))?;

        let blueprints = catalog
            .blueprints
            .into_iter()
            .map(convert_blueprint)
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(BlueprintCatalog::new(blueprints))
    }
}

/// Converts one authored blueprint entry into the core's catalog entry.
fn convert_blueprint(spec: BlueprintSpec) -> LoadResult<SpellBlueprint> {
    let focus = DamageType::from_str(&spec.focus)
        .map_err(|_| anyhow::anyhow!("Blueprint '{}': unknown focus '{}'", spec.id, spec.focus))?;
    let required_runes = spec
        .runes
        .chars()
        .map(|letter| {
            RuneId::from_letter(letter)
                .map_err(|e| anyhow::anyhow!("Blueprint '{}': {}", spec.id, e))
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let mut blueprint = SpellBlueprint::base(
        spec.id.clone(),
        spec.name,
        required_runes,
        focus,
        spec.min_total_power,
        spec.min_focus_ratio,
    );
    blueprint.description = spec.description;
    blueprint.hidden = spec.hidden;

    for (letter, minimum) in spec.min_familiarity {
        let rune = RuneId::from_letter(letter)
            .map_err(|e| anyhow::anyhow!("Blueprint '{}': {}", spec.id, e))?;
        blueprint = blueprint.with_min_familiarity(rune, minimum);
    }
    for flag in spec.required_flags {
        blueprint = blueprint.with_required_flag(flag);
    }
    if let Some(prerequisite) = spec.prerequisite {
        blueprint = blueprint.with_prerequisite(BlueprintId::new(prerequisite));
    }

    Ok(blueprint)
}
