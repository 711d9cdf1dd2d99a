//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use spell_core::{BlueprintCatalog, RuneRegistry};

use crate::loaders::{BlueprintLoader, LoadResult, RuneLoader};

/// Content factory that loads all catalog data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── runes.ron
/// └── blueprints.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the rune registry from `runes.ron`.
    pub fn load_runes(&self) -> LoadResult<RuneRegistry> {
        let path = self.data_dir.join("runes.ron");
        let registry = RuneLoader::load(&path)?;
        tracing::info!(path = %path.display(), "loaded rune registry");
        Ok(registry)
    }

    /// Load the blueprint catalog from `blueprints.ron`.
    pub fn load_blueprints(&self) -> LoadResult<BlueprintCatalog> {
        let path = self.data_dir.join("blueprints.ron");
        let catalog = BlueprintLoader::load(&path)?;
        tracing::info!(
            path = %path.display(),
            blueprints = catalog.len(),
            "loaded blueprint catalog"
        );
        Ok(catalog)
    }

    /// Load everything the engine needs.
    pub fn load_all(&self) -> LoadResult<(RuneRegistry, BlueprintCatalog)> {
        Ok((self.load_runes()?, self.load_blueprints()?))
    }
}
