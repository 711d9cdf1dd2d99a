//! Content loaders for reading catalog data from files.
//!
//! Each loader pairs a serde format struct (the file's shape) with a
//! conversion into the core's validated types. Malformed data fails loudly
//! at load time; nothing is silently ignored.

pub mod blueprints;
pub mod factory;
pub mod runes;

pub use blueprints::BlueprintLoader;
pub use factory::ContentFactory;
pub use runes::RuneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
