//! Content loaders for reading game data from files.
//!
//! Each loader parses a RON or TOML document into core types. Catalogs ship
//! embedded copies of the crate's `data/` files so a binary runs without any
//! files on disk.

pub mod activities;
pub mod config;
pub mod item;

pub use activities::ActivityTable;
pub use config::ConfigLoader;
pub use item::ItemCatalog;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
