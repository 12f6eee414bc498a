//! Data-driven content definitions and loaders.
//!
//! This crate turns RON/TOML data files into the read-only collaborators the
//! core consumes:
//! - Game configuration (TOML)
//! - Activity metadata overrides (RON), served through `ActivityOracle`
//! - Item and recipe catalogs (RON), served through `ItemOracle`
//!
//! Content is consumed through oracles and never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActivityTable, ConfigLoader, ItemCatalog, LoadResult};
