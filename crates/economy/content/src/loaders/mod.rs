//! Content loaders for reading economy data from files.
//!
//! Upgrade tables and target chains are RON, tunables are TOML. Every loader
//! also exposes a `parse` entry point so the embedded defaults share the same
//! code path as on-disk content.

pub mod config;
pub mod defaults;
pub mod factory;
pub mod targets;
pub mod upgrades;

pub use config::ConfigLoader;
pub use defaults::DefaultContent;
pub use factory::ContentFactory;
pub use targets::{TargetCatalog, TargetLoader};
pub use upgrades::{UpgradeCatalog, UpgradeLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
