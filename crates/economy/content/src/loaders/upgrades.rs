//! Upgrade table loader.

use std::path::Path;

use economy_core::UpgradeDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Upgrade table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCatalog {
    pub upgrades: Vec<UpgradeDefinition>,
}

/// Loader for upgrade definitions from RON files.
pub struct UpgradeLoader;

impl UpgradeLoader {
    /// Load upgrade definitions from a RON file containing an [`UpgradeCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<UpgradeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<UpgradeDefinition>> {
        let catalog: UpgradeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade catalog RON: {}", e))?;

        Ok(catalog.upgrades)
    }
}
