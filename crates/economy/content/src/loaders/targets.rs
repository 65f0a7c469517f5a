//! Target chain loader.

use std::path::Path;

use economy_core::TargetDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Target chain structure for RON files. The first entry is the chain head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCatalog {
    pub targets: Vec<TargetDefinition>,
}

/// Loader for the target chain from RON files.
pub struct TargetLoader;

impl TargetLoader {
    /// Load target definitions from a RON file containing a [`TargetCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<TargetDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TargetDefinition>> {
        let catalog: TargetCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse target chain RON: {}", e))?;

        Ok(catalog.targets)
    }
}
