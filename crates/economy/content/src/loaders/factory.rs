//! Content factory for building the shared catalog from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use economy_core::{Catalog, EconomyConfig, TargetDefinition, UpgradeDefinition};

use crate::loaders::{ConfigLoader, LoadResult, TargetLoader, UpgradeLoader};

/// Content factory that loads all economy content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── upgrades.ron
/// └── targets.ron
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

    /// Load economy configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EconomyConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load upgrade definitions from `upgrades.ron`.
    pub fn load_upgrades(&self) -> LoadResult<Vec<UpgradeDefinition>> {
        let path = self.data_dir.join("upgrades.ron");
        UpgradeLoader::load(&path)
    }

    /// Load the target chain from `targets.ron`.
    pub fn load_targets(&self) -> LoadResult<Vec<TargetDefinition>> {
        let path = self.data_dir.join("targets.ron");
        TargetLoader::load(&path)
    }

    /// Load and validate the complete catalog.
    pub fn load_catalog(&self) -> LoadResult<Arc<Catalog>> {
        let upgrades = self.load_upgrades()?;
        let targets = self.load_targets()?;
        let catalog = Catalog::new(upgrades, targets).map_err(|e| {
            anyhow::anyhow!("Invalid catalog in {}: {}", self.data_dir.display(), e)
        })?;

        tracing::info!(
            "Loaded catalog from {}: {} upgrades, {} targets",
            self.data_dir.display(),
            catalog.upgrades().count(),
            catalog.targets().len()
        );

        Ok(Arc::new(catalog))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_catalog_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("upgrades.ron"),
            r#"(upgrades: [(id: "unlock_t2", category: TargetUnlock, base_cost: 10, cost_growth: 1.0, max_level: 1)])"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("targets.ron"),
            r#"(targets: [
                (id: "t1", base_distance: 100, base_reward: 5, next: Some("t2")),
                (id: "t2", base_distance: 500, base_reward: 30, unlock_upgrade: Some("unlock_t2")),
            ])"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("config.toml"), "seed = 3\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let catalog = factory.load_catalog().unwrap();
        assert_eq!(catalog.targets().len(), 2);
        assert_eq!(factory.load_config().unwrap().seed, 3);
    }

    #[test]
    fn invalid_content_is_rejected_with_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upgrades.ron"), "(upgrades: [])").unwrap();
        std::fs::write(dir.path().join("targets.ron"), "(targets: [])").unwrap();

        let error = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(error.to_string().contains("Invalid catalog"));
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path()).load_config().unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }
}
