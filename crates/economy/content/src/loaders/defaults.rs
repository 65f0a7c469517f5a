//! Content compiled into the binary.
//!
//! Lets the simulation start without a data directory; the files under
//! `data/` are the same ones a [`ContentFactory`](crate::ContentFactory) reads.

use std::sync::Arc;

use economy_core::{Catalog, EconomyConfig};

use crate::loaders::{ConfigLoader, LoadResult, TargetLoader, UpgradeLoader};

const UPGRADES_RON: &str = include_str!("../../data/upgrades.ron");
const TARGETS_RON: &str = include_str!("../../data/targets.ron");
const CONFIG_TOML: &str = include_str!("../../data/config.toml");

/// Accessors for the embedded default content.
pub struct DefaultContent;

impl DefaultContent {
    pub fn catalog() -> LoadResult<Arc<Catalog>> {
        let upgrades = UpgradeLoader::parse(UPGRADES_RON)?;
        let targets = TargetLoader::parse(TARGETS_RON)?;
        let catalog = Catalog::new(upgrades, targets)
            .map_err(|e| anyhow::anyhow!("Invalid embedded catalog: {}", e))?;
        Ok(Arc::new(catalog))
    }

    pub fn config() -> LoadResult<EconomyConfig> {
        ConfigLoader::parse(CONFIG_TOML)
    }
}

#[cfg(test)]
mod tests {
    use economy_core::{Controller, Environment, StatKind, UpgradeCategory};

    use super::*;

    #[test]
    fn embedded_content_is_valid() {
        let catalog = DefaultContent::catalog().unwrap();
        assert!(catalog.targets().len() >= 5);
        DefaultContent::config().unwrap();

        // Every target past the head is gated, and every target has a mastery.
        for target in catalog.targets().iter().skip(1) {
            assert!(target.unlock_upgrade.is_some(), "{}", target.id);
        }
        for target in catalog.targets().iter() {
            assert!(catalog.mastery_for(target.id.as_str()).is_some(), "{}", target.id);
        }
        assert!(
            catalog
                .upgrades()
                .any(|upgrade| upgrade.category == UpgradeCategory::SpawnRate)
        );
    }

    #[test]
    fn fresh_environment_on_default_content() {
        let catalog = DefaultContent::catalog().unwrap();
        let config = DefaultContent::config().unwrap();
        let environment = Environment::new("player", Controller::Human, catalog.clone(), config, 1);

        let head = catalog.targets().head().unwrap();
        assert_eq!(environment.current_target(), Some(&head.id));
        assert_eq!(environment.stat(StatKind::ClickPower).to_f64(), 0.1);
    }
}
