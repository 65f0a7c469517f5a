//! Economy configuration loader.

use std::path::Path;

use economy_core::EconomyConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for economy configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EconomyConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EconomyConfig> {
        let config: EconomyConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.bonus_min_lifetime > config.bonus_max_lifetime {
            anyhow::bail!(
                "bonus_min_lifetime ({}) exceeds bonus_max_lifetime ({})",
                config.bonus_min_lifetime,
                config.bonus_max_lifetime
            );
        }

        Ok(config)
    }
}
