//! Data-driven economy content and its loaders.
//!
//! This crate turns data files into the shared [`economy_core::Catalog`] and
//! [`economy_core::EconomyConfig`]:
//! - Upgrade table (`upgrades.ron`)
//! - Target chain (`targets.ron`)
//! - Economy tunables (`config.toml`)
//!
//! A default copy of every file is compiled in (see [`DefaultContent`]) so
//! that tools and tests can run without a data directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DefaultContent, LoadResult, TargetCatalog, TargetLoader,
    UpgradeCatalog, UpgradeLoader,
};
