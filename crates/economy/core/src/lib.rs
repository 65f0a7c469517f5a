//! Deterministic economy rules for an incremental game.
//!
//! `economy-core` owns the numeric engine and the progression rules shared by
//! the human player and every training bot:
//! - [`number`]: extended-range decimal numbers
//! - [`catalog`]: the shared, validated upgrade table and target chain
//! - [`stats`]: aggregation of owned upgrade levels into derived stats
//! - [`progress`]: the target-progression state machine
//! - [`environment`]: one isolated economy driven through its action API
//!
//! The crate is synchronous and performs no I/O. Loading content and
//! persisting environments are the job of `economy-content` and `runtime`.
pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod events;
pub mod experience;
pub mod ledger;
pub mod number;
pub mod progress;
pub mod rng;
pub mod stats;

pub use catalog::{
    Catalog, CatalogError, CostCurrency, MasteryEffect, Milestone, TargetChain, TargetDefinition,
    TargetId, UnlockCondition, UpgradeCategory, UpgradeDefinition, UpgradeId,
};
pub use config::EconomyConfig;
pub use environment::{
    ActionError, ActivityCounters, BonusOrb, Controller, Environment, EnvironmentState,
    PurchaseReceipt, Requirement, RestoreReport,
};
pub use error::{EconomyError, ErrorSeverity};
pub use events::{EconomyEvent, EnvironmentListener, EventLog};
pub use experience::{experience_for_level, level_from_experience};
pub use ledger::Ledger;
pub use number::{ExtendedNumber, NumberParseError};
pub use progress::{Completion, ProgressError, TargetProgress};
pub use rng::{PcgRng, compute_seed};
pub use stats::{OwnedUpgrades, StatKind, StatSet, recalculate};
