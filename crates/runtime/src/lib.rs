//! Runtime orchestration for the economy simulation.
//!
//! This crate owns everything around a single [`Environment`](economy_core::Environment)
//! that needs more than the pure rules: a registry of environments sharing
//! one catalog, a fixed-step scheduler with autosave, and persistence.
//!
//! Modules are organized by responsibility:
//! - [`registry`] creates, ranks, ticks and resets environments
//! - [`scheduler`] turns wall-clock time into fixed simulation steps
//! - [`persistence`] encodes environments and restores them tolerantly
//! - [`repository`] stores snapshot documents on disk or in memory
pub mod config;
pub mod error;
pub mod names;
pub mod persistence;
pub mod registry;
pub mod repository;
pub mod scheduler;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use names::BotNameGenerator;
pub use persistence::{
    CodecError, EnvironmentRecord, FreshReason, LoadOutcome, LoadStatus, RegistryLoadReport,
    RegistryRecord, SnapshotService, UpgradeRecord, decode_environment, decode_or_fresh,
    encode_environment,
};
pub use registry::{EnvironmentHandle, EnvironmentRegistry, RankingEntry, ScoreGap};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};
pub use scheduler::{FixedStepScheduler, StepReport};
