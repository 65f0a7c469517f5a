//! Repository layer for persisted environments.
//!
//! Repositories only store and fetch snapshot text by slot name. Static
//! content (upgrades, targets) is loaded by `economy-content`, not here.

mod error;
mod traits;

pub mod file;
pub mod memory;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;

pub(crate) use traits::validate_slot;
