//! Persistence of environment economies.
//!
//! [`codec`] defines the JSON record layout and the tolerant decoding path;
//! [`SnapshotService`] stores documents through a
//! [`SnapshotRepository`](crate::repository::SnapshotRepository).

pub mod codec;
mod service;

pub use codec::{
    CodecError, EnvironmentRecord, FreshReason, LoadOutcome, LoadStatus, RegistryRecord,
    UpgradeRecord, decode_environment, decode_or_fresh, encode_environment,
};
pub use service::{RegistryLoadReport, SnapshotService};
