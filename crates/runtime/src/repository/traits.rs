//! Repository contract for saving and loading serialized snapshots.

use crate::repository::{RepositoryError, Result};

/// Storage for serialized snapshots addressed by slot name.
///
/// Repositories move opaque text. Encoding and decoding environments is the
/// job of [`SnapshotService`](crate::persistence::SnapshotService), which
/// keeps a truncated or hand-edited file from ever reaching the repository
/// layer as a typed error.
pub trait SnapshotRepository: Send + Sync {
    /// Store `contents` under `slot`, replacing any previous snapshot.
    fn save(&self, slot: &str, contents: &str) -> Result<()>;

    /// Load the snapshot stored under `slot`, if any.
    fn load(&self, slot: &str) -> Result<Option<String>>;

    /// Check if a snapshot exists.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a snapshot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all stored slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Slot names become file names, so they are restricted to a portable set.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_are_restricted() {
        assert!(validate_slot("environments").is_ok());
        assert!(validate_slot("bot-07_backup").is_ok());
        assert!(validate_slot("").is_err());
        assert!(validate_slot("../escape").is_err());
        assert!(validate_slot("with space").is_err());
        assert!(validate_slot(&"x".repeat(65)).is_err());
    }
}
