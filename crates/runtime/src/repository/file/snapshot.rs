//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SnapshotRepository, validate_slot};

/// Stores each slot as `{slot}.json` inside a base directory.
///
/// Writes go to a sibling temp file that is renamed over the target, so an
/// interrupted save leaves the previous snapshot intact.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a new file-based snapshot repository, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", slot))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, slot: &str, contents: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved snapshot[{}] to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<String>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let contents =
            String::from_utf8(bytes).map_err(|e| RepositoryError::Encoding(e.to_string()))?;

        tracing::debug!("Loaded snapshot[{}] from {}", slot, path.display());

        Ok(Some(contents))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot[{}] at {}", slot, path.display());
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                slots.push(stem.to_string());
            }
        }

        slots.sort();
        Ok(slots)
    }
}
