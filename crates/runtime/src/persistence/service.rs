//! Snapshot service combining a repository with the JSON codec.

use std::path::Path;

use chrono::{DateTime, Utc};
use economy_core::Environment;

use crate::error::Result;
use crate::persistence::codec::{
    EnvironmentRecord, FreshReason, LoadOutcome, LoadStatus, RawRegistryRecord, RegistryRecord,
    decode_or_fresh, encode_environment, restore_logged,
};
use crate::registry::EnvironmentRegistry;
use crate::repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};

/// Result of restoring a whole registry from one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryLoadReport {
    /// When the document was written, if it said so.
    pub saved_at: Option<DateTime<Utc>>,
    /// Per-environment outcome, in registry order.
    pub statuses: Vec<(String, LoadStatus)>,
    /// Names of readable records with no matching environment.
    pub unmatched: Vec<String>,
}

impl RegistryLoadReport {
    pub fn restored(&self) -> usize {
        self.statuses
            .iter()
            .filter(|(_, status)| status.is_restored())
            .count()
    }
}

/// Saves and loads environments through a [`SnapshotRepository`].
///
/// A corrupt document is deleted once it has been discarded, so the next
/// start does not trip over it again.
pub struct SnapshotService {
    repo: Box<dyn SnapshotRepository>,
}

impl SnapshotService {
    pub fn new(repo: Box<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }

    /// Create a file-based snapshot service storing slots under `base_dir`.
    pub fn new_file_based(base_dir: impl AsRef<Path>) -> Result<Self> {
        let repo = FileSnapshotRepository::new(base_dir)?;
        Ok(Self::new(Box::new(repo)))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemorySnapshotRepository::new()))
    }

    pub fn repository(&self) -> &dyn SnapshotRepository {
        self.repo.as_ref()
    }

    /// Writes every environment of `registry` to `slot` in one document.
    pub fn save_registry(&self, slot: &str, registry: &EnvironmentRegistry) -> Result<()> {
        let document = RegistryRecord {
            saved_at: Utc::now(),
            environments: registry
                .iter()
                .map(|(_, environment)| EnvironmentRecord::capture(environment))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        self.repo.save(slot, &json)?;

        tracing::info!(
            "Saved {} environments to slot {:?}",
            document.environments.len(),
            slot
        );
        Ok(())
    }

    /// Restores environments of `registry` by name from `slot`.
    ///
    /// Environments without a readable record are reset, so every one
    /// reported as fresh really starts over. Only repository failures are
    /// errors.
    pub fn load_into_registry(
        &self,
        slot: &str,
        registry: &mut EnvironmentRegistry,
    ) -> Result<RegistryLoadReport> {
        let mut report = RegistryLoadReport::default();

        let Some(json) = self.read_slot(slot)? else {
            report.statuses = reset_all_fresh(registry, FreshReason::Missing);
            return Ok(report);
        };

        let document: RawRegistryRecord = match serde_json::from_str(&json) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Discarding corrupt save in slot {:?}: {}", slot, e);
                self.repo.delete(slot)?;
                report.statuses = reset_all_fresh(registry, FreshReason::Corrupt(e.to_string()));
                return Ok(report);
            }
        };
        report.saved_at = document.saved_at;

        let mut decoded = Vec::with_capacity(document.environments.len());
        for (index, value) in document.environments.into_iter().enumerate() {
            match serde_json::from_value::<EnvironmentRecord>(value) {
                Ok(record) => decoded.push(record),
                Err(e) => tracing::warn!("Skipping unreadable record #{} in {:?}: {}", index, slot, e),
            }
        }

        for record in &decoded {
            if registry.find(&record.name).is_none() {
                tracing::warn!("No environment named {:?} to restore into", record.name);
                report.unmatched.push(record.name.clone());
            }
        }

        for (_, environment) in registry.iter_mut() {
            let record = decoded
                .iter()
                .find(|record| record.name == environment.name());
            let status = match record {
                None => {
                    environment.reset();
                    LoadStatus::Fresh(FreshReason::Missing)
                }
                Some(record) => match record.to_state() {
                    Ok(state) => LoadStatus::Restored(restore_logged(environment, state)),
                    Err(e) => {
                        tracing::warn!(
                            "Discarding corrupt record for {:?}: {}",
                            environment.name(),
                            e
                        );
                        environment.reset();
                        LoadStatus::Fresh(FreshReason::Corrupt(e.to_string()))
                    }
                },
            };
            report
                .statuses
                .push((environment.name().to_string(), status));
        }

        tracing::info!(
            "Restored {}/{} environments from slot {:?}",
            report.restored(),
            registry.len(),
            slot
        );
        Ok(report)
    }

    pub fn save_environment(&self, slot: &str, environment: &Environment) -> Result<()> {
        let json = encode_environment(environment)?;
        self.repo.save(slot, &json)?;
        Ok(())
    }

    /// Loads `slot` into `fresh`; see [`decode_or_fresh`].
    pub fn load_environment(&self, slot: &str, fresh: Environment) -> Result<LoadOutcome> {
        let json = self.read_slot(slot)?;
        let outcome = decode_or_fresh(json.as_deref(), fresh);
        if matches!(outcome.status, LoadStatus::Fresh(FreshReason::Corrupt(_))) {
            self.repo.delete(slot)?;
        }
        Ok(outcome)
    }

    /// Reads a slot, treating undecodable bytes as a corrupt document.
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        match self.repo.load(slot) {
            Ok(contents) => Ok(contents),
            Err(RepositoryError::Encoding(e)) => {
                tracing::warn!("Slot {:?} is not valid UTF-8: {}", slot, e);
                Ok(Some(String::new()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn reset_all_fresh(
    registry: &mut EnvironmentRegistry,
    reason: FreshReason,
) -> Vec<(String, LoadStatus)> {
    registry
        .iter_mut()
        .map(|(_, environment)| {
            environment.reset();
            (
                environment.name().to_string(),
                LoadStatus::Fresh(reason.clone()),
            )
        })
        .collect()
}
