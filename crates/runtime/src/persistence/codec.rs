//! JSON layout of persisted environments.
//!
//! Decoding never fails hard: a record that cannot be read is reported and a
//! freshly initialized environment takes its place.

use chrono::{DateTime, Utc};
use economy_core::{
    Environment, EnvironmentState, ExtendedNumber, NumberParseError, OwnedUpgrades, RestoreReport,
    TargetId, UpgradeId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a persisted record was rejected.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field}: {source}")]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: NumberParseError,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub id: String,
    pub level: u32,
}

/// One environment's economic state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRecord {
    pub name: String,
    pub currency_mantissa: f64,
    pub currency_exponent: i64,
    pub experience_mantissa: f64,
    pub experience_exponent: i64,
    #[serde(default)]
    pub upgrades: Vec<UpgradeRecord>,
    #[serde(default)]
    pub current_target_id: Option<String>,
}

impl EnvironmentRecord {
    pub fn capture(environment: &Environment) -> Self {
        let currency = environment.currency();
        let experience = environment.experience();
        Self {
            name: environment.name().to_string(),
            currency_mantissa: currency.mantissa(),
            currency_exponent: currency.exponent(),
            experience_mantissa: experience.mantissa(),
            experience_exponent: experience.exponent(),
            upgrades: environment
                .owned()
                .iter()
                .map(|(id, level)| UpgradeRecord {
                    id: id.as_str().to_string(),
                    level,
                })
                .collect(),
            current_target_id: environment.current_target().map(|id| id.as_str().to_string()),
        }
    }

    /// Validates the numbers and converts to restorable state.
    pub fn to_state(&self) -> Result<EnvironmentState, CodecError> {
        let currency = number("currency", self.currency_mantissa, self.currency_exponent)?;
        let experience = number(
            "experience",
            self.experience_mantissa,
            self.experience_exponent,
        )?;

        let owned: OwnedUpgrades = self
            .upgrades
            .iter()
            .map(|upgrade| (UpgradeId::new(upgrade.id.clone()), upgrade.level))
            .collect();

        Ok(EnvironmentState {
            currency,
            experience,
            owned,
            current_target: self.current_target_id.clone().map(TargetId::new),
        })
    }
}

fn number(field: &'static str, mantissa: f64, exponent: i64) -> Result<ExtendedNumber, CodecError> {
    ExtendedNumber::try_from_parts(mantissa, exponent)
        .map_err(|source| CodecError::InvalidNumber { field, source })
}

/// Multi-environment save document.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    pub saved_at: DateTime<Utc>,
    pub environments: Vec<EnvironmentRecord>,
}

/// Loosely typed document so that one bad record does not spoil the rest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRegistryRecord {
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub environments: Vec<serde_json::Value>,
}

pub fn encode_environment(environment: &Environment) -> serde_json::Result<String> {
    serde_json::to_string(&EnvironmentRecord::capture(environment))
}

pub fn decode_environment(json: &str) -> Result<EnvironmentRecord, CodecError> {
    let record: EnvironmentRecord = serde_json::from_str(json)?;
    record.to_state()?;
    Ok(record)
}

/// Why an environment started from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FreshReason {
    /// Nothing was stored for it.
    Missing,
    /// The stored record was unreadable; carries the decoding error.
    Corrupt(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Restored(RestoreReport),
    Fresh(FreshReason),
}

impl LoadStatus {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// An environment ready to play, plus how it was obtained.
#[derive(Debug)]
pub struct LoadOutcome {
    pub environment: Environment,
    pub status: LoadStatus,
}

/// Applies a persisted record to `fresh`, or keeps it untouched when the
/// record is absent or unreadable.
pub fn decode_or_fresh(json: Option<&str>, mut fresh: Environment) -> LoadOutcome {
    let Some(json) = json else {
        return LoadOutcome {
            environment: fresh,
            status: LoadStatus::Fresh(FreshReason::Missing),
        };
    };

    let decoded = serde_json::from_str::<EnvironmentRecord>(json)
        .map_err(CodecError::from)
        .and_then(|record| record.to_state());

    let status = match decoded {
        Ok(state) => LoadStatus::Restored(restore_logged(&mut fresh, state)),
        Err(e) => {
            tracing::warn!(
                "Discarding corrupt save for {:?}, starting fresh: {}",
                fresh.name(),
                e
            );
            LoadStatus::Fresh(FreshReason::Corrupt(e.to_string()))
        }
    };

    LoadOutcome {
        environment: fresh,
        status,
    }
}

pub(crate) fn restore_logged(environment: &mut Environment, state: EnvironmentState) -> RestoreReport {
    let report = environment.restore(state);
    for id in &report.dropped_upgrades {
        tracing::warn!(
            "Dropped unknown upgrade {:?} while restoring {:?}",
            id.as_str(),
            environment.name()
        );
    }
    if report.target_fallback {
        tracing::debug!(
            "Stored target unavailable for {:?}, seated at {:?}",
            environment.name(),
            environment.current_target().map(|id| id.as_str())
        );
    }
    report
}
