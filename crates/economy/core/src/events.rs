//! Notifications emitted by environments.
//!
//! Events are buffered while an action runs and handed to listeners once the
//! action has finished, so a listener always observes a consistent state and
//! the simulation never depends on what listeners do.

use std::sync::Mutex;

use crate::catalog::TargetId;
use crate::number::ExtendedNumber;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum EconomyEvent {
    TargetChanged {
        target: TargetId,
    },
    ProgressChanged {
        current: ExtendedNumber,
        total: ExtendedNumber,
    },
    TargetCompleted {
        target: TargetId,
        reward: ExtendedNumber,
        experience: ExtendedNumber,
    },
    CurrencyChanged {
        currency: ExtendedNumber,
        experience: ExtendedNumber,
    },
    BonusSpawned {
        reward: ExtendedNumber,
        lifetime: f64,
    },
    BonusExpired,
    EnvironmentReset,
}

/// Receives events after each environment action.
pub trait EnvironmentListener: Send + Sync {
    fn on_event(&self, environment: &str, event: &EconomyEvent);
}

/// Listener that records every event it receives.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Mutex<Vec<(String, EconomyEvent)>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn entries(&self) -> Vec<(String, EconomyEvent)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&EconomyEvent) -> bool) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.iter().filter(|(_, event)| predicate(event)).count())
            .unwrap_or(0)
    }
}

impl EnvironmentListener for EventLog {
    fn on_event(&self, environment: &str, event: &EconomyEvent) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((environment.to_string(), event.clone()));
        }
    }
}
