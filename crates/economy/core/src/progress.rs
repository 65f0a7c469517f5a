//! Target progression state machine.
//!
//! ```text
//! NoTarget ──set_target──▶ Active(t) ──add_progress──▶ Active(t)
//!                              │  accumulated ≥ distance: complete once,
//!                              │  pay reward, accumulated = 0
//!                              └─advance_next/previous──▶ Active(t')
//! ```
//!
//! Completion never advances automatically; moving along the chain is an
//! explicit action and always discards unspent progress.

use crate::catalog::{Catalog, CostCurrency, TargetId};
use crate::error::{EconomyError, ErrorSeverity};
use crate::events::EconomyEvent;
use crate::ledger::Ledger;
use crate::number::ExtendedNumber;
use crate::stats::OwnedUpgrades;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("no target is active")]
    NoTarget,

    #[error("already at the end of the target chain")]
    EndOfChain,

    #[error("target `{0}` is locked")]
    TargetLocked(TargetId),

    #[error("unknown target `{0}`")]
    UnknownTarget(TargetId),
}

impl EconomyError for ProgressError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetLocked(_) => ErrorSeverity::Recoverable,
            Self::NoTarget | Self::EndOfChain | Self::UnknownTarget(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoTarget => "PROGRESS_NO_TARGET",
            Self::EndOfChain => "PROGRESS_END_OF_CHAIN",
            Self::TargetLocked(_) => "PROGRESS_TARGET_LOCKED",
            Self::UnknownTarget(_) => "PROGRESS_UNKNOWN_TARGET",
        }
    }
}

/// Payout of a single completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub target: TargetId,
    pub reward: ExtendedNumber,
    pub experience: ExtendedNumber,
}

/// Progress toward the current target plus its resolved values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetProgress {
    current: Option<TargetId>,
    accumulated: ExtendedNumber,
    resolved_distance: ExtendedNumber,
    resolved_reward: ExtendedNumber,
    lifetime_distance: ExtendedNumber,
    completions: u64,
}

impl TargetProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TargetId> {
        self.current.as_ref()
    }

    pub fn accumulated(&self) -> ExtendedNumber {
        self.accumulated
    }

    pub fn resolved_distance(&self) -> ExtendedNumber {
        self.resolved_distance
    }

    pub fn resolved_reward(&self) -> ExtendedNumber {
        self.resolved_reward
    }

    /// Total progress ever added since the last reset.
    pub fn lifetime_distance(&self) -> ExtendedNumber {
        self.lifetime_distance
    }

    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Makes `target` current, resolving its mastery-scaled values.
    pub fn set_target(
        &mut self,
        target: &str,
        catalog: &Catalog,
        owned: &OwnedUpgrades,
        events: &mut Vec<EconomyEvent>,
    ) -> Result<(), ProgressError> {
        let (distance, reward) = catalog
            .resolve_target(target, owned)
            .ok_or_else(|| ProgressError::UnknownTarget(TargetId::new(target)))?;

        let id = TargetId::new(target);
        self.current = Some(id.clone());
        self.accumulated = ExtendedNumber::ZERO;
        self.resolved_distance = distance;
        self.resolved_reward = reward;

        events.push(EconomyEvent::TargetChanged { target: id });
        events.push(self.progress_event());
        Ok(())
    }

    /// Adds progress and completes the target at most once.
    ///
    /// Overshoot beyond the resolved distance is discarded. Without an active
    /// target the amount is dropped.
    pub fn add_progress(
        &mut self,
        amount: ExtendedNumber,
        ledger: &mut Ledger,
        experience_ratio: f64,
        events: &mut Vec<EconomyEvent>,
    ) -> Option<Completion> {
        let target = self.current.clone()?;
        let amount = amount.non_negative();
        if amount.is_zero() {
            return None;
        }

        self.accumulated += amount;
        self.lifetime_distance += amount;

        let completion = (self.accumulated >= self.resolved_distance)
            .then(|| self.complete(target, ledger, experience_ratio, events));

        events.push(self.progress_event());
        completion
    }

    fn complete(
        &mut self,
        target: TargetId,
        ledger: &mut Ledger,
        experience_ratio: f64,
        events: &mut Vec<EconomyEvent>,
    ) -> Completion {
        let reward = self.resolved_reward;
        let experience = reward * ExtendedNumber::from(experience_ratio.max(0.0));

        ledger.credit(CostCurrency::Currency, reward);
        ledger.credit(CostCurrency::Experience, experience);
        self.accumulated = ExtendedNumber::ZERO;
        self.completions += 1;

        events.push(EconomyEvent::TargetCompleted {
            target: target.clone(),
            reward,
            experience,
        });
        events.push(EconomyEvent::CurrencyChanged {
            currency: ledger.currency,
            experience: ledger.experience,
        });

        Completion {
            target,
            reward,
            experience,
        }
    }

    /// Moves to the next target if its unlock upgrade is owned.
    pub fn advance_next(
        &mut self,
        catalog: &Catalog,
        owned: &OwnedUpgrades,
        events: &mut Vec<EconomyEvent>,
    ) -> Result<TargetId, ProgressError> {
        let current = self.current.as_ref().ok_or(ProgressError::NoTarget)?;
        let next = catalog
            .targets()
            .next_of(current.as_str())
            .ok_or(ProgressError::EndOfChain)?;
        if !catalog.is_target_reachable(next.id.as_str(), owned) {
            return Err(ProgressError::TargetLocked(next.id.clone()));
        }

        let id = next.id.clone();
        self.set_target(id.as_str(), catalog, owned, events)?;
        Ok(id)
    }

    /// Moves to the previous target. Going back is never gated.
    pub fn advance_previous(
        &mut self,
        catalog: &Catalog,
        owned: &OwnedUpgrades,
        events: &mut Vec<EconomyEvent>,
    ) -> Result<TargetId, ProgressError> {
        let current = self.current.as_ref().ok_or(ProgressError::NoTarget)?;
        let previous = catalog
            .targets()
            .previous_of(current.as_str())
            .ok_or(ProgressError::EndOfChain)?;

        let id = previous.id.clone();
        self.set_target(id.as_str(), catalog, owned, events)?;
        Ok(id)
    }

    /// Re-resolves the current target's values after a mastery purchase,
    /// keeping the accumulated progress.
    pub fn reconcile_after_mastery(
        &mut self,
        catalog: &Catalog,
        owned: &OwnedUpgrades,
        events: &mut Vec<EconomyEvent>,
    ) {
        let Some(current) = &self.current else {
            return;
        };
        if let Some((distance, reward)) = catalog.resolve_target(current.as_str(), owned) {
            self.resolved_distance = distance;
            self.resolved_reward = reward;
            events.push(self.progress_event());
        }
    }

    /// Sets the furthest target reachable from the head of the chain.
    pub fn seed_furthest(
        &mut self,
        catalog: &Catalog,
        owned: &OwnedUpgrades,
        events: &mut Vec<EconomyEvent>,
    ) {
        match catalog.furthest_reachable(owned) {
            Some(target) => {
                let id = target.id.clone();
                // The id comes from the catalog, so resolution cannot fail.
                let _ = self.set_target(id.as_str(), catalog, owned, events);
            }
            None => self.current = None,
        }
    }

    /// Forgets the target and every counter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn progress_event(&self) -> EconomyEvent {
        EconomyEvent::ProgressChanged {
            current: self.accumulated,
            total: self.resolved_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TargetDefinition, UpgradeCategory, UpgradeDefinition};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                UpgradeDefinition::new("unlock_t2", UpgradeCategory::TargetUnlock, 50.0, 1.0)
                    .with_max_level(1),
                UpgradeDefinition::new("mastery_t1", UpgradeCategory::Mastery, 20.0, 2.0)
                    .with_mastery("t1"),
            ],
            vec![
                TargetDefinition::new("t1", 100.0, 5.0).with_next("t2"),
                TargetDefinition::new("t2", 500.0, 30.0).with_unlock("unlock_t2"),
            ],
        )
        .unwrap()
    }

    fn active(catalog: &Catalog, owned: &OwnedUpgrades) -> TargetProgress {
        let mut progress = TargetProgress::new();
        progress.seed_furthest(catalog, owned, &mut Vec::new());
        progress
    }

    #[test]
    fn overshoot_completes_exactly_once() {
        let catalog = catalog();
        let owned = OwnedUpgrades::new();
        let mut progress = active(&catalog, &owned);
        let mut ledger = Ledger::new();
        let mut events = Vec::new();

        let completion = progress.add_progress(
            ExtendedNumber::from(250.0),
            &mut ledger,
            0.0,
            &mut events,
        );

        assert!(completion.is_some());
        assert_eq!(progress.accumulated(), ExtendedNumber::ZERO);
        assert_eq!(progress.completions(), 1);
        assert_eq!(ledger.currency, ExtendedNumber::from(5.0));
        let completed = events
            .iter()
            .filter(|event| matches!(event, EconomyEvent::TargetCompleted { .. }))
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn completion_grants_experience_share() {
        let catalog = catalog();
        let owned = OwnedUpgrades::new();
        let mut progress = active(&catalog, &owned);
        let mut ledger = Ledger::new();

        progress.add_progress(ExtendedNumber::from(100.0), &mut ledger, 0.5, &mut Vec::new());
        assert_eq!(ledger.experience, ExtendedNumber::from(2.5));
    }

    #[test]
    fn progress_without_target_is_dropped() {
        let mut progress = TargetProgress::new();
        let mut ledger = Ledger::new();
        let completion =
            progress.add_progress(ExtendedNumber::from(1e9), &mut ledger, 0.1, &mut Vec::new());
        assert!(completion.is_none());
        assert_eq!(progress.lifetime_distance(), ExtendedNumber::ZERO);
    }

    #[test]
    fn advance_next_is_gated_and_discards_progress() {
        let catalog = catalog();
        let mut owned = OwnedUpgrades::new();
        let mut progress = active(&catalog, &owned);
        let mut ledger = Ledger::new();
        let mut events = Vec::new();

        progress.add_progress(ExtendedNumber::from(40.0), &mut ledger, 0.0, &mut events);
        assert_eq!(
            progress.advance_next(&catalog, &owned, &mut events),
            Err(ProgressError::TargetLocked(TargetId::new("t2")))
        );
        assert_eq!(progress.accumulated(), ExtendedNumber::from(40.0));

        owned.increment("unlock_t2");
        let next = progress.advance_next(&catalog, &owned, &mut events).unwrap();
        assert_eq!(next.as_str(), "t2");
        assert_eq!(progress.accumulated(), ExtendedNumber::ZERO);
        assert_eq!(progress.resolved_distance(), ExtendedNumber::from(500.0));
        assert_eq!(
            progress.advance_next(&catalog, &owned, &mut events),
            Err(ProgressError::EndOfChain)
        );
    }

    #[test]
    fn advance_previous_is_ungated() {
        let catalog = catalog();
        let mut owned = OwnedUpgrades::new();
        owned.increment("unlock_t2");
        let mut progress = active(&catalog, &owned);
        assert_eq!(progress.current().unwrap().as_str(), "t2");

        let previous = progress
            .advance_previous(&catalog, &owned, &mut Vec::new())
            .unwrap();
        assert_eq!(previous.as_str(), "t1");
        assert_eq!(
            progress.advance_previous(&catalog, &owned, &mut Vec::new()),
            Err(ProgressError::EndOfChain)
        );
    }

    #[test]
    fn advancing_without_target_fails() {
        let catalog = catalog();
        let mut progress = TargetProgress::new();
        assert_eq!(
            progress.advance_next(&catalog, &OwnedUpgrades::new(), &mut Vec::new()),
            Err(ProgressError::NoTarget)
        );
    }

    #[test]
    fn mastery_reconcile_keeps_accumulated() {
        let catalog = catalog();
        let mut owned = OwnedUpgrades::new();
        let mut progress = active(&catalog, &owned);
        let mut ledger = Ledger::new();

        progress.add_progress(ExtendedNumber::from(30.0), &mut ledger, 0.0, &mut Vec::new());
        owned.increment("mastery_t1");
        progress.reconcile_after_mastery(&catalog, &owned, &mut Vec::new());

        assert_eq!(progress.accumulated(), ExtendedNumber::from(30.0));
        assert!((progress.resolved_distance().to_f64() - 110.0).abs() < 1e-9);
        assert!((progress.resolved_reward().to_f64() - 5.5).abs() < 1e-9);
    }
}
