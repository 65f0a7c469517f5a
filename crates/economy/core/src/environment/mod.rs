//! One isolated economy instance.
//!
//! An [`Environment`] owns everything mutable about a single player or bot:
//! balances, owned upgrades, derived stats, target progress, the bonus spawn
//! countdown and its random stream. Only the [`Catalog`] is shared, read-only,
//! between environments, so any number of them can advance side by side
//! without observing each other.
//!
//! Every action buffers the events it produces and delivers them to the
//! registered listeners once its state changes are complete.
mod action;
mod bonus;

use std::fmt;
use std::sync::Arc;

pub use action::{ActionError, ActivityCounters, PurchaseReceipt, Requirement};
pub use bonus::BonusOrb;

use crate::catalog::{Catalog, CostCurrency, TargetId, UpgradeCategory, UpgradeId};
use crate::config::EconomyConfig;
use crate::events::{EconomyEvent, EnvironmentListener};
use crate::experience::level_from_experience;
use crate::ledger::Ledger;
use crate::number::ExtendedNumber;
use crate::progress::{Completion, ProgressError, TargetProgress};
use crate::rng::PcgRng;
use crate::stats::{OwnedUpgrades, StatKind, StatSet, recalculate};

/// Who drives an environment.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Human,
    Bot,
}

/// Economic state that survives a save/load cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentState {
    pub currency: ExtendedNumber,
    pub experience: ExtendedNumber,
    pub owned: OwnedUpgrades,
    pub current_target: Option<TargetId>,
}

/// What [`Environment::restore`] had to repair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Owned upgrades whose ids the catalog no longer knows.
    pub dropped_upgrades: Vec<UpgradeId>,
    /// Set when the stored target was missing, unknown or locked and the
    /// furthest reachable target was used instead.
    pub target_fallback: bool,
}

pub struct Environment {
    name: String,
    controller: Controller,
    catalog: Arc<Catalog>,
    config: EconomyConfig,
    seed: u64,
    ledger: Ledger,
    owned: OwnedUpgrades,
    stats: StatSet,
    progress: TargetProgress,
    spawn_timer: f64,
    bonus: Option<BonusOrb>,
    rng: PcgRng,
    counters: ActivityCounters,
    pending: Vec<EconomyEvent>,
    listeners: Vec<Arc<dyn EnvironmentListener>>,
}

impl Environment {
    /// Creates an initialized environment seated at the furthest reachable target.
    pub fn new(
        name: impl Into<String>,
        controller: Controller,
        catalog: Arc<Catalog>,
        config: EconomyConfig,
        seed: u64,
    ) -> Self {
        let mut environment = Self {
            name: name.into(),
            controller,
            catalog,
            config,
            seed,
            ledger: Ledger::new(),
            owned: OwnedUpgrades::new(),
            stats: StatSet::baseline(),
            progress: TargetProgress::new(),
            spawn_timer: 0.0,
            bonus: None,
            rng: PcgRng::new(seed),
            counters: ActivityCounters::default(),
            pending: Vec::new(),
            listeners: Vec::new(),
        };
        environment.initialize();
        environment.pending.clear();
        environment
    }

    fn initialize(&mut self) {
        self.ledger.clear();
        self.owned.zero_all();
        self.stats = recalculate(&self.owned, &self.catalog);
        self.progress.clear();
        self.progress
            .seed_furthest(&self.catalog, &self.owned, &mut self.pending);
        self.bonus = None;
        self.spawn_timer = self.spawn_interval();
        self.rng = PcgRng::new(self.seed);
        self.counters = ActivityCounters::default();
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EnvironmentListener>) {
        self.listeners.push(listener);
    }

    // ===== actions =====

    /// Adds one click worth of progress.
    pub fn click(&mut self) -> Result<Option<Completion>, ActionError> {
        if self.progress.current().is_none() {
            return Err(ProgressError::NoTarget.into());
        }
        self.counters.clicks += 1;
        let completion = self.add_progress(self.stats.click_progress());
        self.flush();
        Ok(completion)
    }

    /// Accrues passive progress for `dt` seconds.
    pub fn tick_idle(&mut self, dt: f64) -> Option<Completion> {
        let completion = self.accrue_idle(sanitize_dt(dt));
        self.flush();
        completion
    }

    /// Advances the simulation by `dt` seconds: idle accrual, bonus lifetime
    /// and the bonus spawn countdown.
    pub fn tick(&mut self, dt: f64) -> Option<Completion> {
        let dt = sanitize_dt(dt);
        let completion = self.accrue_idle(dt);
        self.advance_bonus(dt);
        self.flush();
        completion
    }

    /// Buys the next level of `id`.
    ///
    /// Either every effect applies (cost debited, level incremented, stats
    /// rebuilt, progression reconciled) or the call fails without mutating
    /// anything.
    pub fn purchase(&mut self, id: &str) -> Result<PurchaseReceipt, ActionError> {
        let (currency, cost) = self.check_purchase(id)?;
        let Some(upgrade) = self.catalog.upgrade(id) else {
            return Err(ActionError::UnknownUpgrade(UpgradeId::new(id)));
        };
        let category = upgrade.category;
        let upgrade_id = upgrade.id.clone();

        self.ledger.debit(currency, cost);
        let new_level = self.owned.increment(id);

        let previous_spawn_rate = self.stats.get(StatKind::SpawnRate);
        self.stats = recalculate(&self.owned, &self.catalog);
        if self.stats.get(StatKind::SpawnRate) != previous_spawn_rate {
            self.spawn_timer = self.spawn_interval();
        }

        if category == UpgradeCategory::Mastery {
            self.progress
                .reconcile_after_mastery(&self.catalog, &self.owned, &mut self.pending);
        }

        self.counters.purchases += 1;
        self.pending.push(self.currency_event());
        self.flush();

        Ok(PurchaseReceipt {
            upgrade: upgrade_id,
            new_level,
            currency,
            cost,
        })
    }

    /// Validates a purchase without performing it; returns the currency and cost.
    pub fn check_purchase(&self, id: &str) -> Result<(CostCurrency, ExtendedNumber), ActionError> {
        let upgrade = self
            .catalog
            .upgrade(id)
            .ok_or_else(|| ActionError::UnknownUpgrade(UpgradeId::new(id)))?;
        let level = self.owned.level(id);

        if upgrade.is_capped(level) {
            return Err(ActionError::UpgradeCapped {
                upgrade: upgrade.id.clone(),
                max_level: upgrade.max_level,
            });
        }

        if let Some(unlock) = &upgrade.unlock
            && self.owned.level(unlock.upgrade.as_str()) < unlock.min_level
        {
            return Err(ActionError::UnmetPrerequisite {
                upgrade: upgrade.id.clone(),
                requirement: Requirement::Upgrade {
                    id: unlock.upgrade.clone(),
                    min_level: unlock.min_level,
                },
            });
        }

        if let Some(mastery) = &upgrade.mastery
            && upgrade.category == UpgradeCategory::Mastery
            && self.progress.current() != Some(&mastery.target)
        {
            return Err(ActionError::UnmetPrerequisite {
                upgrade: upgrade.id.clone(),
                requirement: Requirement::ActiveTarget(mastery.target.clone()),
            });
        }

        let cost = upgrade.cost_at(level);
        let balance = self.ledger.balance(upgrade.cost_currency);
        if balance < cost {
            return Err(ActionError::InsufficientFunds {
                upgrade: upgrade.id.clone(),
                currency: upgrade.cost_currency,
                cost,
                balance,
            });
        }

        Ok((upgrade.cost_currency, cost))
    }

    /// Whether [`Environment::purchase`] would currently succeed.
    pub fn is_purchasable(&self, id: &str) -> bool {
        self.check_purchase(id).is_ok()
    }

    /// Moves to the next target in the chain (requires it to be unlocked).
    pub fn advance_next(&mut self) -> Result<TargetId, ActionError> {
        let result = self
            .progress
            .advance_next(&self.catalog, &self.owned, &mut self.pending);
        self.flush();
        result.map_err(ActionError::from)
    }

    /// Moves to the previous target in the chain.
    pub fn advance_previous(&mut self) -> Result<TargetId, ActionError> {
        let result = self
            .progress
            .advance_previous(&self.catalog, &self.owned, &mut self.pending);
        self.flush();
        result.map_err(ActionError::from)
    }

    /// Collects the active bonus orb as progress.
    pub fn claim_bonus(&mut self) -> Result<Option<Completion>, ActionError> {
        let orb = self.bonus.take().ok_or(ActionError::NoBonusActive)?;
        self.counters.bonuses_claimed += 1;
        let completion = self.add_progress(orb.reward);
        self.flush();
        Ok(completion)
    }

    /// Returns to the freshly initialized state.
    pub fn reset(&mut self) {
        self.initialize();
        self.pending.push(EconomyEvent::EnvironmentReset);
        self.pending.push(self.currency_event());
        self.flush();
    }

    /// Replaces the economic state with a persisted one.
    ///
    /// Upgrades unknown to the catalog are dropped. A missing, unknown or
    /// locked target falls back to the furthest reachable one.
    pub fn restore(&mut self, state: EnvironmentState) -> RestoreReport {
        self.initialize();

        let mut report = RestoreReport::default();
        let mut owned = OwnedUpgrades::new();
        for (id, level) in state.owned.iter() {
            if self.catalog.upgrade(id.as_str()).is_some() {
                owned.set(id.clone(), level);
            } else {
                report.dropped_upgrades.push(id.clone());
            }
        }

        self.ledger.currency = state.currency.non_negative();
        self.ledger.experience = state.experience.non_negative();
        self.owned = owned;
        self.stats = recalculate(&self.owned, &self.catalog);
        self.spawn_timer = self.spawn_interval();

        let restored_target = state.current_target.filter(|target| {
            self.catalog
                .is_target_reachable(target.as_str(), &self.owned)
        });
        match restored_target {
            Some(target) => {
                let _ = self.progress.set_target(
                    target.as_str(),
                    &self.catalog,
                    &self.owned,
                    &mut self.pending,
                );
            }
            None => {
                report.target_fallback = true;
                self.progress
                    .seed_furthest(&self.catalog, &self.owned, &mut self.pending);
            }
        }

        self.pending.push(self.currency_event());
        self.flush();
        report
    }

    /// Snapshot of the persisted part of the state.
    pub fn state(&self) -> EnvironmentState {
        EnvironmentState {
            currency: self.ledger.currency,
            experience: self.ledger.experience,
            owned: self.owned.clone(),
            current_target: self.progress.current().cloned(),
        }
    }

    // ===== queries =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stat(&self, kind: StatKind) -> ExtendedNumber {
        self.stats.get(kind)
    }

    pub fn stats(&self) -> &StatSet {
        &self.stats
    }

    pub fn current_target(&self) -> Option<&TargetId> {
        self.progress.current()
    }

    /// `(accumulated, resolved distance)` for the current target.
    pub fn progress(&self) -> (ExtendedNumber, ExtendedNumber) {
        (
            self.progress.accumulated(),
            self.progress.resolved_distance(),
        )
    }

    pub fn resolved_reward(&self) -> ExtendedNumber {
        self.progress.resolved_reward()
    }

    pub fn lifetime_distance(&self) -> ExtendedNumber {
        self.progress.lifetime_distance()
    }

    pub fn owned_level(&self, id: &str) -> u32 {
        self.owned.level(id)
    }

    pub fn owned(&self) -> &OwnedUpgrades {
        &self.owned
    }

    pub fn currency(&self) -> ExtendedNumber {
        self.ledger.currency
    }

    pub fn experience(&self) -> ExtendedNumber {
        self.ledger.experience
    }

    pub fn experience_level(&self) -> u64 {
        level_from_experience(self.ledger.experience)
    }

    pub fn bonus(&self) -> Option<&BonusOrb> {
        self.bonus.as_ref()
    }

    /// Seconds until the next bonus orb spawns.
    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn counters(&self) -> ActivityCounters {
        self.counters
    }

    // ===== internals =====

    fn add_progress(&mut self, amount: ExtendedNumber) -> Option<Completion> {
        let completion = self.progress.add_progress(
            amount,
            &mut self.ledger,
            self.config.experience_ratio,
            &mut self.pending,
        );
        if completion.is_some() {
            self.counters.completions += 1;
        }
        completion
    }

    fn accrue_idle(&mut self, dt: f64) -> Option<Completion> {
        if dt == 0.0 {
            return None;
        }
        let amount = self.stats.passive_progress() * ExtendedNumber::from(dt);
        self.add_progress(amount)
    }

    fn advance_bonus(&mut self, dt: f64) {
        if let Some(orb) = self.bonus.as_mut()
            && !orb.age(dt)
        {
            self.bonus = None;
            self.pending.push(EconomyEvent::BonusExpired);
        }

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            let orb = BonusOrb::roll(&self.stats, &self.config, &mut self.rng);
            self.pending.push(EconomyEvent::BonusSpawned {
                reward: orb.reward,
                lifetime: orb.remaining,
            });
            self.bonus = Some(orb);
            self.spawn_timer = self.spawn_interval();
        }
    }

    fn spawn_interval(&self) -> f64 {
        self.stats
            .get(StatKind::SpawnRate)
            .to_f64()
            .max(EconomyConfig::MIN_SPAWN_RATE)
    }

    fn currency_event(&self) -> EconomyEvent {
        EconomyEvent::CurrencyChanged {
            currency: self.ledger.currency,
            experience: self.ledger.experience,
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        for listener in &self.listeners {
            for event in &events {
                listener.on_event(&self.name, event);
            }
        }
    }
}

fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("name", &self.name)
            .field("controller", &self.controller)
            .field("ledger", &self.ledger)
            .field("owned", &self.owned)
            .field("progress", &self.progress)
            .field("spawn_timer", &self.spawn_timer)
            .field("bonus", &self.bonus)
            .field("counters", &self.counters)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TargetDefinition, UpgradeDefinition};
    use crate::error::EconomyError;
    use crate::events::EventLog;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(
                vec![
                    UpgradeDefinition::new("click", UpgradeCategory::Stat, 10.0, 1.5)
                        .with_stat(StatKind::ClickPower, 1.0),
                    UpgradeDefinition::new("big_click", UpgradeCategory::Stat, 1.0, 1.0)
                        .with_stat(StatKind::ClickPower, 9.9),
                    UpgradeDefinition::new("idle", UpgradeCategory::Stat, 1.0, 1.0)
                        .with_stat(StatKind::PassivePower, 4.0),
                    UpgradeDefinition::new("capped", UpgradeCategory::Stat, 1.0, 1.0)
                        .with_stat(StatKind::DamageMultiplier, 1.0)
                        .with_max_level(1),
                    UpgradeDefinition::new("gated", UpgradeCategory::Stat, 1.0, 1.0)
                        .with_stat(StatKind::ClickPower, 1.0)
                        .with_unlock("capped", 1),
                    UpgradeDefinition::new("wisdom", UpgradeCategory::Stat, 2.0, 1.0)
                        .with_stat(StatKind::ClickPower, 1.0)
                        .with_cost_currency(CostCurrency::Experience),
                    UpgradeDefinition::new("unlock_t2", UpgradeCategory::TargetUnlock, 1.0, 1.0)
                        .with_max_level(1),
                    UpgradeDefinition::new("mastery_t1", UpgradeCategory::Mastery, 1.0, 1.0)
                        .with_mastery("t1"),
                ],
                vec![
                    TargetDefinition::new("t1", 100.0, 5.0).with_next("t2"),
                    TargetDefinition::new("t2", 500.0, 30.0).with_unlock("unlock_t2"),
                ],
            )
            .unwrap(),
        )
    }

    fn environment() -> Environment {
        Environment::new(
            "player",
            Controller::Human,
            catalog(),
            EconomyConfig::default(),
            7,
        )
    }

    fn fund(environment: &mut Environment, amount: f64) {
        environment.ledger.currency = ExtendedNumber::from(amount);
    }

    #[test]
    fn fresh_environment_starts_at_first_target() {
        let environment = environment();
        assert_eq!(environment.current_target().unwrap().as_str(), "t1");
        assert_eq!(environment.currency(), ExtendedNumber::ZERO);
        assert_eq!(environment.stat(StatKind::ClickPower), ExtendedNumber::from(0.1));
        assert_eq!(environment.spawn_timer(), 1.0);
    }

    #[test]
    fn purchase_debits_and_recalculates() {
        let mut environment = environment();
        fund(&mut environment, 10.0);

        let receipt = environment.purchase("click").unwrap();

        assert_eq!(receipt.new_level, 1);
        assert_eq!(receipt.cost, ExtendedNumber::from(10.0));
        assert_eq!(environment.currency(), ExtendedNumber::ZERO);
        assert_eq!(environment.stat(StatKind::ClickPower), ExtendedNumber::from(1.1));
    }

    #[test]
    fn failed_purchases_leave_state_untouched() {
        let mut environment = environment();
        fund(&mut environment, 5.0);
        let before = environment.state();

        let error = environment.purchase("click").unwrap_err();
        assert!(matches!(error, ActionError::InsufficientFunds { .. }));
        assert_eq!(environment.state(), before);

        assert!(matches!(
            environment.purchase("gated"),
            Err(ActionError::UnmetPrerequisite { .. })
        ));
        assert!(matches!(
            environment.purchase("nope"),
            Err(ActionError::UnknownUpgrade(_))
        ));
        assert_eq!(environment.state(), before);
        assert_eq!(environment.stats(), &StatSet::baseline());
    }

    #[test]
    fn capped_upgrades_refuse_further_levels() {
        let mut environment = environment();
        fund(&mut environment, 10.0);
        environment.purchase("capped").unwrap();
        let error = environment.purchase("capped").unwrap_err();
        assert_eq!(
            error,
            ActionError::UpgradeCapped {
                upgrade: UpgradeId::new("capped"),
                max_level: 1
            }
        );
        assert!(environment.is_purchasable("gated"));
    }

    #[test]
    fn experience_upgrades_spend_experience() {
        let mut environment = environment();
        fund(&mut environment, 100.0);
        assert!(matches!(
            environment.purchase("wisdom"),
            Err(ActionError::InsufficientFunds {
                currency: CostCurrency::Experience,
                ..
            })
        ));

        environment.ledger.experience = ExtendedNumber::from(2.0);
        let receipt = environment.purchase("wisdom").unwrap();
        assert_eq!(receipt.currency, CostCurrency::Experience);
        assert_eq!(environment.experience(), ExtendedNumber::ZERO);
        assert_eq!(environment.currency(), ExtendedNumber::from(100.0));
    }

    #[test]
    fn ten_clicks_complete_once_each_cycle() {
        let mut environment = environment();
        fund(&mut environment, 1.0);
        environment.purchase("big_click").unwrap();
        assert_eq!(environment.stat(StatKind::ClickPower), ExtendedNumber::from(10.0));

        for click in 1..=10 {
            let completion = environment.click().unwrap();
            assert_eq!(completion.is_some(), click == 10, "click {click}");
        }
        assert_eq!(environment.currency(), ExtendedNumber::from(5.0));
        assert_eq!(environment.progress().0, ExtendedNumber::ZERO);
        assert_eq!(environment.counters().completions, 1);
    }

    #[test]
    fn idle_ticks_accrue_passive_progress() {
        let mut environment = environment();
        fund(&mut environment, 1.0);
        environment.purchase("idle").unwrap();

        environment.tick_idle(2.5);
        assert_eq!(environment.progress().0, ExtendedNumber::from(10.0));
        assert_eq!(environment.lifetime_distance(), ExtendedNumber::from(10.0));

        environment.tick_idle(f64::NAN);
        environment.tick_idle(-4.0);
        assert_eq!(environment.progress().0, ExtendedNumber::from(10.0));
    }

    #[test]
    fn mastery_requires_its_target_to_be_active() {
        let mut environment = environment();
        fund(&mut environment, 10.0);
        environment.purchase("unlock_t2").unwrap();
        environment.advance_next().unwrap();

        assert!(matches!(
            environment.purchase("mastery_t1"),
            Err(ActionError::UnmetPrerequisite {
                requirement: Requirement::ActiveTarget(_),
                ..
            })
        ));

        environment.advance_previous().unwrap();
        environment.purchase("mastery_t1").unwrap();
        assert!((environment.progress().1.to_f64() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn advance_errors_are_reported() {
        let mut environment = environment();
        assert_eq!(
            environment.advance_next().unwrap_err().error_code(),
            "PROGRESS_TARGET_LOCKED"
        );
        assert_eq!(
            environment.advance_previous(),
            Err(ActionError::Progress(ProgressError::EndOfChain))
        );
    }

    #[test]
    fn bonus_spawns_on_countdown_and_can_be_claimed() {
        let mut environment = environment();
        assert_eq!(environment.claim_bonus(), Err(ActionError::NoBonusActive));

        environment.tick(0.5);
        assert!(environment.bonus().is_none());
        environment.tick(0.5);
        let reward = environment.bonus().unwrap().reward;
        assert!(reward >= ExtendedNumber::from(0.2));

        environment.claim_bonus().unwrap();
        assert!(environment.bonus().is_none());
        assert_eq!(environment.progress().0, reward);
        assert_eq!(environment.counters().bonuses_claimed, 1);
    }

    #[test]
    fn unclaimed_bonus_expires() {
        let mut environment = environment();
        environment.tick(1.0);
        assert!(environment.bonus().is_some());
        // Next orb dies before the following spawn.
        environment.config.bonus_max_lifetime = 0.5;
        environment.config.bonus_min_lifetime = 0.5;
        environment.tick(1.0);
        environment.tick(0.75);
        assert!(environment.bonus().is_none());
    }

    #[test]
    fn reset_is_deterministic() {
        let mut environment = environment();
        let fresh_state = environment.state();
        let fresh_stats = *environment.stats();

        fund(&mut environment, 50.0);
        environment.purchase("click").unwrap();
        environment.purchase("unlock_t2").unwrap();
        environment.advance_next().unwrap();
        environment.tick(3.0);

        environment.reset();
        assert_eq!(environment.state(), fresh_state);
        assert_eq!(environment.stats(), &fresh_stats);
        assert!(environment.bonus().is_none());
        assert_eq!(environment.counters(), ActivityCounters::default());

        let first: Vec<_> = (0..3)
            .map(|_| {
                environment.tick(1.0);
                environment.bonus().unwrap().reward
            })
            .collect();
        environment.reset();
        let second: Vec<_> = (0..3)
            .map(|_| {
                environment.tick(1.0);
                environment.bonus().unwrap().reward
            })
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn restore_drops_unknown_upgrades_and_falls_back_on_target() {
        let mut environment = environment();
        let mut owned = OwnedUpgrades::new();
        owned.increment("click");
        owned.increment("retired");

        let report = environment.restore(EnvironmentState {
            currency: ExtendedNumber::from(42.0),
            experience: ExtendedNumber::from(3.0),
            owned,
            current_target: Some(TargetId::new("t2")),
        });

        assert_eq!(report.dropped_upgrades, vec![UpgradeId::new("retired")]);
        assert!(report.target_fallback);
        assert_eq!(environment.current_target().unwrap().as_str(), "t1");
        assert_eq!(environment.currency(), ExtendedNumber::from(42.0));
        assert_eq!(environment.stat(StatKind::ClickPower), ExtendedNumber::from(1.1));
    }

    #[test]
    fn listeners_receive_events_after_actions() {
        let log = Arc::new(EventLog::new());
        let mut environment = environment();
        environment.add_listener(log.clone());
        fund(&mut environment, 1.0);
        environment.purchase("big_click").unwrap();

        for _ in 0..10 {
            environment.click().unwrap();
        }

        assert_eq!(
            log.count(|event| matches!(event, EconomyEvent::TargetCompleted { .. })),
            1
        );
        assert_eq!(
            log.count(|event| matches!(event, EconomyEvent::ProgressChanged { .. })),
            10
        );
        assert!(log.entries().iter().all(|(name, _)| name == "player"));
    }
}
