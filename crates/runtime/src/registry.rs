//! Registry owning every environment of a run.
//!
//! One human environment and any number of bots share a single read-only
//! [`Catalog`]; each keeps its own ledger, progression and random stream.
//! Environments are addressed by [`EnvironmentHandle`], which stays valid
//! for the lifetime of the registry since environments are never removed.

use std::fmt;
use std::sync::Arc;

use economy_core::{
    Catalog, Controller, EconomyConfig, Environment, EnvironmentListener, ExtendedNumber,
    compute_seed,
};

use crate::error::{Result, RuntimeError};
use crate::names::BotNameGenerator;

const ENVIRONMENT_SEED_CONTEXT: u32 = 0;
const NAME_SEED_CONTEXT: u32 = 1;
const MAX_NAME_ATTEMPTS: usize = 32;

/// Index of an environment inside its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvironmentHandle(usize);

impl EnvironmentHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EnvironmentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of the leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingEntry {
    /// 1-based rank.
    pub rank: usize,
    pub handle: EnvironmentHandle,
    pub name: String,
    pub controller: Controller,
    pub currency: ExtendedNumber,
}

/// Distance between an environment and the rest of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScoreGap {
    /// Ranked first; carries the lead over second place.
    Lead(ExtendedNumber),
    /// Carries the shortfall to the leader.
    Behind(ExtendedNumber),
    /// The only environment in the registry.
    Alone,
}

pub struct EnvironmentRegistry {
    catalog: Arc<Catalog>,
    config: EconomyConfig,
    environments: Vec<Environment>,
    listeners: Vec<Arc<dyn EnvironmentListener>>,
    names: BotNameGenerator,
}

impl EnvironmentRegistry {
    pub fn new(catalog: Arc<Catalog>, config: EconomyConfig) -> Self {
        let names = BotNameGenerator::new(compute_seed(config.seed, 0, NAME_SEED_CONTEXT));
        Self {
            catalog,
            config,
            environments: Vec::new(),
            listeners: Vec::new(),
            names,
        }
    }

    /// Registers a listener on every current and future environment.
    pub fn add_listener(&mut self, listener: Arc<dyn EnvironmentListener>) {
        for environment in &mut self.environments {
            environment.add_listener(listener.clone());
        }
        self.listeners.push(listener);
    }

    /// Creates a fresh environment seated at the first target.
    ///
    /// Its seed is derived from the registry seed and its insertion index,
    /// so a rebuilt registry reproduces the same bonus streams.
    pub fn create_environment(
        &mut self,
        name: impl Into<String>,
        controller: Controller,
    ) -> Result<EnvironmentHandle> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuntimeError::EmptyName);
        }
        if self.find(&name).is_some() {
            return Err(RuntimeError::DuplicateEnvironment(name));
        }

        let index = self.environments.len();
        let seed = compute_seed(self.config.seed, index as u64, ENVIRONMENT_SEED_CONTEXT);
        let mut environment = Environment::new(
            name,
            controller,
            self.catalog.clone(),
            self.config.clone(),
            seed,
        );
        for listener in &self.listeners {
            environment.add_listener(listener.clone());
        }

        tracing::debug!(
            "Created {} environment {:?} with seed {:#018x}",
            controller,
            environment.name(),
            seed
        );

        self.environments.push(environment);
        Ok(EnvironmentHandle(index))
    }

    /// Creates a bot environment under a generated, unused name.
    pub fn create_bot(&mut self) -> Result<EnvironmentHandle> {
        let name = self.unused_bot_name();
        self.create_environment(name, Controller::Bot)
    }

    fn unused_bot_name(&mut self) -> String {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = self.names.next_name();
            if self.find(&name).is_none() {
                return name;
            }
        }
        // The name space is large but finite; disambiguate by index.
        let base = self.names.next_name();
        let mut suffix = self.environments.len();
        loop {
            let name = format!("{}-{}", base, suffix);
            if self.find(&name).is_none() {
                return name;
            }
            suffix += 1;
        }
    }

    pub fn find(&self, name: &str) -> Option<EnvironmentHandle> {
        self.environments
            .iter()
            .position(|environment| environment.name() == name)
            .map(EnvironmentHandle)
    }

    pub fn get(&self, handle: EnvironmentHandle) -> Option<&Environment> {
        self.environments.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: EnvironmentHandle) -> Option<&mut Environment> {
        self.environments.get_mut(handle.0)
    }

    /// Like [`get_mut`](Self::get_mut), but unknown handles are an error.
    pub fn environment_mut(&mut self, handle: EnvironmentHandle) -> Result<&mut Environment> {
        self.environments
            .get_mut(handle.0)
            .ok_or(RuntimeError::UnknownEnvironment(handle.0))
    }

    /// Environments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EnvironmentHandle, &Environment)> {
        self.environments
            .iter()
            .enumerate()
            .map(|(index, environment)| (EnvironmentHandle(index), environment))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EnvironmentHandle, &mut Environment)> {
        self.environments
            .iter_mut()
            .enumerate()
            .map(|(index, environment)| (EnvironmentHandle(index), environment))
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Advances every environment by `dt` seconds and returns the number of
    /// targets completed across the registry.
    pub fn tick_all(&mut self, dt: f64) -> usize {
        self.environments
            .iter_mut()
            .filter_map(|environment| environment.tick(dt))
            .count()
    }

    pub fn reset_all(&mut self) {
        for environment in &mut self.environments {
            environment.reset();
        }
        tracing::info!("Reset {} environments", self.environments.len());
    }

    /// Ranking by currency, highest first; ties keep insertion order.
    pub fn snapshot(&self) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = self
            .iter()
            .map(|(handle, environment)| RankingEntry {
                rank: 0,
                handle,
                name: environment.name().to_string(),
                controller: environment.controller(),
                currency: environment.currency(),
            })
            .collect();

        entries.sort_by(|a, b| b.currency.cmp(&a.currency));
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.rank = position + 1;
        }
        entries
    }

    /// How far `handle` is from the leader, or ahead of second place when it
    /// leads. `None` for an unknown handle.
    pub fn gap_to_leader(&self, handle: EnvironmentHandle) -> Option<ScoreGap> {
        self.get(handle)?;

        let ranking = self.snapshot();
        let leader = &ranking[0];
        if leader.handle == handle {
            return Some(match ranking.get(1) {
                Some(second) => ScoreGap::Lead(leader.currency - second.currency),
                None => ScoreGap::Alone,
            });
        }

        let own = ranking.iter().find(|entry| entry.handle == handle)?;
        Some(ScoreGap::Behind(leader.currency - own.currency))
    }
}

impl fmt::Debug for EnvironmentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentRegistry")
            .field("environments", &self.environments.len())
            .field("listeners", &self.listeners.len())
            .field("seed", &self.config.seed)
            .finish()
    }
}
