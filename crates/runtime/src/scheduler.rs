//! Fixed-step driver for a registry.
//!
//! Wall-clock time is accumulated and consumed in whole steps so that every
//! environment advances by identical increments regardless of frame timing.
//! Autosave is a countdown in steps rather than a timer.

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::persistence::SnapshotService;
use crate::registry::EnvironmentRegistry;

/// What one call to the scheduler did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub steps: u32,
    pub autosaves: u32,
    /// Targets completed across all environments.
    pub completions: usize,
    /// Seconds discarded because the catch-up limit was hit.
    pub dropped_seconds: f64,
}

#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    step: f64,
    accumulator: f64,
    autosave_every: Option<u64>,
    autosave_countdown: u64,
    max_catch_up_steps: u32,
    save_slot: String,
    total_steps: u64,
}

impl FixedStepScheduler {
    pub fn new(config: &RuntimeConfig) -> Self {
        let step = if config.tick_seconds > 0.0 {
            config.tick_seconds
        } else {
            RuntimeConfig::DEFAULT_TICK_SECONDS
        };
        let autosave_every = config.autosave_steps();
        Self {
            step,
            accumulator: 0.0,
            autosave_every,
            autosave_countdown: autosave_every.unwrap_or(0),
            max_catch_up_steps: config.max_catch_up_steps.max(1),
            save_slot: config.save_slot.clone(),
            total_steps: 0,
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.step
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Steps left before the next autosave, if autosave is enabled.
    pub fn steps_until_autosave(&self) -> Option<u64> {
        self.autosave_every.map(|_| self.autosave_countdown)
    }

    /// Consumes `elapsed` wall-clock seconds in whole steps.
    ///
    /// Leftover time carries into the next call. Negative or non-finite
    /// input counts as no time passing.
    pub fn advance(
        &mut self,
        elapsed: f64,
        registry: &mut EnvironmentRegistry,
        snapshots: Option<&SnapshotService>,
    ) -> Result<StepReport> {
        let mut report = StepReport::default();
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        while self.accumulator >= self.step {
            if report.steps >= self.max_catch_up_steps {
                report.dropped_seconds = self.accumulator - self.accumulator % self.step;
                self.accumulator %= self.step;
                tracing::warn!(
                    "Simulation fell behind, dropped {:.2}s after {} steps",
                    report.dropped_seconds,
                    report.steps
                );
                break;
            }
            self.accumulator -= self.step;
            self.step_once(registry, snapshots, &mut report)?;
        }

        Ok(report)
    }

    /// Runs exactly `count` steps, independent of the accumulator.
    pub fn run_steps(
        &mut self,
        count: u32,
        registry: &mut EnvironmentRegistry,
        snapshots: Option<&SnapshotService>,
    ) -> Result<StepReport> {
        let mut report = StepReport::default();
        for _ in 0..count {
            self.step_once(registry, snapshots, &mut report)?;
        }
        Ok(report)
    }

    fn step_once(
        &mut self,
        registry: &mut EnvironmentRegistry,
        snapshots: Option<&SnapshotService>,
        report: &mut StepReport,
    ) -> Result<()> {
        report.completions += registry.tick_all(self.step);
        report.steps += 1;
        self.total_steps += 1;

        let Some(every) = self.autosave_every else {
            return Ok(());
        };
        self.autosave_countdown = self.autosave_countdown.saturating_sub(1);
        if self.autosave_countdown == 0 {
            self.autosave_countdown = every;
            if let Some(snapshots) = snapshots {
                snapshots.save_registry(&self.save_slot, registry)?;
                report.autosaves += 1;
                tracing::debug!("Autosaved after {} steps", self.total_steps);
            }
        }
        Ok(())
    }
}
