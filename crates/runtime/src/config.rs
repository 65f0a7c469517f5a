/// Scheduling and persistence settings for a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Simulated seconds per fixed step.
    pub tick_seconds: f64,
    /// Simulated seconds between autosaves; zero or less disables autosave.
    pub autosave_seconds: f64,
    /// Repository slot the registry is saved under.
    pub save_slot: String,
    /// Upper bound on steps run for a single `advance` call.
    pub max_catch_up_steps: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_SECONDS: f64 = 0.1;
    pub const DEFAULT_AUTOSAVE_SECONDS: f64 = 30.0;
    pub const DEFAULT_SAVE_SLOT: &'static str = "environments";
    pub const DEFAULT_MAX_CATCH_UP_STEPS: u32 = 1_000;

    pub fn new() -> Self {
        Self {
            tick_seconds: Self::DEFAULT_TICK_SECONDS,
            autosave_seconds: Self::DEFAULT_AUTOSAVE_SECONDS,
            save_slot: Self::DEFAULT_SAVE_SLOT.to_string(),
            max_catch_up_steps: Self::DEFAULT_MAX_CATCH_UP_STEPS,
        }
    }

    pub fn with_tick_seconds(mut self, tick_seconds: f64) -> Self {
        self.tick_seconds = tick_seconds;
        self
    }

    pub fn with_autosave_seconds(mut self, autosave_seconds: f64) -> Self {
        self.autosave_seconds = autosave_seconds;
        self
    }

    pub fn with_save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    /// Number of whole steps between autosaves, or `None` when disabled.
    pub fn autosave_steps(&self) -> Option<u64> {
        if !(self.autosave_seconds > 0.0) || !(self.tick_seconds > 0.0) {
            return None;
        }
        let steps = (self.autosave_seconds / self.tick_seconds).ceil();
        Some((steps as u64).max(1))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
