//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Bot environments created next to the player.
    pub bot_count: usize,
    /// Fixed steps to simulate before printing the ranking.
    pub sim_steps: u32,
    pub tick_seconds: f64,
    pub autosave_seconds: f64,
    /// Directory holding save slots.
    pub save_dir: PathBuf,
    /// Content directory; the embedded content is used when unset.
    pub content_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bot_count: 4,
            sim_steps: 3_000,
            tick_seconds: RuntimeConfig::DEFAULT_TICK_SECONDS,
            autosave_seconds: RuntimeConfig::DEFAULT_AUTOSAVE_SECONDS,
            save_dir: default_save_dir(),
            content_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOT_COUNT` - Number of bot environments (default: 4)
    /// - `SIM_STEPS` - Steps to simulate (default: 3000)
    /// - `TICK_SECONDS` - Seconds per step (default: 0.1)
    /// - `AUTOSAVE_SECONDS` - Seconds between autosaves, 0 disables (default: 30)
    /// - `SAVE_DATA_DIR` - Save directory (default: platform data dir)
    /// - `CONTENT_DIR` - Directory with `upgrades.ron`, `targets.ron`, `config.toml`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(count) = read_env::<usize>("BOT_COUNT") {
            config.bot_count = count;
        }
        if let Some(steps) = read_env::<u32>("SIM_STEPS") {
            config.sim_steps = steps;
        }
        if let Some(seconds) = read_env::<f64>("TICK_SECONDS").filter(|s| *s > 0.0) {
            config.tick_seconds = seconds;
        }
        if let Some(seconds) = read_env::<f64>("AUTOSAVE_SECONDS") {
            config.autosave_seconds = seconds;
        }
        if let Some(dir) = read_env::<PathBuf>("SAVE_DATA_DIR") {
            config.save_dir = dir;
        }
        config.content_dir = read_env::<PathBuf>("CONTENT_DIR");

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::new()
            .with_tick_seconds(self.tick_seconds)
            .with_autosave_seconds(self.autosave_seconds)
    }
}

fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "clicker-economy")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
