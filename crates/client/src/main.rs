//! Headless economy simulation.
//!
//! Composition root: loads content, restores the saved registry, drives the
//! player and the bots for a number of fixed steps, saves, and prints the
//! final ranking.
//!
//! ```bash
//! BOT_COUNT=8 SIM_STEPS=10000 cargo run -p economy-client
//! ```

mod config;
mod driver;

use std::sync::Arc;

use anyhow::{Context, Result};
use economy_content::{ContentFactory, DefaultContent};
use economy_core::{Catalog, Controller, EconomyConfig};
use runtime::{EnvironmentRegistry, FixedStepScheduler, ScoreGap, SnapshotService};

use crate::config::ClientConfig;

const PLAYER_NAME: &str = "player";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let runtime_config = config.runtime_config();

    let (catalog, economy_config) = load_content(&config)?;
    tracing::info!(
        "Content ready: {} upgrades, {} targets",
        catalog.upgrades().count(),
        catalog.targets().len()
    );

    // Creation order fixes every seed and bot name, so saves match up by name.
    let mut registry = EnvironmentRegistry::new(catalog, economy_config);
    registry.create_environment(PLAYER_NAME, Controller::Human)?;
    for _ in 0..config.bot_count {
        registry.create_bot()?;
    }

    let snapshots = SnapshotService::new_file_based(&config.save_dir)
        .with_context(|| format!("Failed to open save directory {}", config.save_dir.display()))?;
    let loaded = snapshots.load_into_registry(&runtime_config.save_slot, &mut registry)?;
    tracing::info!(
        "Loaded {}/{} environments from {}",
        loaded.restored(),
        registry.len(),
        config.save_dir.display()
    );

    let mut scheduler = FixedStepScheduler::new(&runtime_config);
    let mut completions = 0;
    let mut autosaves = 0;
    for _ in 0..config.sim_steps {
        for (_, environment) in registry.iter_mut() {
            driver::play_turn(environment);
        }
        let report = scheduler.run_steps(1, &mut registry, Some(&snapshots))?;
        completions += report.completions;
        autosaves += report.autosaves;
    }
    snapshots.save_registry(&runtime_config.save_slot, &registry)?;

    tracing::info!(
        "Simulated {} steps ({:.1}s): {} idle completions, {} autosaves",
        scheduler.total_steps(),
        scheduler.total_steps() as f64 * scheduler.step_seconds(),
        completions,
        autosaves
    );

    print_ranking(&registry);
    Ok(())
}

fn load_content(config: &ClientConfig) -> Result<(Arc<Catalog>, EconomyConfig)> {
    match &config.content_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            Ok((factory.load_catalog()?, factory.load_config()?))
        }
        None => Ok((DefaultContent::catalog()?, DefaultContent::config()?)),
    }
}

fn print_ranking(registry: &EnvironmentRegistry) {
    println!("{:>4}  {:<24} {:>12}  {:<10} {}", "rank", "name", "currency", "target", "gap");
    for entry in registry.snapshot() {
        let Some(environment) = registry.get(entry.handle) else {
            continue;
        };
        let target = environment
            .current_target()
            .map(|id| id.as_str())
            .unwrap_or("-");
        let gap = match registry.gap_to_leader(entry.handle) {
            Some(ScoreGap::Lead(lead)) => format!("+{}", lead),
            Some(ScoreGap::Behind(behind)) => format!("-{}", behind),
            Some(ScoreGap::Alone) | None => String::new(),
        };
        let marker = if entry.controller == Controller::Human { "*" } else { "" };
        println!(
            "{:>4}  {:<24} {:>12}  {:<10} {}",
            entry.rank,
            format!("{}{}", entry.name, marker),
            entry.currency.to_string(),
            target,
            gap
        );
    }
}
