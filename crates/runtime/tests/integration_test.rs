//! End-to-end tests: registry, scheduler and persistence working together.

use std::sync::Arc;

use economy_content::DefaultContent;
use economy_core::{
    ActionError, Catalog, Controller, EconomyConfig, EconomyEvent, Environment, EnvironmentState,
    EventLog, ExtendedNumber, StatKind, TargetDefinition, UpgradeCategory, UpgradeDefinition,
};
use runtime::{
    EnvironmentRegistry, FixedStepScheduler, FreshReason, LoadStatus, RuntimeConfig,
    SnapshotRepository, SnapshotService,
};
use tempfile::TempDir;

fn scenario_catalog() -> Arc<Catalog> {
    let upgrades = vec![
        UpgradeDefinition::new("a", UpgradeCategory::Stat, 10.0, 1.5)
            .with_stat(StatKind::ClickPower, 1.0),
        UpgradeDefinition::new("big_click", UpgradeCategory::Stat, 1.0, 1.0)
            .with_stat(StatKind::ClickPower, 9.9),
        UpgradeDefinition::new("idle", UpgradeCategory::Stat, 1.0, 1.0)
            .with_stat(StatKind::PassivePower, 2.0),
    ];
    let targets = vec![TargetDefinition::new("t1", 100.0, 5.0)];
    Arc::new(Catalog::new(upgrades, targets).unwrap())
}

fn with_currency(registry: &mut EnvironmentRegistry, name: &str, currency: f64) {
    let handle = registry.find(name).unwrap();
    let environment = registry.get_mut(handle).unwrap();
    let state = EnvironmentState {
        currency: ExtendedNumber::from(currency),
        ..environment.state()
    };
    environment.restore(state);
}

fn fresh_player(catalog: &Arc<Catalog>) -> Environment {
    Environment::new(
        "player",
        Controller::Human,
        catalog.clone(),
        EconomyConfig::new(),
        7,
    )
}

#[test]
fn purchase_raises_click_power() {
    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    assert_eq!(
        registry.get(player).unwrap().stat(StatKind::ClickPower).to_f64(),
        0.1
    );

    with_currency(&mut registry, "player", 10.0);
    let environment = registry.get_mut(player).unwrap();
    let receipt = environment.purchase("a").unwrap();

    assert_eq!(receipt.new_level, 1);
    assert_eq!(receipt.cost.to_f64(), 10.0);
    assert!(environment.currency().is_zero());
    assert!((environment.stat(StatKind::ClickPower).to_f64() - 1.1).abs() < 1e-9);
}

#[test]
fn failed_purchase_changes_nothing() {
    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    with_currency(&mut registry, "player", 9.0);

    let environment = registry.get_mut(player).unwrap();
    let before = environment.state();
    let error = environment.purchase("a").unwrap_err();

    assert!(matches!(error, ActionError::InsufficientFunds { .. }));
    assert_eq!(environment.state(), before);
    assert_eq!(environment.stat(StatKind::ClickPower).to_f64(), 0.1);
}

#[test]
fn ten_clicks_complete_once_and_pay_five() {
    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let log = Arc::new(EventLog::new());
    registry.add_listener(log.clone());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    with_currency(&mut registry, "player", 1.0);

    let environment = registry.get_mut(player).unwrap();
    environment.purchase("big_click").unwrap();
    assert_eq!(environment.stat(StatKind::ClickPower).to_f64(), 10.0);

    for click in 1..=10 {
        let completion = environment.click().unwrap();
        assert_eq!(completion.is_some(), click == 10, "click {click}");
    }

    assert_eq!(environment.currency().to_f64(), 5.0);
    assert!(environment.progress().0.is_zero());
    assert_eq!(
        log.count(|event| matches!(event, EconomyEvent::TargetCompleted { .. })),
        1
    );
}

#[test]
fn registry_round_trips_through_files() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = SnapshotService::new_file_based(temp_dir.path()).unwrap();
    let slot = RuntimeConfig::DEFAULT_SAVE_SLOT;

    let mut original = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    original
        .create_environment("player", Controller::Human)
        .unwrap();
    let bot = original.create_bot().unwrap();
    with_currency(&mut original, "player", 1.0);
    let player = original.find("player").unwrap();
    original.get_mut(player).unwrap().purchase("idle").unwrap();
    with_currency(&mut original, "player", 1.5e40);
    snapshots.save_registry(slot, &original).unwrap();

    let mut restored = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    restored
        .create_environment("player", Controller::Human)
        .unwrap();
    restored.create_bot().unwrap();
    let report = snapshots.load_into_registry(slot, &mut restored).unwrap();

    assert!(report.saved_at.is_some());
    assert_eq!(report.restored(), 2);
    assert!(report.unmatched.is_empty());
    for (handle, environment) in original.iter() {
        assert_eq!(restored.get(handle).unwrap().state(), environment.state());
    }
    assert_eq!(
        restored.get(bot).unwrap().name(),
        original.get(bot).unwrap().name()
    );
}

#[test]
fn truncated_save_loads_fresh_and_is_removed() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("environments.json"),
        r#"{"savedAt":"2024-01-01T00:00:00Z","environments":[{"name":"pla"#,
    )
    .unwrap();
    let snapshots = SnapshotService::new_file_based(temp_dir.path()).unwrap();

    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    with_currency(&mut registry, "player", 12.0);
    let report = snapshots
        .load_into_registry("environments", &mut registry)
        .unwrap();

    assert!(matches!(
        &report.statuses[0].1,
        LoadStatus::Fresh(FreshReason::Corrupt(_))
    ));
    let environment = registry.get(player).unwrap();
    assert!(environment.currency().is_zero());
    assert_eq!(environment.current_target().unwrap().as_str(), "t1");
    assert!(!snapshots.repository().exists("environments"));
}

#[test]
fn one_bad_record_does_not_spoil_the_document() {
    let snapshots = SnapshotService::in_memory();
    snapshots
        .repository()
        .save(
            "environments",
            r#"{
                "savedAt": "2024-01-01T00:00:00Z",
                "environments": [
                    {"name": "player", "currencyMantissa": 4.0, "currencyExponent": 2,
                     "experienceMantissa": 0.0, "experienceExponent": 0},
                    {"name": "bot", "currencyMantissa": "lots"},
                    {"name": "ghost", "currencyMantissa": 1.0, "currencyExponent": 0,
                     "experienceMantissa": 0.0, "experienceExponent": 0}
                ]
            }"#,
        )
        .unwrap();

    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    let bot = registry.create_environment("bot", Controller::Bot).unwrap();
    with_currency(&mut registry, "bot", 77.0);
    let report = snapshots
        .load_into_registry("environments", &mut registry)
        .unwrap();

    assert_eq!(registry.get(player).unwrap().currency().to_f64(), 400.0);
    assert!(report.statuses[0].1.is_restored());
    assert_eq!(report.statuses[1].1, LoadStatus::Fresh(FreshReason::Missing));
    assert!(registry.get(bot).unwrap().currency().is_zero());
    assert_eq!(report.unmatched, vec!["ghost".to_string()]);
}

#[test]
fn single_environment_slot_round_trip() {
    let snapshots = SnapshotService::in_memory();
    let catalog = scenario_catalog();
    let mut registry = EnvironmentRegistry::new(catalog.clone(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    with_currency(&mut registry, "player", 42.0);
    snapshots
        .save_environment("player", registry.get(player).unwrap())
        .unwrap();

    let outcome = snapshots
        .load_environment("player", fresh_player(&catalog))
        .unwrap();

    assert!(outcome.status.is_restored());
    assert_eq!(outcome.environment.currency().to_f64(), 42.0);

    let missing = snapshots
        .load_environment("nobody", fresh_player(&catalog))
        .unwrap();
    assert_eq!(missing.status, LoadStatus::Fresh(FreshReason::Missing));
}

#[test]
fn played_registry_without_a_save_starts_over() {
    let snapshots = SnapshotService::in_memory();
    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    let player = registry
        .create_environment("player", Controller::Human)
        .unwrap();
    with_currency(&mut registry, "player", 30.0);

    let report = snapshots
        .load_into_registry("environments", &mut registry)
        .unwrap();

    assert_eq!(report.statuses[0].1, LoadStatus::Fresh(FreshReason::Missing));
    assert!(registry.get(player).unwrap().currency().is_zero());
}

#[test]
fn runs_are_deterministic_and_reset_replays() {
    let catalog = DefaultContent::catalog().unwrap();
    let config = DefaultContent::config().unwrap();
    let runtime_config = RuntimeConfig::new().with_autosave_seconds(0.0);

    let run = |registry: &mut EnvironmentRegistry| -> Vec<EnvironmentState> {
        let mut scheduler = FixedStepScheduler::new(&runtime_config);
        for _ in 0..50 {
            for (_, environment) in registry.iter_mut() {
                environment.click().unwrap();
                let _ = environment.claim_bonus();
                let _ = environment.purchase("click_power");
            }
            scheduler.run_steps(5, registry, None).unwrap();
        }
        registry.iter().map(|(_, env)| env.state()).collect()
    };

    let mut first = EnvironmentRegistry::new(catalog.clone(), config.clone());
    let mut second = EnvironmentRegistry::new(catalog, config);
    for registry in [&mut first, &mut second] {
        registry
            .create_environment("player", Controller::Human)
            .unwrap();
        for _ in 0..3 {
            registry.create_bot().unwrap();
        }
    }

    let first_states = run(&mut first);
    assert_eq!(first_states, run(&mut second));

    first.reset_all();
    assert!(first.iter().all(|(_, env)| env.currency().is_zero()));
    assert_eq!(run(&mut first), first_states);
}

#[test]
fn autosave_writes_the_registry() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = SnapshotService::new_file_based(temp_dir.path()).unwrap();
    let config = RuntimeConfig::new()
        .with_tick_seconds(0.5)
        .with_autosave_seconds(1.0)
        .with_save_slot("autosave");

    let mut registry = EnvironmentRegistry::new(scenario_catalog(), EconomyConfig::new());
    registry
        .create_environment("player", Controller::Human)
        .unwrap();
    let mut scheduler = FixedStepScheduler::new(&config);

    let report = scheduler
        .advance(2.0, &mut registry, Some(&snapshots))
        .unwrap();
    assert_eq!(report.steps, 4);
    assert_eq!(report.autosaves, 2);

    let json = std::fs::read_to_string(temp_dir.path().join("autosave.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(document["savedAt"].is_string());
    assert_eq!(document["environments"][0]["name"], "player");
}
