//! End-to-end runs through the simulation runner

use std::time::Duration;

use dungeon_skirmish::actor::{ActorKind, ActorTemplate, Specs};
use dungeon_skirmish::core::config::SimulationConfig;
use dungeon_skirmish::core::types::Position;
use dungeon_skirmish::simulation::Simulation;
use dungeon_skirmish::stats::Statistic;

fn fast_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        grid_size: 2,
        duration_secs: 1,
        actions_per_second: 100,
        round_pause_ms: 0,
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_short_run_produces_consistent_report() {
    // default starting corners do not fit a 2-grid, so build a roster that does
    let mut config = fast_config(11);
    for (template, (x, y)) in config.roster.iter_mut().zip([(0, 0), (2, 2), (0, 2), (2, 0)]) {
        template.start = Position::new(x, y);
    }

    let simulation = Simulation::new(config).unwrap();
    let events = simulation.events();
    let stats = simulation.statistics();
    let report = simulation.run().await.unwrap();

    assert_eq!(report.peak_gate_occupancy, 1);
    assert_eq!(report.failed_tasks, 0);
    assert!(report.rejected.is_empty());
    assert!(stats.total(Statistic::MovesPerformed) > 0);
    assert_eq!(report.winner.is_some(), report.survivors.len() == 1);

    // every survivor is reported at the end
    let lines = events.lines();
    for name in &report.survivors {
        let line = format!("{} is alive at the end of the battle", name);
        assert!(lines.contains(&line));
    }
    if report.winner.is_some() {
        assert_eq!(lines.last().map(String::as_str), Some("This unit won the battle!"));
    }

    // attacks only happen inside encounters
    if report.encounters == 0 {
        assert_eq!(stats.total(Statistic::AttacksPerformed), 0);
    } else {
        assert!(stats.total(Statistic::AttacksPerformed) >= report.encounters);
    }
}

#[tokio::test]
async fn test_zero_rate_keeps_everyone_in_place() {
    let config = SimulationConfig {
        grid_size: 5,
        actions_per_second: 0,
        ..fast_config(3)
    };

    let simulation = Simulation::new(config).unwrap();
    let events = simulation.events();
    let report = simulation.run().await.unwrap();

    assert_eq!(report.survivors.len(), 4);
    assert_eq!(report.encounters, 0);
    assert!(report.statistics.values().all(|s| s.moves_performed == 0));
    // nothing but the end-of-run survivor lines
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn test_out_of_bounds_actor_sits_out() {
    let mut config = fast_config(5);
    config.grid_size = 5;
    config.actions_per_second = 0;
    config.roster.push(ActorTemplate::new(
        "Wanderer",
        ActorKind::Rogue,
        Specs::new(10, 60, 30),
        Position::new(9, 9),
    ));

    let simulation = Simulation::new(config).unwrap();
    let events = simulation.events();
    let report = simulation.run().await.unwrap();

    assert_eq!(report.rejected, vec!["Wanderer".to_string()]);
    assert_eq!(report.survivors.len(), 4);
    assert_eq!(
        events.lines().first().map(String::as_str),
        Some("Invalid position for adventurer Wanderer")
    );
}

#[tokio::test]
async fn test_stop_signal_ends_run_early() {
    let config = SimulationConfig {
        duration_secs: 3600,
        round_pause_ms: 0,
        seed: Some(9),
        ..SimulationConfig::default()
    };

    let simulation = Simulation::new(config).unwrap();
    let report = tokio::time::timeout(
        Duration::from_secs(10),
        simulation.run_until(tokio::time::sleep(Duration::from_millis(50))),
    )
    .await
    .expect("run should stop when the stop future resolves")
    .unwrap();

    assert_eq!(report.failed_tasks, 0);
}

#[test]
fn test_toml_config_drives_simulation() {
    let config = SimulationConfig::parse_toml(
        r#"
        grid_size = 3
        duration_secs = 0
        seed = 1
        weapon_draw = "legacy"

        [[roster]]
        name = "Ser Bors"
        kind = "knight"
        specs = { attack = 15, health = 100, luck = 10 }
        start = { x = 3, y = 3 }
        "#,
    )
    .unwrap();

    let simulation = Simulation::new(config).unwrap();
    assert_eq!(simulation.config().roster.len(), 1);
    assert_eq!(simulation.config().grid_size, 3);
}
