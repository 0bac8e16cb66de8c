//! End-to-end routing scenarios.

use adaptive_router::config::{parse_config, BackendConfig};
use adaptive_router::decision::build_policy;
use adaptive_router::{Backend, DecisionEngine, Registry, Simulation, TelemetryAggregator};

mod common;

#[test]
fn test_lowest_latency_wins_when_health_tied() {
    let mut registry = common::reference_registry();
    let telemetry = TelemetryAggregator::new(20).unwrap();
    let engine = DecisionEngine::default();

    // Warm up telemetry with 10 successful requests each
    for _ in 0..10 {
        for i in 0..registry.len() {
            let backend = registry.at_mut(i).unwrap();
            let latency = backend.base_latency_ms;
            telemetry.record(backend, latency, true);
        }
    }

    for b in registry.iter() {
        assert_eq!(b.health_score, 1.0);
        assert_eq!(b.latency_obs_ms, b.base_latency_ms);
    }

    let chosen = engine.select(registry.backends()).expect("eligible backend");
    assert_eq!(chosen.id(), "b1");

    let scores: Vec<f64> = registry.iter().map(|b| engine.score(b)).collect();
    assert!(scores[0] > scores[1] && scores[1] > scores[2]);
}

#[test]
fn test_brownout_pivots_traffic_away() {
    let mut registry = common::reference_registry();
    let mut sim = common::brownout_simulation(DecisionEngine::default(), 2024);

    let outcomes = sim.run(&mut registry, 1000);

    assert_eq!(outcomes.len(), 1000);
    let before = common::share(&outcomes, 0..300, "b1");
    let during = common::share(&outcomes, 300..600, "b1");
    assert!(
        during < before,
        "b1 share during brownout {during} should be below {before}"
    );
    assert!(common::availability(&outcomes) > 0.9);

    // Reaction is fast: only a handful of requests reach the degraded backend
    let degraded_hits = outcomes[300..600]
        .iter()
        .filter(|o| o.backend_id == "b1")
        .count();
    assert!(degraded_hits <= 10, "{degraded_hits} requests hit degraded b1");
}

#[test]
fn test_all_disqualified_is_total_outage() {
    let backends = ["b1", "b2", "b3"]
        .into_iter()
        .map(|id| {
            let mut b = Backend::new(id, 200.0, 0.01);
            b.policy_ok = false;
            b
        })
        .collect();
    let mut registry = Registry::new(backends).unwrap();
    let mut sim = common::brownout_simulation(DecisionEngine::default(), 1);

    for _ in 0..5 {
        assert!(DecisionEngine::default().select(registry.backends()).is_none());
    }

    let outcomes = sim.run(&mut registry, 200);
    assert_eq!(outcomes.len(), 200);
    assert!(outcomes.iter().all(|o| o.is_outage() && !o.success));
    assert!(outcomes.iter().all(|o| o.latency_ms == 1000.0));
    assert!(registry.iter().all(|b| b.window().is_empty()));
}

#[test]
fn test_disqualified_never_selected_during_run() {
    let mut configs = vec![
        BackendConfig::new("b1", 200.0, 0.01),
        BackendConfig::new("b2", 220.0, 0.01),
        BackendConfig::new("b3", 180.0, 0.01),
    ];
    configs[1].policy_ok = false;
    configs[2].security_ok = false;
    let mut registry = Registry::from_configs(&configs).unwrap();
    let mut sim = common::brownout_simulation(DecisionEngine::default(), 77);

    let outcomes = sim.run(&mut registry, 400);
    assert!(outcomes
        .iter()
        .all(|o| o.backend_id == "b1"));
}

#[test]
fn test_same_seed_same_stream() {
    let run = |seed| {
        let mut registry = common::reference_registry();
        let mut sim = common::brownout_simulation(DecisionEngine::default(), seed);
        sim.run(&mut registry, 500)
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn test_run_from_config_document() {
    let config = parse_config(
        r#"
        [simulation]
        steps = 60
        seed = 3

        [telemetry]
        window_size = 10

        [[backends]]
        id = "Primary-Node"
        base_latency_ms = 40.0
        failure_rate = 0.01

        [[backends]]
        id = "Secondary-Node"
        base_latency_ms = 120.0
        failure_rate = 0.01
        "#,
    )
    .unwrap();

    let policy = build_policy(config.simulation.policy, &config.scoring).unwrap();
    let mut registry = Registry::from_configs(&config.backends).unwrap();
    let mut sim = Simulation::from_config(policy, &config).unwrap();

    let outcomes = sim.run(&mut registry, config.simulation.steps);
    assert_eq!(outcomes.len(), 60);
    for (ts, o) in outcomes.iter().enumerate() {
        assert_eq!(o.ts, ts as u64);
    }
    let primary = registry.get("Primary-Node").unwrap();
    assert_eq!(primary.base_latency_ms, 40.0);
    assert_eq!(primary.failure_rate, 0.01);
    assert!(registry.iter().all(|b| b.window().len() <= 10));
}

#[test]
fn test_bundled_lab_config_is_valid() {
    let config = adaptive_router::config::load_config(std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/lab.toml"
    )))
    .unwrap();
    assert_eq!(config.simulation.seed, Some(42));
    assert_eq!(config.backends.len(), 3);
}
