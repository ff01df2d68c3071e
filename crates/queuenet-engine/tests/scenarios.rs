//! Reference scenarios with known analytic or limiting behaviour.

use queuenet_core::Variate;
use queuenet_engine::{RunOutcome, RunReport, SimConfig, Simulation, Strategy};
use queuenet_network::{Admission, Topology};
use queuenet_test_utils::fixtures;

fn run(topology: Topology, arrival: Variate, target: u64, seed: u64) -> RunReport {
    let config = SimConfig::new(topology, arrival, target).with_seed(seed);
    Simulation::new(config).unwrap().run()
}

fn run_with(config: SimConfig) -> RunReport {
    Simulation::new(config).unwrap().run()
}

// ── Analytic boundaries ─────────────────────────────────────────────

#[test]
fn loss_system_matches_erlang_b() {
    // M/M/1/0, arrival mean 0.1, service mean 10: offered load 100, so
    // the blocking probability is 100/101.
    let topology = fixtures::single_server(
        Variate::exponential_mean(10.0).unwrap(),
        Admission::Reject,
    );
    let report = run(topology, Variate::exponential_mean(0.1).unwrap(), 5_000, 7);
    assert!(report.is_complete());
    let expected = 100.0 / 101.0;
    let p = report.rejection_probability();
    assert!(
        (p - expected).abs() < 0.005,
        "rejection {p} vs expected {expected}"
    );
}

#[test]
fn ample_pipeline_rejects_almost_nothing() {
    let fast = Variate::exponential_mean(0.001).unwrap();
    let topology = fixtures::pipeline(&[fast, fast, fast], Admission::Reject);
    let report = run(topology, Variate::exponential(1.0).unwrap(), 10_000, 11);
    assert!(report.is_complete());
    assert!(
        report.rejection_probability() < 0.01,
        "rejection {}",
        report.rejection_probability()
    );
}

#[test]
fn queueing_pipeline_never_rejects() {
    let service = Variate::uniform(0.5, 1.5).unwrap();
    let topology = fixtures::pipeline(&[service, service, service], Admission::Queue);
    let report = run(topology, Variate::exponential(0.8).unwrap(), 2_000, 3);
    assert_eq!(report.rejected(), 0);
    assert_eq!(report.processed(), 2_000);
    assert!(report.max_queue_occupancy() > 0);
}

// ── Monotonicity ────────────────────────────────────────────────────

#[test]
fn faster_service_never_raises_rejection() {
    let mut previous = f64::INFINITY;
    for rate in [0.5, 1.0, 2.0, 4.0] {
        let topology = fixtures::single_server(
            Variate::exponential(rate).unwrap(),
            Admission::Reject,
        );
        let p = run(topology, Variate::exponential(1.0).unwrap(), 20_000, 42)
            .rejection_probability();
        assert!(p < previous, "rate {rate}: {p} not below {previous}");
        previous = p;
    }
}

// ── Recirculation ───────────────────────────────────────────────────

#[test]
fn loop_back_to_earlier_stage_finishes_target() {
    let service = Variate::exponential(3.0).unwrap();
    for strategy in [Strategy::EventDriven, Strategy::FixedStep { step: 0.01 }] {
        for admission in [Admission::Queue, Admission::Reject] {
            let topology = fixtures::loop_back(service, service, 0.3, admission);
            let config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 2_000)
                .with_strategy(strategy)
                .with_seed(17);
            let report = run_with(config);
            assert!(report.is_complete(), "{strategy} {admission:?}");
            assert_eq!(
                report.processed() + report.rejected(),
                2_000,
                "{strategy} {admission:?}"
            );
            // Items sent back start a second pass at the first stage.
            assert!(
                report.stations[0].started > report.arrivals - report.rejected(),
                "{strategy} {admission:?}"
            );
        }
    }
}

// ── Strategy convergence ────────────────────────────────────────────

#[test]
fn fixed_step_converges_to_event_driven() {
    let topology = fixtures::converging(
        0.4,
        Variate::exponential_mean(0.6).unwrap(),
        Variate::exponential_mean(0.5).unwrap(),
    );
    let base = SimConfig::new(topology, Variate::exponential_mean(1.0).unwrap(), 10_000)
        .with_seed(5);
    let event = run_with(base.clone());
    let fixed = run_with(base.with_strategy(Strategy::FixedStep { step: 1e-3 }));
    assert_eq!(fixed.strategy, Strategy::FixedStep { step: 1e-3 });
    let gap = (event.rejection_probability() - fixed.rejection_probability()).abs();
    assert!(
        gap < 0.02,
        "event {} vs fixed {}",
        event.rejection_probability(),
        fixed.rejection_probability()
    );
}

#[test]
fn coarse_step_still_finishes_target() {
    let topology = fixtures::single_server(
        Variate::exponential(1.0).unwrap(),
        Admission::Reject,
    );
    let config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 500)
        .with_strategy(Strategy::FixedStep { step: 5.0 });
    let report = run_with(config);
    assert!(report.is_complete());
    assert_eq!(report.processed() + report.rejected(), 500);
    // Every transition lands on a tick boundary.
    let ticks = report.end_time / 5.0;
    assert_eq!(ticks, ticks.round());
}

// ── Distribution equivalence ────────────────────────────────────────

#[test]
fn erlang_one_run_equals_exponential_run() {
    let erlang = fixtures::single_server(Variate::erlang(1, 0.8).unwrap(), Admission::Reject);
    let expo = fixtures::single_server(Variate::exponential(0.8).unwrap(), Admission::Reject);
    let a = run(erlang, Variate::erlang(1, 1.0).unwrap(), 3_000, 9);
    let b = run(expo, Variate::exponential(1.0).unwrap(), 3_000, 9);
    assert_eq!(a.totals, b.totals);
    assert_eq!(a.end_time, b.end_time);
}

// ── Determinism and stream independence ─────────────────────────────

#[test]
fn different_seeds_differ() {
    let topology = fixtures::single_server(
        Variate::exponential(1.0).unwrap(),
        Admission::Reject,
    );
    let a = run(topology.clone(), Variate::exponential(1.0).unwrap(), 1_000, 1);
    let b = run(topology, Variate::exponential(1.0).unwrap(), 1_000, 2);
    assert_ne!(a.end_time, b.end_time);
}

#[test]
fn downstream_service_does_not_perturb_arrivals() {
    let entry = Variate::exponential(2.0).unwrap();
    let slow = fixtures::pipeline(&[entry, Variate::exponential(0.5).unwrap()], Admission::Queue);
    let fast = fixtures::pipeline(&[entry, Variate::exponential(5.0).unwrap()], Admission::Queue);
    let limited = |topology| {
        let mut config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 10_000)
            .with_seed(21);
        config.arrival_limit = Some(300);
        run_with(config)
    };
    let a = limited(slow);
    let b = limited(fast);
    assert_eq!(a.outcome, RunOutcome::Exhausted);
    assert_eq!(a.stations[0].started, 300);
    // The entry station sees the same arrivals and draws the same services.
    assert_eq!(a.stations[0].busy_time, b.stations[0].busy_time);
}

// ── Exhaustion ──────────────────────────────────────────────────────

#[test]
fn arrival_limit_exhausts_run() {
    let topology = fixtures::single_server(
        Variate::exponential(1.0).unwrap(),
        Admission::Reject,
    );
    let mut config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 100);
    config.arrival_limit = Some(30);
    let report = run_with(config);
    assert_eq!(report.outcome, RunOutcome::Exhausted);
    assert!(!report.is_complete());
    assert_eq!(report.arrivals, 30);
    assert_eq!(report.processed() + report.rejected(), 30);
}

#[test]
fn time_horizon_exhausts_run_in_both_strategies() {
    for strategy in [Strategy::EventDriven, Strategy::FixedStep { step: 0.25 }] {
        let topology = fixtures::single_server(
            Variate::constant(0.5).unwrap(),
            Admission::Queue,
        );
        let mut config = SimConfig::new(topology, Variate::constant(1.0).unwrap(), 1_000)
            .with_strategy(strategy);
        config.time_horizon = Some(10.0);
        let report = run_with(config);
        assert_eq!(report.outcome, RunOutcome::Exhausted, "{strategy}");
        // Arrivals at 1, 2, ..., 10; the last one leaves at 10.5.
        assert_eq!(report.arrivals, 10, "{strategy}");
        assert_eq!(report.processed(), 10, "{strategy}");
        assert_eq!(report.end_time, 10.5, "{strategy}");
    }
}

// ── Occupancy ───────────────────────────────────────────────────────

#[test]
fn occupancy_trace_tracks_feedback_queue() {
    let topology = fixtures::feedback(Variate::exponential(1.5).unwrap(), 0.3);
    let mut config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 2_000);
    config.trace_occupancy = true;
    let report = run_with(config);
    let trace = report.occupancy.as_ref().unwrap();
    assert!(!trace.is_empty());
    let peak = trace.iter().map(|s| s.waiting).max().unwrap();
    assert_eq!(peak, report.max_queue_occupancy());
    assert!(trace.windows(2).all(|w| w[0].time <= w[1].time));
    assert!(trace.windows(2).all(|w| w[0].waiting.abs_diff(w[1].waiting) == 1));
}
