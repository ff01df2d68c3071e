//! Run-level invariants checked over generated configurations.
//!
//! - A completed run finishes exactly `target` items.
//! - The rejection probability lies in `[0, 1]`.
//! - The same config and seed give a bit-identical report.
//! - An exhausted run never finishes more items than it generated.

use proptest::prelude::*;
use queuenet_core::Variate;
use queuenet_engine::{RunOutcome, SimConfig, Simulation, Strategy as Clock};
use queuenet_network::{Admission, Topology};
use queuenet_test_utils::fixtures;

fn arb_admission() -> impl Strategy<Value = Admission> {
    prop_oneof![Just(Admission::Queue), Just(Admission::Reject)]
}

fn arb_clock() -> impl Strategy<Value = Clock> {
    prop_oneof![
        Just(Clock::EventDriven),
        (0.05f64..1.0).prop_map(|step| Clock::FixedStep { step }),
    ]
}

fn arb_topology() -> impl Strategy<Value = Topology> {
    (0usize..5, 0.2f64..3.0, arb_admission(), 0.05f64..0.95).prop_map(
        |(shape, mean, admission, p)| {
            let service = Variate::exponential_mean(mean).unwrap();
            match shape {
                0 => fixtures::single_server(service, admission),
                1 => fixtures::pipeline(&[service, service, service], admission),
                2 => fixtures::converging(p, service, service),
                3 => fixtures::loop_back(service, service, p * 0.5, admission),
                _ => fixtures::feedback(service, p * 0.5),
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn completed_runs_finish_exactly_target(
        topology in arb_topology(),
        clock in arb_clock(),
        arrival_mean in 0.2f64..3.0,
        target in 1u64..300,
        seed in any::<u64>(),
    ) {
        let config = SimConfig::new(topology, Variate::exponential_mean(arrival_mean).unwrap(), target)
            .with_strategy(clock)
            .with_seed(seed);
        let report = Simulation::new(config).unwrap().run();
        prop_assert_eq!(report.outcome, RunOutcome::Completed);
        prop_assert_eq!(report.processed() + report.rejected(), target);
        prop_assert!(report.arrivals >= target);
        let p = report.rejection_probability();
        prop_assert!((0.0..=1.0).contains(&p), "rejection probability {}", p);
    }

    #[test]
    fn same_seed_gives_identical_report(
        topology in arb_topology(),
        clock in arb_clock(),
        seed in any::<u64>(),
    ) {
        let config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 200)
            .with_strategy(clock)
            .with_seed(seed);
        let first = Simulation::new(config.clone()).unwrap().run();
        let second = Simulation::new(config).unwrap().run();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn exhausted_runs_finish_every_generated_item(
        topology in arb_topology(),
        clock in arb_clock(),
        limit in 1u64..50,
        seed in any::<u64>(),
    ) {
        let mut config = SimConfig::new(topology, Variate::exponential(1.0).unwrap(), 1_000)
            .with_strategy(clock)
            .with_seed(seed);
        config.arrival_limit = Some(limit);
        let report = Simulation::new(config).unwrap().run();
        prop_assert_eq!(report.outcome, RunOutcome::Exhausted);
        prop_assert_eq!(report.arrivals, limit);
        // No closed cycles, so every generated item eventually leaves.
        prop_assert_eq!(report.processed() + report.rejected(), limit);
    }
}
