//! Benchmark profiles for the queuenet simulation kernel.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: the airport model, 10K passengers
//! - [`stress_profile`]: a 16-stage queueing pipeline with re-circulation,
//!   100K items

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use queuenet_core::Variate;
use queuenet_engine::{SimConfig, Strategy};
use queuenet_models::Airport;
use queuenet_network::{Admission, Destination, Routing, Topology};

/// Build the reference profile: the default airport with 10K passengers.
pub fn reference_profile(seed: u64, strategy: Strategy) -> SimConfig {
    Airport {
        passengers: 10_000,
        ..Airport::default()
    }
    .config()
    .unwrap()
    .with_seed(seed)
    .with_strategy(strategy)
}

/// Build the stress profile: 16 queueing stages in series, each sending
/// 10% of its completions back to the previous stage.
pub fn stress_profile(seed: u64, strategy: Strategy) -> SimConfig {
    const STAGES: usize = 16;
    let mut b = Topology::builder();
    let stages: Vec<_> = (0..STAGES)
        .map(|i| {
            b.station(
                format!("stage{i}"),
                Variate::exponential(2.0).unwrap(),
                Admission::Queue,
            )
        })
        .collect();
    b.class("items", 1.0, Destination::station(stages[0]));
    for (i, &stage) in stages.iter().enumerate() {
        let onward = match stages.get(i + 1) {
            Some(&next) => Destination::station(next),
            None => Destination::Exit,
        };
        let back = Destination::station(stages[i.saturating_sub(1)]);
        b.route(stage, Routing::recirculate(0.1, back, onward));
    }
    SimConfig::new(b.build().unwrap(), Variate::exponential(1.0).unwrap(), 100_000)
        .with_seed(seed)
        .with_strategy(strategy)
}
