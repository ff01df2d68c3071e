//! The user-facing run API.
//!
//! [`Simulation`] validates a [`SimConfig`] once in
//! [`new()`](Simulation::new) and is consumed by [`run()`](Simulation::run).
//! Every run builds fresh stations, lines, and random streams from the
//! config, so the same config and seed always produce the same
//! [`RunReport`].
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`]: it can be built on one thread and run on
//! another. A run owns all of its state, so independent simulations never
//! share anything. Dropping a `Simulation` before calling `run()` is the
//! only form of cancellation.

use crate::config::{ConfigError, SimConfig, Strategy};
use crate::context::RunContext;
use crate::report::RunReport;
use crate::{event_driven, fixed_step};

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

/// A validated, ready-to-run simulation.
///
/// # Example
///
/// ```
/// use queuenet_core::Variate;
/// use queuenet_engine::{SimConfig, Simulation};
/// use queuenet_network::{Admission, Destination, Routing, Topology};
///
/// let mut b = Topology::builder();
/// let server = b.station("server", Variate::exponential(1.0).unwrap(), Admission::Reject);
/// b.class("jobs", 1.0, Destination::station(server));
/// b.route(server, Routing::to(Destination::Exit));
/// let topology = b.build().unwrap();
///
/// let config = SimConfig::new(topology, Variate::exponential(0.5).unwrap(), 1_000);
/// let report = Simulation::new(config).unwrap().run();
/// assert_eq!(report.processed() + report.rejected(), 1_000);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
}

impl Simulation {
    /// Validate `config` and wrap it for running.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run to completion or exhaustion with the configured strategy.
    pub fn run(self) -> RunReport {
        let strategy = self.config.strategy;
        let ctx = RunContext::new(self.config);
        match strategy {
            Strategy::EventDriven => event_driven::run(ctx),
            Strategy::FixedStep { step } => fixed_step::run(ctx, step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RunOutcome;
    use queuenet_core::Variate;
    use queuenet_network::{Admission, Destination, Routing, Topology};

    fn single_server(admission: Admission, service: Variate) -> Topology {
        let mut b = Topology::builder();
        let s = b.station("server", service, admission);
        b.class("jobs", 1.0, Destination::station(s));
        b.route(s, Routing::to(Destination::Exit));
        b.build().unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let topo = single_server(Admission::Reject, Variate::constant(1.0).unwrap());
        let cfg = SimConfig::new(topo, Variate::constant(1.0).unwrap(), 0);
        match Simulation::new(cfg) {
            Err(ConfigError::ZeroTarget) => {}
            other => panic!("expected ZeroTarget, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_arrivals_that_never_advance_the_clock() {
        // Normal(-100, 1) clamps every draw to zero.
        let topo = single_server(Admission::Queue, Variate::constant(1.0).unwrap());
        let cfg = SimConfig::new(topo, Variate::normal(-100.0, 1.0).unwrap(), 10);
        match Simulation::new(cfg) {
            Err(ConfigError::DegenerateArrival { mean }) => assert_eq!(mean, -100.0),
            other => panic!("expected DegenerateArrival, got {other:?}"),
        }
    }

    #[test]
    fn deterministic_single_server_never_rejects() {
        // Service 1 with arrivals every 2: the server is always free.
        let topo = single_server(Admission::Reject, Variate::constant(1.0).unwrap());
        let cfg = SimConfig::new(topo, Variate::constant(2.0).unwrap(), 50);
        let report = Simulation::new(cfg).unwrap().run();
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.processed(), 50);
        assert_eq!(report.rejected(), 0);
        // The 50th item arrives at 100 and leaves at 101.
        assert_eq!(report.end_time, 101.0);
        assert_eq!(report.stations[0].completed, 50);
    }

    #[test]
    fn deterministic_single_server_rejects_every_other_arrival() {
        // Service 3 with arrivals every 2: arrivals at 4, 8, ... find the
        // server busy; arrivals at 2, 6, 10, ... are served.
        let topo = single_server(Admission::Reject, Variate::constant(3.0).unwrap());
        let cfg = SimConfig::new(topo, Variate::constant(2.0).unwrap(), 100);
        let report = Simulation::new(cfg).unwrap().run();
        assert!(report.is_complete());
        assert!((report.rejection_probability() - 0.5).abs() <= 0.01);
    }

    #[test]
    fn fixed_step_matches_event_driven_on_deterministic_network() {
        // Thresholds fall exactly on tick boundaries, so both strategies
        // see identical transitions.
        let topo = single_server(Admission::Queue, Variate::constant(3.0).unwrap());
        let base = SimConfig::new(topo, Variate::constant(2.0).unwrap(), 40);
        let event = Simulation::new(base.clone()).unwrap().run();
        let fixed = Simulation::new(base.with_strategy(Strategy::FixedStep { step: 0.5 }))
            .unwrap()
            .run();
        assert_eq!(event.totals, fixed.totals);
        assert_eq!(event.end_time, fixed.end_time);
        assert_eq!(event.max_queue_occupancy(), fixed.max_queue_occupancy());
    }
}
