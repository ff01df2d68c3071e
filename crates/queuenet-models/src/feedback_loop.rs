//! Single server with re-circulation.
//!
//! One queueing server; after each service the task returns to the back of
//! the queue with probability `repeat` and leaves otherwise. The model's
//! figure of merit is the peak queue length, compared between the
//! event-driven and fixed-step strategies.
//!
//! Counting follows the classic single-server exercise: every service
//! completion counts toward `tasks`, recirculated passes included, and an
//! arriving task counts as queued at its arrival instant even when the
//! server takes it at once. A run with any arrival therefore peaks at 1 or
//! more; see [`FeedbackLoop::peak_queue`].

use queuenet_core::Variate;
use queuenet_engine::{ConfigError, RunReport, SimConfig, Simulation, Strategy, TargetCount};
use queuenet_network::{Admission, Destination, Routing, Topology};

/// Parameters of the feedback loop.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackLoop {
    /// Inter-arrival distribution. Default: uniform on `[0, 10)`.
    pub arrival: Variate,
    /// Service distribution. Default: normal, mean 4, deviation 1.
    pub service: Variate,
    /// Probability that a finished task re-enters the queue. Default: 0.
    pub repeat: f64,
    /// Service completions to run for. Default: 100.
    pub tasks: u64,
    /// Clock step for the fixed-step run. Default: 0.01.
    pub step: f64,
}

impl Default for FeedbackLoop {
    fn default() -> Self {
        Self {
            arrival: Variate::uniform(0.0, 10.0).expect("default range is valid"),
            service: Variate::normal(4.0, 1.0).expect("default parameters are valid"),
            repeat: 0.0,
            tasks: 100,
            step: 0.01,
        }
    }
}

/// The same feedback loop run under both strategies.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyComparison {
    /// Event-driven run.
    pub event_driven: RunReport,
    /// Fixed-step run.
    pub fixed_step: RunReport,
}

impl StrategyComparison {
    /// Absolute difference of the two peak queue lengths.
    pub fn max_queue_gap(&self) -> usize {
        FeedbackLoop::peak_queue(&self.event_driven)
            .abs_diff(FeedbackLoop::peak_queue(&self.fixed_step))
    }
}

impl FeedbackLoop {
    /// Build the one-station network.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        let mut b = Topology::builder();
        let server = b.station("server", self.service, Admission::Queue);
        b.class("task", 1.0, Destination::station(server));
        b.route(
            server,
            Routing::recirculate(self.repeat, Destination::station(server), Destination::Exit),
        );
        Ok(b.build()?)
    }

    /// Build an event-driven configuration that stops after `tasks`
    /// service completions.
    pub fn config(&self) -> Result<SimConfig, ConfigError> {
        Ok(SimConfig::new(self.topology()?, self.arrival, self.tasks)
            .with_target_counts(TargetCount::Completions))
    }

    /// Peak queue length with the arriving task counted.
    ///
    /// With one server, an arrival either joins the line (already counted
    /// in the report's peak) or finds the server free with an empty line,
    /// which counts as a queue of one.
    pub fn peak_queue(report: &RunReport) -> usize {
        report
            .max_queue_occupancy()
            .max(usize::from(report.arrivals > 0))
    }

    /// Run the loop under both strategies with the same seed.
    pub fn compare(&self, seed: u64) -> Result<StrategyComparison, ConfigError> {
        let config = self.config()?.with_seed(seed);
        let fixed = config
            .clone()
            .with_strategy(Strategy::FixedStep { step: self.step });
        Ok(StrategyComparison {
            event_driven: Simulation::new(config)?.run(),
            fixed_step: Simulation::new(fixed)?.run(),
        })
    }
}
