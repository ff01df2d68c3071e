//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input for constructing a [`Simulation`](crate::Simulation).
//! [`validate()`](SimConfig::validate) checks the run parameters at
//! startup. The topology and variates carry their own validation, done
//! when they are constructed; their errors convert into [`ConfigError`]
//! so model builders can use `?` throughout.

use std::error::Error;
use std::fmt;

use queuenet_core::{Variate, VariateError};
use queuenet_network::{Topology, TopologyError};

// ── Strategy ───────────────────────────────────────────────────────

/// How the simulation clock advances.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Strategy {
    /// Jump straight to the next scheduled event.
    #[default]
    EventDriven,
    /// Advance by a constant `step` and apply every crossed threshold at
    /// the new clock value.
    FixedStep {
        /// Clock increment per tick. Must be finite and positive.
        step: f64,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventDriven => write!(f, "event-driven"),
            Self::FixedStep { step } => write!(f, "fixed-step({step})"),
        }
    }
}

// ── TargetCount ────────────────────────────────────────────────────

/// What counts toward [`SimConfig::target`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetCount {
    /// Items that left the network, processed or rejected.
    #[default]
    Finished,
    /// Service completions at any station. A recirculated item counts
    /// once per pass.
    Completions,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Topology construction failed.
    Topology(TopologyError),
    /// A variate had invalid parameters.
    Variate(VariateError),
    /// `target` is zero.
    ZeroTarget,
    /// The fixed step is NaN, infinite, zero, or negative.
    InvalidStep {
        /// The invalid value.
        value: f64,
    },
    /// `arrival_limit` is `Some(0)`.
    ZeroArrivalLimit,
    /// `time_horizon` is NaN, infinite, zero, or negative.
    InvalidHorizon {
        /// The invalid value.
        value: f64,
    },
    /// The arrival variate has a non-positive mean, so arrivals would
    /// never move the clock.
    DegenerateArrival {
        /// Mean of the arrival variate.
        mean: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology(e) => write!(f, "topology: {e}"),
            Self::Variate(e) => write!(f, "variate: {e}"),
            Self::ZeroTarget => write!(f, "target must be at least 1"),
            Self::InvalidStep { value } => {
                write!(f, "fixed step must be finite and positive, got {value}")
            }
            Self::ZeroArrivalLimit => write!(f, "arrival_limit must be at least 1"),
            Self::InvalidHorizon { value } => {
                write!(f, "time_horizon must be finite and positive, got {value}")
            }
            Self::DegenerateArrival { mean } => {
                write!(f, "arrival variate mean must be positive, got {mean}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Topology(e) => Some(e),
            Self::Variate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TopologyError> for ConfigError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

impl From<VariateError> for ConfigError {
    fn from(e: VariateError) -> Self {
        Self::Variate(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// The validated network.
    pub topology: Topology,
    /// Inter-arrival time distribution.
    pub arrival: Variate,
    /// Number of items that must finish (processed or rejected), or of
    /// service completions, per [`target_counts`](Self::target_counts).
    pub target: u64,
    /// What counts toward `target`. Default: finished items.
    pub target_counts: TargetCount,
    /// Clock strategy. Default: event-driven.
    pub strategy: Strategy,
    /// RNG seed. Default: 0.
    pub seed: u64,
    /// Stop generating arrivals after this many. Default: unlimited.
    pub arrival_limit: Option<u64>,
    /// Do not generate arrivals past this clock value. Default: unlimited.
    pub time_horizon: Option<f64>,
    /// Record the total waiting-line occupancy on every change. Default: off.
    pub trace_occupancy: bool,
}

impl SimConfig {
    /// A configuration with default strategy, seed, and limits.
    pub fn new(topology: Topology, arrival: Variate, target: u64) -> Self {
        Self {
            topology,
            arrival,
            target,
            target_counts: TargetCount::default(),
            strategy: Strategy::default(),
            seed: 0,
            arrival_limit: None,
            time_horizon: None,
            trace_occupancy: false,
        }
    }

    /// Set the clock strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set what counts toward the target.
    pub fn with_target_counts(mut self, target_counts: TargetCount) -> Self {
        self.target_counts = target_counts;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the run parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        // Zero-length inter-arrival times would pin the clock forever.
        let mean = self.arrival.mean();
        if mean.is_nan() || mean <= 0.0 {
            return Err(ConfigError::DegenerateArrival { mean });
        }
        if let Strategy::FixedStep { step } = self.strategy {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidStep { value: step });
            }
        }
        if self.arrival_limit == Some(0) {
            return Err(ConfigError::ZeroArrivalLimit);
        }
        if let Some(horizon) = self.time_horizon {
            if !horizon.is_finite() || horizon <= 0.0 {
                return Err(ConfigError::InvalidHorizon { value: horizon });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuenet_network::{Admission, Destination, Routing};

    fn valid_config() -> SimConfig {
        let mut b = Topology::builder();
        let s = b.station("server", Variate::exponential(1.0).unwrap(), Admission::Reject);
        b.class("all", 1.0, Destination::station(s));
        b.route(s, Routing::to(Destination::Exit));
        SimConfig::new(b.build().unwrap(), Variate::exponential(1.0).unwrap(), 100)
    }

    #[test]
    fn validate_valid_config_succeeds() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn new_fills_defaults() {
        let cfg = valid_config();
        assert_eq!(cfg.strategy, Strategy::EventDriven);
        assert_eq!(cfg.seed, 0);
        assert_eq!(cfg.arrival_limit, None);
        assert_eq!(cfg.time_horizon, None);
        assert!(!cfg.trace_occupancy);
        assert_eq!(cfg.target_counts, TargetCount::Finished);
    }

    #[test]
    fn validate_zero_mean_arrival_fails() {
        for arrival in [
            Variate::constant(0.0).unwrap(),
            Variate::normal(-100.0, 1.0).unwrap(),
            Variate::normal(0.0, 2.0).unwrap(),
        ] {
            let mut cfg = valid_config();
            cfg.arrival = arrival;
            match cfg.validate() {
                Err(ConfigError::DegenerateArrival { mean }) => assert!(mean <= 0.0),
                other => panic!("expected DegenerateArrival for {arrival:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_small_positive_arrival_mean_succeeds() {
        let mut cfg = valid_config();
        cfg.arrival = Variate::normal(0.5, 3.0).unwrap();
        assert!(cfg.validate().is_ok());
        cfg.arrival = Variate::uniform(0.0, 0.001).unwrap();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_zero_target_fails() {
        let mut cfg = valid_config();
        cfg.target = 0;
        match cfg.validate() {
            Err(ConfigError::ZeroTarget) => {}
            other => panic!("expected ZeroTarget, got {other:?}"),
        }
    }

    #[test]
    fn validate_bad_step_fails() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = valid_config().with_strategy(Strategy::FixedStep { step });
            match cfg.validate() {
                Err(ConfigError::InvalidStep { .. }) => {}
                other => panic!("expected InvalidStep for {step}, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_zero_arrival_limit_fails() {
        let mut cfg = valid_config();
        cfg.arrival_limit = Some(0);
        match cfg.validate() {
            Err(ConfigError::ZeroArrivalLimit) => {}
            other => panic!("expected ZeroArrivalLimit, got {other:?}"),
        }
    }

    #[test]
    fn validate_bad_horizon_fails() {
        let mut cfg = valid_config();
        cfg.time_horizon = Some(-5.0);
        match cfg.validate() {
            Err(ConfigError::InvalidHorizon { value }) => assert_eq!(value, -5.0),
            other => panic!("expected InvalidHorizon, got {other:?}"),
        }
    }

    #[test]
    fn nested_errors_convert_and_expose_source() {
        let err: ConfigError = TopologyError::NoStations.into();
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "topology: topology has no stations");

        let err: ConfigError = VariateError::InvalidRate { value: 0.0 }.into();
        assert!(matches!(err, ConfigError::Variate(_)));
        assert!(ConfigError::ZeroTarget.source().is_none());
    }

    #[test]
    fn strategy_display() {
        assert_eq!(Strategy::EventDriven.to_string(), "event-driven");
        assert_eq!(Strategy::FixedStep { step: 0.5 }.to_string(), "fixed-step(0.5)");
    }
}
