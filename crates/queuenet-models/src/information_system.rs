//! Request-handling information system.
//!
//! Requests arrive at a pool of three operators with no waiting room: the
//! first free operator takes the request, and if all three are busy the
//! request is rejected. Operators 0 and 1 hand finished requests to
//! computer 0, operator 2 to computer 1. Each computer has an unbounded
//! queue and a fixed processing time.

use queuenet_core::Variate;
use queuenet_engine::{ConfigError, SimConfig};
use queuenet_network::{Admission, Destination, Routing, Topology};

/// Parameters of the information system. Ranges are `(low, high)` bounds
/// of uniform distributions.
#[derive(Clone, Debug, PartialEq)]
pub struct InformationSystem {
    /// Inter-arrival time range. Default: `(8, 12)`.
    pub arrival: (f64, f64),
    /// Service time ranges of the three operators.
    /// Default: `(15, 25)`, `(30, 50)`, `(20, 60)`.
    pub operators: [(f64, f64); 3],
    /// Fixed processing time of the two computers. Default: `15`, `30`.
    pub computers: [f64; 2],
    /// Requests to finish. Default: 300.
    pub requests: u64,
}

impl Default for InformationSystem {
    fn default() -> Self {
        Self {
            arrival: (8.0, 12.0),
            operators: [(15.0, 25.0), (30.0, 50.0), (20.0, 60.0)],
            computers: [15.0, 30.0],
            requests: 300,
        }
    }
}

impl InformationSystem {
    /// Build the station network.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        let mut b = Topology::builder();
        let mut operators = Vec::with_capacity(3);
        for (i, &(low, high)) in self.operators.iter().enumerate() {
            operators.push(b.station(
                format!("operator{i}"),
                Variate::uniform(low, high)?,
                Admission::Reject,
            ));
        }
        let computer0 = b.station(
            "computer0",
            Variate::constant(self.computers[0])?,
            Admission::Queue,
        );
        let computer1 = b.station(
            "computer1",
            Variate::constant(self.computers[1])?,
            Admission::Queue,
        );

        b.class("request", 1.0, Destination::pool(operators.iter().copied()));
        b.route(operators[0], Routing::to(Destination::station(computer0)));
        b.route(operators[1], Routing::to(Destination::station(computer0)));
        b.route(operators[2], Routing::to(Destination::station(computer1)));
        b.route(computer0, Routing::to(Destination::Exit));
        b.route(computer1, Routing::to(Destination::Exit));
        Ok(b.build()?)
    }

    /// Build a ready-to-run configuration.
    pub fn config(&self) -> Result<SimConfig, ConfigError> {
        let (low, high) = self.arrival;
        Ok(SimConfig::new(
            self.topology()?,
            Variate::uniform(low, high)?,
            self.requests,
        ))
    }
}
