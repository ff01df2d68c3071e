//! Airport passenger and cargo flow.
//!
//! ```text
//! business ─▶ fast registration ─▶ business screening ─┐
//!                                                       ├─▶ boarding ─▶ exit
//! economy ──▶ common registration ─▶ economy screening ─┘
//! cargo ────▶ common registration ─▶ exit
//! ```
//!
//! Both registration desks have no waiting room; screening and boarding
//! queue. Business and economy converge on boarding, so boarding keeps a
//! class-aware line. Every stage draws its service time from a uniform
//! range.

use queuenet_core::Variate;
use queuenet_engine::{ConfigError, SimConfig};
use queuenet_network::{Admission, Destination, Routing, Topology};

/// Parameters of the airport model. Ranges are `(low, high)` bounds of
/// uniform distributions.
#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    /// Probability that an arrival is a business passenger. Default: 0.3.
    pub business: f64,
    /// Probability that an arrival is an economy passenger. Default: 0.5.
    pub economy: f64,
    /// Probability that an arrival is cargo. Default: 0.2.
    pub cargo: f64,
    /// Inter-arrival time range. Default: `(8, 12)`.
    pub arrival: (f64, f64),
    /// Fast (business) registration. Default: `(10, 20)`.
    pub fast_registration: (f64, f64),
    /// Common (economy and cargo) registration. Default: `(15, 25)`.
    pub common_registration: (f64, f64),
    /// Priority screening. Default: `(15, 30)`.
    pub business_screening: (f64, f64),
    /// Regular screening. Default: `(20, 40)`.
    pub economy_screening: (f64, f64),
    /// Shared boarding. Default: `(10, 20)`.
    pub boarding: (f64, f64),
    /// Arrivals to finish. Default: 300.
    pub passengers: u64,
}

impl Default for Airport {
    fn default() -> Self {
        Self {
            business: 0.3,
            economy: 0.5,
            cargo: 0.2,
            arrival: (8.0, 12.0),
            fast_registration: (10.0, 20.0),
            common_registration: (15.0, 25.0),
            business_screening: (15.0, 30.0),
            economy_screening: (20.0, 40.0),
            boarding: (10.0, 20.0),
            passengers: 300,
        }
    }
}

fn uniform((low, high): (f64, f64)) -> Result<Variate, ConfigError> {
    Ok(Variate::uniform(low, high)?)
}

impl Airport {
    /// Build the station network.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        let mut b = Topology::builder();
        let fast = b.station(
            "fast_registration",
            uniform(self.fast_registration)?,
            Admission::Reject,
        );
        let common = b.station(
            "common_registration",
            uniform(self.common_registration)?,
            Admission::Reject,
        );
        let business_screen = b.station(
            "business_screening",
            uniform(self.business_screening)?,
            Admission::Queue,
        );
        let economy_screen = b.station(
            "economy_screening",
            uniform(self.economy_screening)?,
            Admission::Queue,
        );
        let boarding = b.station("boarding", uniform(self.boarding)?, Admission::Queue);

        b.class("business", self.business, Destination::station(fast));
        let economy = b.class("economy", self.economy, Destination::station(common));
        let cargo = b.class("cargo", self.cargo, Destination::station(common));

        b.route(fast, Routing::to(Destination::station(business_screen)));
        b.route_class(
            common,
            economy,
            Routing::to(Destination::station(economy_screen)),
        );
        b.route_class(common, cargo, Routing::to(Destination::Exit));
        b.route(business_screen, Routing::to(Destination::station(boarding)));
        b.route(economy_screen, Routing::to(Destination::station(boarding)));
        b.route(boarding, Routing::to(Destination::Exit));
        Ok(b.build()?)
    }

    /// Build a ready-to-run configuration.
    pub fn config(&self) -> Result<SimConfig, ConfigError> {
        Ok(SimConfig::new(
            self.topology()?,
            uniform(self.arrival)?,
            self.passengers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuenet_engine::{Simulation, Strategy};
    use queuenet_network::TopologyError;

    #[test]
    fn default_class_mix_is_valid() {
        let topo = Airport::default().topology().unwrap();
        assert_eq!(topo.classes().len(), 3);
        let boarding = topo.station_id("boarding").unwrap();
        // Business and economy converge; cargo never boards.
        assert_eq!(topo.classes_reaching(boarding).len(), 2);
    }

    #[test]
    fn class_mix_must_sum_to_one() {
        let model = Airport {
            cargo: 0.4,
            ..Airport::default()
        };
        match model.topology() {
            Err(ConfigError::Topology(TopologyError::ClassProbabilitySum { .. })) => {}
            other => panic!("expected Topology(ClassProbabilitySum), got {other:?}"),
        }
    }

    #[test]
    fn both_strategies_finish_all_passengers() {
        let config = Airport::default().config().unwrap().with_seed(12);
        let event = Simulation::new(config.clone()).unwrap().run();
        let fixed = Simulation::new(config.with_strategy(Strategy::FixedStep { step: 0.01 }))
            .unwrap()
            .run();
        for report in [&event, &fixed] {
            assert!(report.is_complete());
            assert_eq!(report.processed() + report.rejected(), 300);
            let p = report.rejection_probability();
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn cargo_only_mix_never_reaches_screening() {
        let model = Airport {
            business: 0.0,
            economy: 0.0,
            cargo: 1.0,
            ..Airport::default()
        };
        let report = Simulation::new(model.config().unwrap()).unwrap().run();
        assert!(report.is_complete());
        for station in &report.stations {
            if station.name != "common_registration" {
                assert_eq!(station.started, 0, "{}", station.name);
            }
        }
    }
}
