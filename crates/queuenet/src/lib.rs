//! queuenet: discrete-event simulation of queueing networks.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all queuenet sub-crates. For most users, adding `queuenet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use queuenet::prelude::*;
//!
//! // Two reject-policy desks in a pool, then one queueing server.
//! let mut b = Topology::builder();
//! let desk_a = b.station("desk_a", Variate::uniform(15.0, 25.0).unwrap(), Admission::Reject);
//! let desk_b = b.station("desk_b", Variate::uniform(30.0, 50.0).unwrap(), Admission::Reject);
//! let server = b.station("server", Variate::constant(15.0).unwrap(), Admission::Queue);
//! b.class("requests", 1.0, Destination::pool([desk_a, desk_b]));
//! b.route(desk_a, Routing::to(Destination::station(server)));
//! b.route(desk_b, Routing::to(Destination::station(server)));
//! b.route(server, Routing::to(Destination::Exit));
//!
//! let config = SimConfig::new(b.build().unwrap(), Variate::uniform(8.0, 12.0).unwrap(), 300)
//!     .with_seed(42);
//! let report = Simulation::new(config).unwrap().run();
//! assert_eq!(report.outcome, RunOutcome::Completed);
//! assert_eq!(report.processed() + report.rejected(), 300);
//! assert!(report.rejection_probability() <= 1.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `queuenet-core` | IDs, variates, variate errors |
//! | [`network`] | `queuenet-network` | Stations, waiting lines, topologies |
//! | [`engine`] | `queuenet-engine` | Config, scheduler, strategies, reports |
//! | [`models`] | `queuenet-models` | Reference networks (information system, airport, feedback loop) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers and random variates (`queuenet-core`).
///
/// [`types::Variate`] is the closed set of duration distributions used for
/// inter-arrival and service times.
pub use queuenet_core as types;

/// Stations, waiting lines, and routing topologies (`queuenet-network`).
///
/// Build a validated [`network::Topology`] with
/// [`network::TopologyBuilder`].
pub use queuenet_network as network;

/// Execution engines (`queuenet-engine`).
///
/// [`engine::Simulation`] runs a [`engine::SimConfig`] with either
/// [`engine::Strategy::EventDriven`] or [`engine::Strategy::FixedStep`].
pub use queuenet_engine as engine;

/// Reference networks (`queuenet-models`).
pub use queuenet_models as models;

/// Common imports for typical queuenet usage.
///
/// ```rust
/// use queuenet::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use queuenet_core::{ClassId, StationId, Variate};

    // Network
    pub use queuenet_network::{Admission, Destination, Routing, Topology, TopologyBuilder};

    // Errors
    pub use queuenet_core::VariateError;
    pub use queuenet_engine::ConfigError;
    pub use queuenet_network::TopologyError;

    // Engine
    pub use queuenet_engine::{
        RunOutcome, RunReport, RunTotals, SimConfig, Simulation, StationReport, Strategy,
        TargetCount,
    };
}
