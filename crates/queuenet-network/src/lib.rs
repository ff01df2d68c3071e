//! Stations, waiting lines, and routing topologies.
//!
//! This crate holds the static and per-entity pieces of a queueing
//! network. A [`Topology`] describes which stations exist, how work-item
//! classes enter, and where each completion goes next. A [`Station`] is
//! a single server with a Free/Busy state machine. [`CounterQueue`] and
//! [`TokenQueue`] are the two waiting-line flavours.
//!
//! Nothing here advances time; the engine crate drives these types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod queue;
pub mod station;
pub mod topology;

pub use error::TopologyError;
pub use queue::{CounterQueue, TokenQueue};
pub use station::{Admission, Station};
pub use topology::{
    Branch, ClassSpec, Destination, RouteKey, Routing, StationSpec, Topology, TopologyBuilder,
    PROBABILITY_TOLERANCE,
};
