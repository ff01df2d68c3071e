//! Execution engines for queuenet simulations.
//!
//! A [`Simulation`] is built from a validated [`SimConfig`] and consumed
//! by [`run()`](Simulation::run), which drives the network until the
//! target number of items has finished or no further progress is
//! possible. Two interchangeable strategies share one run context:
//!
//! - [`Strategy::EventDriven`] jumps the clock from event to event using
//!   an [`EventScheduler`].
//! - [`Strategy::FixedStep`] advances the clock by a constant step and
//!   applies every threshold the step has crossed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod context;
mod event_driven;
mod fixed_step;
pub mod report;
pub mod scheduler;
pub mod simulation;

pub use config::{ConfigError, SimConfig, Strategy, TargetCount};
pub use report::{OccupancySample, RunOutcome, RunReport, RunTotals, StationReport};
pub use scheduler::{Event, EventKind, EventScheduler};
pub use simulation::Simulation;
