//! Reference queueing networks for the queuenet simulation kernel.
//!
//! Each model is a plain parameter struct with lab defaults, a
//! `topology()` builder, and a `config()` that wraps the topology in a
//! ready-to-run [`SimConfig`](queuenet_engine::SimConfig):
//!
//! - [`InformationSystem`]: three operators in a reject pool feeding two
//!   computers with fixed processing times.
//! - [`Airport`]: business, economy, and cargo classes through
//!   registration, screening, and boarding.
//! - [`FeedbackLoop`]: one queueing server whose completions re-circulate,
//!   compared across both clock strategies.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod airport;
pub mod feedback_loop;
pub mod information_system;

pub use airport::Airport;
pub use feedback_loop::{FeedbackLoop, StrategyComparison};
pub use information_system::InformationSystem;
