//! Core types for the queuenet simulation framework.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental vocabulary used throughout the workspace: station and
//! class identifiers, error types, and the [`Variate`] family of random
//! duration sources.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod variate;

pub use error::VariateError;
pub use id::{ClassId, StationId};
pub use variate::{Constant, Erlang, Exponential, Normal, Uniform, Variate};
