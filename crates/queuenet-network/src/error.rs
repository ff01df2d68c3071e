//! Topology validation errors.

use std::error::Error;
use std::fmt;

use queuenet_core::{ClassId, StationId};

/// Errors detected by [`TopologyBuilder::build()`](crate::TopologyBuilder::build).
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// The topology declares no stations.
    NoStations,
    /// The topology declares no work-item classes.
    NoClasses,
    /// Two stations share a name.
    DuplicateStation {
        /// The repeated name.
        name: String,
    },
    /// Two classes share a name.
    DuplicateClass {
        /// The repeated name.
        name: String,
    },
    /// A destination or route refers to a station that does not exist.
    UnknownStation {
        /// The dangling identifier.
        station: StationId,
    },
    /// A route refers to a class that does not exist.
    UnknownClass {
        /// The dangling identifier.
        class: ClassId,
    },
    /// A station pool destination lists no stations.
    EmptyPool {
        /// Where the pool appears.
        context: String,
    },
    /// Members of one station pool disagree on their admission policy.
    MixedPoolAdmission {
        /// Where the pool appears.
        context: String,
    },
    /// A routing entry has no branches.
    EmptyRouting {
        /// The station the routing belongs to.
        station: String,
    },
    /// A probability was negative, above one, or not finite.
    InvalidProbability {
        /// Where the probability appears.
        context: String,
        /// The rejected value.
        value: f64,
    },
    /// Class probabilities do not sum to one.
    ClassProbabilitySum {
        /// The actual sum.
        sum: f64,
    },
    /// The branch probabilities of one routing entry do not sum to one.
    BranchProbabilitySum {
        /// Where the routing appears.
        context: String,
        /// The actual sum.
        sum: f64,
    },
    /// A class can reach a station that has no route for it.
    MissingRoute {
        /// The station lacking a route.
        station: String,
        /// The class that reaches it.
        class: String,
    },
    /// No class entry can ever reach this station.
    UnreachableStation {
        /// The orphaned station.
        station: String,
    },
    /// Items of this class at this station can never reach an exit or
    /// reject destination.
    ClosedCycle {
        /// A station on the cycle.
        station: String,
        /// The trapped class.
        class: String,
    },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStations => write!(f, "topology has no stations"),
            Self::NoClasses => write!(f, "topology has no work-item classes"),
            Self::DuplicateStation { name } => write!(f, "duplicate station name '{name}'"),
            Self::DuplicateClass { name } => write!(f, "duplicate class name '{name}'"),
            Self::UnknownStation { station } => write!(f, "unknown station id {station}"),
            Self::UnknownClass { class } => write!(f, "unknown class id {class}"),
            Self::EmptyPool { context } => write!(f, "{context}: station pool is empty"),
            Self::MixedPoolAdmission { context } => {
                write!(f, "{context}: pool members have different admission policies")
            }
            Self::EmptyRouting { station } => {
                write!(f, "routing for station '{station}' has no branches")
            }
            Self::InvalidProbability { context, value } => {
                write!(f, "{context}: probability must be in [0, 1], got {value}")
            }
            Self::ClassProbabilitySum { sum } => {
                write!(f, "class probabilities must sum to 1, got {sum}")
            }
            Self::BranchProbabilitySum { context, sum } => {
                write!(f, "{context}: branch probabilities must sum to 1, got {sum}")
            }
            Self::MissingRoute { station, class } => {
                write!(f, "class '{class}' reaches station '{station}' but has no route out")
            }
            Self::UnreachableStation { station } => {
                write!(f, "station '{station}' is unreachable from every class entry")
            }
            Self::ClosedCycle { station, class } => write!(
                f,
                "class '{class}' at station '{station}' can never reach an exit or reject"
            ),
        }
    }
}

impl Error for TopologyError {}
