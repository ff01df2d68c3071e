//! Error types shared across the queuenet workspace.
//!
//! Only configuration-time failures are represented here. Runtime
//! rejection of work items is a measured quantity, not an error, and
//! invariant violations (starting a busy station, removing from an empty
//! token queue) panic.

use std::error::Error;
use std::fmt;

/// Errors from constructing a [`Variate`](crate::Variate).
///
/// Every variant names the offending parameter and carries the value
/// that was supplied, so callers can report it without re-deriving it.
#[derive(Clone, Debug, PartialEq)]
pub enum VariateError {
    /// A rate parameter (`lambda`) was zero, negative, or non-finite.
    InvalidRate {
        /// The rejected rate.
        value: f64,
    },
    /// A standard deviation was zero, negative, or non-finite.
    InvalidStdDev {
        /// The rejected standard deviation.
        value: f64,
    },
    /// A mean was non-finite.
    InvalidMean {
        /// The rejected mean.
        value: f64,
    },
    /// A uniform interval was empty (`low >= high`) or had a non-finite bound.
    EmptyInterval {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// A uniform interval started below zero, so it could yield negative durations.
    NegativeInterval {
        /// Lower bound.
        low: f64,
    },
    /// An Erlang shape was zero (integer form) or NaN (real form).
    InvalidShape {
        /// The rejected shape, as supplied.
        value: f64,
    },
    /// A constant duration was negative or non-finite.
    InvalidDuration {
        /// The rejected duration.
        value: f64,
    },
}

impl fmt::Display for VariateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { value } => {
                write!(f, "rate lambda must be finite and positive, got {value}")
            }
            Self::InvalidStdDev { value } => {
                write!(f, "std dev sigma must be finite and positive, got {value}")
            }
            Self::InvalidMean { value } => write!(f, "mean mu must be finite, got {value}"),
            Self::EmptyInterval { low, high } => {
                write!(f, "uniform interval [{low}, {high}) is empty or unbounded")
            }
            Self::NegativeInterval { low } => {
                write!(f, "uniform lower bound must be >= 0, got {low}")
            }
            Self::InvalidShape { value } => {
                write!(f, "erlang shape k must be a positive integer, got {value}")
            }
            Self::InvalidDuration { value } => {
                write!(f, "constant duration must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for VariateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_parameter_and_value() {
        let msg = VariateError::InvalidRate { value: -2.0 }.to_string();
        assert!(msg.contains("lambda"));
        assert!(msg.contains("-2"));

        let msg = VariateError::EmptyInterval {
            low: 5.0,
            high: 1.0,
        }
        .to_string();
        assert!(msg.contains("[5, 1)"));
    }
}
