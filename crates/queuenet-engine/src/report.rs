//! Run results.
//!
//! [`RunReport`] is returned by [`Simulation::run()`](crate::Simulation::run).
//! It carries the run totals, how the run ended, and per-station counters.
//! Reports derive `PartialEq`, so two runs can be compared for
//! bit-identical results.

use crate::config::Strategy;

/// Items that have left the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Items that reached an exit.
    pub processed: u64,
    /// Items turned away by a busy reject-policy station or a reject route.
    pub rejected: u64,
}

impl RunTotals {
    /// `processed + rejected`.
    pub fn finished(&self) -> u64 {
        self.processed + self.rejected
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The counted quantity reached the target.
    Completed,
    /// No arrival remained and every station drained before the target
    /// was reached.
    Exhausted,
}

/// Counters for one station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationReport {
    /// Station name.
    pub name: String,
    /// Services started.
    pub started: u64,
    /// Services completed.
    pub completed: u64,
    /// Sum of drawn service durations, including any in progress at the end.
    pub busy_time: f64,
    /// `busy_time / end_time`, clamped to `[0, 1]` (0 for a zero-length run).
    pub utilisation: f64,
    /// Largest waiting-line length observed (0 for reject-policy stations).
    pub peak_waiting: usize,
}

/// Total waiting-line occupancy at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupancySample {
    /// Clock value of the change.
    pub time: f64,
    /// Items waiting across all lines after the change.
    pub waiting: usize,
}

/// The result of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Final processed and rejected counts.
    pub totals: RunTotals,
    /// Whether the target was reached.
    pub outcome: RunOutcome,
    /// The strategy that produced this report.
    pub strategy: Strategy,
    /// Clock value when the run stopped.
    pub end_time: f64,
    /// Arrivals generated.
    pub arrivals: u64,
    /// Per-station counters, indexed by `StationId`.
    pub stations: Vec<StationReport>,
    /// Occupancy trace, when requested in the config.
    pub occupancy: Option<Vec<OccupancySample>>,
}

impl RunReport {
    /// Items that reached an exit.
    pub fn processed(&self) -> u64 {
        self.totals.processed
    }

    /// Items rejected.
    pub fn rejected(&self) -> u64 {
        self.totals.rejected
    }

    /// `rejected / (processed + rejected)`, or 0 when nothing finished.
    pub fn rejection_probability(&self) -> f64 {
        let finished = self.totals.finished();
        if finished == 0 {
            return 0.0;
        }
        self.totals.rejected as f64 / finished as f64
    }

    /// Largest waiting-line length seen at any station.
    pub fn max_queue_occupancy(&self) -> usize {
        self.stations
            .iter()
            .map(|s| s.peak_waiting)
            .max()
            .unwrap_or(0)
    }

    /// Whether the run reached its target.
    pub fn is_complete(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}
