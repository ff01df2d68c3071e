//! Time-ordered event scheduler for the event-driven strategy.
//!
//! Events are ordered by:
//! 1. Time (earlier first, compared with [`f64::total_cmp`])
//! 2. Sequence number (insertion order among equal times)
//!
//! The sequence number makes ties deterministic: two events scheduled for
//! the same instant are served in the order they were inserted (FIFO).
//! An insert-before-equal-times list would serve the newest one first;
//! this scheduler deliberately does not, so an event scheduled earlier
//! in the run is never overtaken by a later one for the same instant.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use queuenet_core::{ClassId, StationId};

/// What an event does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A new item enters the network.
    Arrival,
    /// `station` finishes serving an item of `class`.
    Completion {
        /// The station whose service ends.
        station: StationId,
        /// The class of the item in service.
        class: ClassId,
    },
}

/// A timestamped transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    /// Absolute simulation time at which the event fires.
    pub time: f64,
    /// The transition to apply.
    pub kind: EventKind,
}

impl Event {
    /// An arrival at `time`.
    pub fn arrival(time: f64) -> Self {
        Self {
            time,
            kind: EventKind::Arrival,
        }
    }

    /// A service completion at `time`.
    pub fn completion(time: f64, station: StationId, class: ClassId) -> Self {
        Self {
            time,
            kind: EventKind::Completion { station, class },
        }
    }
}

/// Key for ordering events in the scheduler.
#[derive(Clone, Copy, Debug)]
struct EventKey {
    time: f64,
    sequence: u64,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.total_cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

/// Pending events ordered by `(time, insertion sequence)`.
#[derive(Clone, Debug, Default)]
pub struct EventScheduler {
    events: BTreeMap<EventKey, Event>,
    sequence: u64,
}

impl EventScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event.
    ///
    /// # Panics
    ///
    /// Panics if the event time is NaN.
    pub fn insert(&mut self, event: Event) {
        assert!(!event.time.is_nan(), "event time must not be NaN");
        let key = EventKey {
            time: event.time,
            sequence: self.sequence,
        };
        self.sequence += 1;
        self.events.insert(key, event);
    }

    /// Remove and return the earliest event.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.events.pop_first().map(|(_, event)| event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<f64> {
        self.events.first_key_value().map(|(key, _)| key.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
