//! Single-server station state machine.
//!
//! A [`Station`] is either Free or Busy. [`start()`](Station::start)
//! moves it Free→Busy and draws one service duration;
//! [`finish()`](Station::finish) moves it Busy→Free. There are no other
//! transitions. Starting a busy station (or finishing a free one) is a
//! programming error and panics: callers check [`is_free()`](Station::is_free)
//! first.

use queuenet_core::Variate;
use rand::Rng;

/// What happens to an item that finds every eligible station busy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Admission {
    /// Wait in the station's unbounded FIFO line.
    Queue,
    /// No waiting room: the item is counted as rejected.
    Reject,
}

/// A single server with a stochastic service time.
#[derive(Clone, Debug)]
pub struct Station {
    service: Variate,
    busy: bool,
    finish_time: f64,
    started: u64,
    completed: u64,
    busy_time: f64,
}

impl Station {
    /// Create an idle station.
    pub fn new(service: Variate) -> Self {
        Self {
            service,
            busy: false,
            finish_time: f64::INFINITY,
            started: 0,
            completed: 0,
            busy_time: 0.0,
        }
    }

    /// Whether the station can accept an item.
    pub fn is_free(&self) -> bool {
        !self.busy
    }

    /// Absolute time the current service ends, or `f64::INFINITY` when idle.
    pub fn finish_time(&self) -> f64 {
        self.finish_time
    }

    /// Begin serving an item at `now`. Returns the absolute finish time,
    /// which the caller schedules as the completion.
    ///
    /// # Panics
    ///
    /// Panics if the station is already busy.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> f64 {
        assert!(!self.busy, "start() called on a busy station");
        let duration = self.service.sample(rng);
        self.busy = true;
        self.finish_time = now + duration;
        self.started += 1;
        self.busy_time += duration;
        self.finish_time
    }

    /// End the current service.
    ///
    /// # Panics
    ///
    /// Panics if the station is free.
    pub fn finish(&mut self) {
        assert!(self.busy, "finish() called on a free station");
        self.busy = false;
        self.finish_time = f64::INFINITY;
        self.completed += 1;
    }

    /// The service-time distribution.
    pub fn service(&self) -> &Variate {
        &self.service
    }

    /// Services started so far.
    pub fn started(&self) -> u64 {
        self.started
    }

    /// Services completed so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Sum of all drawn service durations, including one still in progress.
    pub fn busy_time(&self) -> f64 {
        self.busy_time
    }
}
