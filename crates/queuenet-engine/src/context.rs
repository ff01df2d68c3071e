//! Run context shared by both execution strategies.
//!
//! [`RunContext`] owns every piece of mutable run state: stations, waiting
//! lines, totals, the clock, and the random streams. The strategies only
//! decide *when* transitions happen; the context decides *what* they do.
//!
//! # Random streams
//!
//! Each random source draws from its own ChaCha8 stream derived from the
//! seed: arrivals, class draws, routing draws, and one stream per station.
//! Changing one station's service distribution therefore leaves the
//! sequences seen by every other source untouched.

use queuenet_core::{ClassId, StationId, Variate};
use queuenet_network::{Admission, CounterQueue, Destination, Station, TokenQueue, Topology};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::{SimConfig, Strategy, TargetCount};
use crate::report::{OccupancySample, RunOutcome, RunReport, RunTotals, StationReport};

const ARRIVAL_STREAM: u64 = 0;
const CLASS_STREAM: u64 = 1;
const ROUTING_STREAM: u64 = 2;
const FIRST_STATION_STREAM: u64 = 3;

fn stream(seed: u64, id: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(id);
    rng
}

// ── WaitingLine ────────────────────────────────────────────────────

/// A queue-policy station's line. A bare counter suffices when only one
/// class can ever wait here.
#[derive(Debug)]
enum WaitingLine {
    Counter { queue: CounterQueue, class: ClassId },
    Tokens(TokenQueue<ClassId>),
}

impl WaitingLine {
    fn for_classes(classes: &[ClassId]) -> Self {
        match classes {
            [only] => Self::Counter {
                queue: CounterQueue::new(),
                class: *only,
            },
            _ => Self::Tokens(TokenQueue::new()),
        }
    }

    fn add(&mut self, class: ClassId) {
        match self {
            Self::Counter { queue, class: only } => {
                debug_assert_eq!(*only, class, "counter line holds a single class");
                queue.add();
            }
            Self::Tokens(queue) => queue.add(class),
        }
    }

    fn pop(&mut self) -> Option<ClassId> {
        match self {
            Self::Counter { queue, class } => queue.remove().then_some(*class),
            Self::Tokens(queue) => queue.try_remove(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Counter { queue, .. } => queue.size(),
            Self::Tokens(queue) => queue.size(),
        }
    }

    fn peak(&self) -> usize {
        match self {
            Self::Counter { queue, .. } => queue.peak(),
            Self::Tokens(queue) => queue.peak(),
        }
    }
}

// ── NetworkState ───────────────────────────────────────────────────

#[derive(Debug)]
struct Node {
    station: Station,
    admission: Admission,
    line: Option<WaitingLine>,
    in_service: Option<ClassId>,
    rng: ChaCha8Rng,
}

/// An item that has just started service.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Seated {
    pub(crate) station: StationId,
    pub(crate) class: ClassId,
    pub(crate) finish: f64,
}

#[derive(Debug)]
struct NetworkState {
    nodes: Vec<Node>,
    totals: RunTotals,
    completions: u64,
    now: f64,
    waiting: usize,
    trace: Option<Vec<OccupancySample>>,
}

impl NetworkState {
    /// Send an item of `class` to `dest`: exit, reject, seat, or wait.
    fn admit(&mut self, dest: &Destination, class: ClassId) -> Option<Seated> {
        let pool = match dest {
            Destination::Exit => {
                self.totals.processed += 1;
                trace!(time = self.now, %class, "item exited");
                return None;
            }
            Destination::Reject => {
                self.totals.rejected += 1;
                trace!(time = self.now, %class, "item rejected by route");
                return None;
            }
            Destination::Stations(pool) => pool,
        };

        if let Some(&free) = pool
            .iter()
            .find(|id| self.nodes[id.index()].station.is_free())
        {
            return Some(self.seat(free, class));
        }

        let first = pool.first().expect("validated pool is non-empty");
        match self.nodes[first.index()].admission {
            Admission::Reject => {
                self.totals.rejected += 1;
                trace!(time = self.now, %class, station = %first, "pool busy, item rejected");
                None
            }
            Admission::Queue => {
                let shortest = pool
                    .iter()
                    .copied()
                    .min_by_key(|id| self.line_len(*id))
                    .expect("validated pool is non-empty");
                self.nodes[shortest.index()]
                    .line
                    .as_mut()
                    .expect("queue-policy station has a waiting line")
                    .add(class);
                self.waiting += 1;
                trace!(time = self.now, %class, station = %shortest, "item queued");
                self.record_occupancy();
                None
            }
        }
    }

    fn line_len(&self, station: StationId) -> usize {
        self.nodes[station.index()]
            .line
            .as_ref()
            .map_or(0, WaitingLine::size)
    }

    fn seat(&mut self, station: StationId, class: ClassId) -> Seated {
        let now = self.now;
        let node = &mut self.nodes[station.index()];
        let finish = node.station.start(now, &mut node.rng);
        node.in_service = Some(class);
        trace!(time = now, %class, %station, finish, "service started");
        Seated {
            station,
            class,
            finish,
        }
    }

    /// Free `station` and hand back the class of the item it served.
    fn release(&mut self, station: StationId) -> ClassId {
        let node = &mut self.nodes[station.index()];
        node.station.finish();
        self.completions += 1;
        node.in_service
            .take()
            .expect("busy station holds an item in service")
    }

    /// Seat the head of `station`'s line if the station is free.
    fn seat_waiting(&mut self, station: StationId) -> Option<Seated> {
        let node = &mut self.nodes[station.index()];
        if !node.station.is_free() {
            return None;
        }
        let class = node.line.as_mut()?.pop()?;
        self.waiting -= 1;
        self.record_occupancy();
        Some(self.seat(station, class))
    }

    fn record_occupancy(&mut self) {
        if let Some(trace) = &mut self.trace {
            trace.push(OccupancySample {
                time: self.now,
                waiting: self.waiting,
            });
        }
    }
}

// ── RunContext ─────────────────────────────────────────────────────

/// All state of one run.
#[derive(Debug)]
pub(crate) struct RunContext {
    topology: Topology,
    state: NetworkState,
    arrival: Variate,
    arrival_rng: ChaCha8Rng,
    class_rng: ChaCha8Rng,
    routing_rng: ChaCha8Rng,
    target: u64,
    target_counts: TargetCount,
    arrival_limit: Option<u64>,
    time_horizon: Option<f64>,
    arrivals: u64,
    strategy: Strategy,
}

impl RunContext {
    pub(crate) fn new(config: SimConfig) -> Self {
        let SimConfig {
            topology,
            arrival,
            target,
            target_counts,
            strategy,
            seed,
            arrival_limit,
            time_horizon,
            trace_occupancy,
        } = config;

        let nodes = topology
            .stations()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = StationId(i as u32);
                Node {
                    station: Station::new(spec.service),
                    admission: spec.admission,
                    line: match spec.admission {
                        Admission::Queue => {
                            Some(WaitingLine::for_classes(topology.classes_reaching(id)))
                        }
                        Admission::Reject => None,
                    },
                    in_service: None,
                    rng: stream(seed, FIRST_STATION_STREAM + i as u64),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            %strategy,
            target,
            seed,
            stations = nodes.len(),
            classes = topology.classes().len(),
            "simulation run started"
        );

        Self {
            state: NetworkState {
                nodes,
                totals: RunTotals::default(),
                completions: 0,
                now: 0.0,
                waiting: 0,
                trace: trace_occupancy.then(Vec::new),
            },
            topology,
            arrival,
            arrival_rng: stream(seed, ARRIVAL_STREAM),
            class_rng: stream(seed, CLASS_STREAM),
            routing_rng: stream(seed, ROUTING_STREAM),
            target,
            target_counts,
            arrival_limit,
            time_horizon,
            arrivals: 0,
            strategy,
        }
    }

    /// Move the clock forward.
    pub(crate) fn advance_to(&mut self, time: f64) {
        debug_assert!(time >= self.state.now, "clock moved backwards");
        self.state.now = time;
    }

    /// Whether the counted quantity has reached the target.
    pub(crate) fn is_complete(&self) -> bool {
        let counted = match self.target_counts {
            TargetCount::Finished => self.state.totals.finished(),
            TargetCount::Completions => self.state.completions,
        };
        counted >= self.target
    }

    /// Whether every station is free.
    pub(crate) fn all_idle(&self) -> bool {
        self.state.nodes.iter().all(|n| n.station.is_free())
    }

    /// The busy station that finishes first, lowest id on ties.
    pub(crate) fn earliest_finish(&self) -> Option<(StationId, f64)> {
        self.state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.station.is_free())
            .map(|(i, n)| (StationId(i as u32), n.station.finish_time()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Draw the next arrival time after `from`, or `None` once the arrival
    /// limit is spent or the time horizon is passed.
    pub(crate) fn next_arrival_after(&mut self, from: f64) -> Option<f64> {
        if self.arrival_limit.is_some_and(|limit| self.arrivals >= limit) {
            return None;
        }
        let time = from + self.arrival.sample(&mut self.arrival_rng);
        match self.time_horizon {
            Some(horizon) if time > horizon => None,
            _ => Some(time),
        }
    }

    /// A new item enters: draw its class and admit it at the class entry.
    pub(crate) fn arrive(&mut self) -> Option<Seated> {
        self.arrivals += 1;
        let class = if self.topology.has_class_choice() {
            self.topology.choose_class(self.class_rng.gen())
        } else {
            ClassId(0)
        };
        trace!(time = self.state.now, %class, arrival = self.arrivals, "arrival");
        self.state.admit(&self.topology.class(class).entry, class)
    }

    /// `station` finishes: route the finished item, then seat the next
    /// waiting item if the station is still free.
    pub(crate) fn complete(&mut self, station: StationId) -> SmallVec<[Seated; 2]> {
        let class = self.state.release(station);
        trace!(time = self.state.now, %class, %station, "service completed");
        let routing = self
            .topology
            .route(station, class)
            .expect("validated topology routes every reachable state");
        let destination = if routing.is_deterministic() {
            &routing.branches()[0].destination
        } else {
            routing.choose(self.routing_rng.gen())
        };

        let mut seated = SmallVec::new();
        seated.extend(self.state.admit(destination, class));
        seated.extend(self.state.seat_waiting(station));
        seated
    }

    /// Finish the run and build its report.
    pub(crate) fn into_report(self, outcome: RunOutcome) -> RunReport {
        let end_time = self.state.now;
        let totals = self.state.totals;
        match outcome {
            RunOutcome::Completed => debug!(
                strategy = %self.strategy,
                processed = totals.processed,
                rejected = totals.rejected,
                end_time,
                "simulation run completed"
            ),
            RunOutcome::Exhausted => warn!(
                strategy = %self.strategy,
                processed = totals.processed,
                rejected = totals.rejected,
                target = self.target,
                arrivals = self.arrivals,
                end_time,
                "event source exhausted before target"
            ),
        }

        let stations = self
            .topology
            .stations()
            .iter()
            .zip(&self.state.nodes)
            .map(|(spec, node)| {
                let busy_time = node.station.busy_time();
                StationReport {
                    name: spec.name.clone(),
                    started: node.station.started(),
                    completed: node.station.completed(),
                    busy_time,
                    utilisation: if end_time > 0.0 {
                        (busy_time / end_time).min(1.0)
                    } else {
                        0.0
                    },
                    peak_waiting: node.line.as_ref().map_or(0, WaitingLine::peak),
                }
            })
            .collect();

        RunReport {
            totals,
            outcome,
            strategy: self.strategy,
            end_time,
            arrivals: self.arrivals,
            stations,
            occupancy: self.state.trace,
        }
    }
}
