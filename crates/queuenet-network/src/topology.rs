//! Static network description: stations, work-item classes, and routes.
//!
//! A [`Topology`] is assembled with a [`TopologyBuilder`] and validated
//! once in [`build()`](TopologyBuilder::build). A `Topology` that exists
//! is therefore always runnable: every referenced station exists, every
//! probability set sums to one, every station some class can reach has a
//! route out for that class, and every reachable item can eventually hit
//! an [`Destination::Exit`] or [`Destination::Reject`].
//!
//! # Routing
//!
//! Routes are keyed by `(station, class)`. A class-specific route wins
//! over the station's any-class route. Each route is a list of
//! probability-weighted [`Branch`]es; a branch leading back to the same
//! or an earlier station models re-circulation.
//!
//! A [`Destination::Stations`] pool seats the item at the first free
//! member in listed order.

use indexmap::IndexMap;
use queuenet_core::{ClassId, StationId, Variate};
use smallvec::{smallvec, SmallVec};

use crate::error::TopologyError;
use crate::station::Admission;

/// Tolerance when checking that a probability set sums to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Where an item goes next.
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    /// Leave the network; the item counts as processed.
    Exit,
    /// Drop the item; it counts as rejected.
    Reject,
    /// Seat at the first free station of the pool, in listed order.
    Stations(SmallVec<[StationId; 4]>),
}

impl Destination {
    /// A single-station destination.
    pub fn station(id: StationId) -> Self {
        Self::Stations(smallvec![id])
    }

    /// A pool of interchangeable stations.
    pub fn pool<I: IntoIterator<Item = StationId>>(ids: I) -> Self {
        Self::Stations(ids.into_iter().collect())
    }

    /// The stations this destination can seat an item at (empty for
    /// `Exit` and `Reject`).
    pub fn stations(&self) -> &[StationId] {
        match self {
            Self::Stations(ids) => ids,
            Self::Exit | Self::Reject => &[],
        }
    }

    /// Whether this destination ends the item's life.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exit | Self::Reject)
    }
}

/// One probability-weighted outcome of a completion.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Probability of taking this branch.
    pub probability: f64,
    /// Where the item goes on this branch.
    pub destination: Destination,
}

/// The outcomes of a completion at one station.
#[derive(Clone, Debug, PartialEq)]
pub struct Routing {
    branches: SmallVec<[Branch; 2]>,
}

impl Routing {
    /// Always go to `destination`.
    pub fn to(destination: Destination) -> Self {
        Self {
            branches: smallvec![Branch {
                probability: 1.0,
                destination,
            }],
        }
    }

    /// Weighted split over several destinations.
    pub fn split<I: IntoIterator<Item = (f64, Destination)>>(branches: I) -> Self {
        Self {
            branches: branches
                .into_iter()
                .map(|(probability, destination)| Branch {
                    probability,
                    destination,
                })
                .collect(),
        }
    }

    /// With `probability` send the item back to `back`, otherwise to `onward`.
    pub fn recirculate(probability: f64, back: Destination, onward: Destination) -> Self {
        Self::split([(probability, back), (1.0 - probability, onward)])
    }

    /// The branches in declaration order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Whether a single branch makes the outcome certain (no draw needed).
    pub fn is_deterministic(&self) -> bool {
        self.branches.len() == 1
    }

    /// Pick a branch given a unit draw `u` in `[0, 1)`.
    ///
    /// Walks cumulative probabilities in declaration order. A draw past the
    /// cumulative total (possible only through rounding) lands on the last
    /// branch with positive probability.
    pub fn choose(&self, u: f64) -> &Destination {
        let mut cumulative = 0.0;
        for branch in &self.branches {
            cumulative += branch.probability;
            if u < cumulative {
                return &branch.destination;
            }
        }
        let last = &self.branches[self.branches.len() - 1];
        &self
            .branches
            .iter()
            .rev()
            .find(|b| b.probability > 0.0)
            .unwrap_or(last)
            .destination
    }
}

/// Key for the route table.
///
/// `class: None` is the station's any-class route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// The station whose completions are routed.
    pub station: StationId,
    /// The class the route applies to, or `None` for every class.
    pub class: Option<ClassId>,
}

/// A station declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct StationSpec {
    /// Unique display name.
    pub name: String,
    /// Service-time distribution.
    pub service: Variate,
    /// Behaviour when busy.
    pub admission: Admission,
}

/// A work-item class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassSpec {
    /// Unique display name.
    pub name: String,
    /// Probability that an arrival belongs to this class.
    pub probability: f64,
    /// Where arrivals of this class enter.
    pub entry: Destination,
}

/// Incremental constructor for a [`Topology`].
#[derive(Clone, Debug, Default)]
pub struct TopologyBuilder {
    stations: Vec<StationSpec>,
    classes: Vec<ClassSpec>,
    routes: IndexMap<RouteKey, Routing>,
}

impl TopologyBuilder {
    /// Declare a station and return its identifier.
    pub fn station(
        &mut self,
        name: impl Into<String>,
        service: Variate,
        admission: Admission,
    ) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(StationSpec {
            name: name.into(),
            service,
            admission,
        });
        id
    }

    /// Declare a work-item class and return its identifier.
    pub fn class(
        &mut self,
        name: impl Into<String>,
        probability: f64,
        entry: Destination,
    ) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassSpec {
            name: name.into(),
            probability,
            entry,
        });
        id
    }

    /// Set the any-class route for completions at `station`.
    pub fn route(&mut self, station: StationId, routing: Routing) -> &mut Self {
        self.routes.insert(
            RouteKey {
                station,
                class: None,
            },
            routing,
        );
        self
    }

    /// Set the route for completions of `class` at `station`.
    pub fn route_class(
        &mut self,
        station: StationId,
        class: ClassId,
        routing: Routing,
    ) -> &mut Self {
        self.routes.insert(
            RouteKey {
                station,
                class: Some(class),
            },
            routing,
        );
        self
    }

    /// Validate and freeze the topology.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found. Structural checks
    /// (names, identifiers, probabilities) run before the reachability
    /// analysis, which assumes a well-formed route table.
    pub fn build(self) -> Result<Topology, TopologyError> {
        if self.stations.is_empty() {
            return Err(TopologyError::NoStations);
        }
        if self.classes.is_empty() {
            return Err(TopologyError::NoClasses);
        }

        let mut station_names = IndexMap::with_capacity(self.stations.len());
        for (i, s) in self.stations.iter().enumerate() {
            if station_names
                .insert(s.name.clone(), StationId(i as u32))
                .is_some()
            {
                return Err(TopologyError::DuplicateStation {
                    name: s.name.clone(),
                });
            }
        }
        let mut class_names = IndexMap::with_capacity(self.classes.len());
        for (i, c) in self.classes.iter().enumerate() {
            if class_names.insert(c.name.clone(), ClassId(i as u32)).is_some() {
                return Err(TopologyError::DuplicateClass {
                    name: c.name.clone(),
                });
            }
        }

        let mut class_sum = 0.0;
        for c in &self.classes {
            let context = format!("class '{}'", c.name);
            check_probability(&context, c.probability)?;
            class_sum += c.probability;
            self.check_destination(&format!("{context} entry"), &c.entry)?;
        }
        if (class_sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(TopologyError::ClassProbabilitySum { sum: class_sum });
        }

        for (key, routing) in &self.routes {
            let station = self
                .stations
                .get(key.station.index())
                .ok_or(TopologyError::UnknownStation {
                    station: key.station,
                })?;
            let context = match key.class {
                Some(class) => {
                    let c = self
                        .classes
                        .get(class.index())
                        .ok_or(TopologyError::UnknownClass { class })?;
                    format!("route from '{}' for class '{}'", station.name, c.name)
                }
                None => format!("route from '{}'", station.name),
            };
            if routing.branches.is_empty() {
                return Err(TopologyError::EmptyRouting {
                    station: station.name.clone(),
                });
            }
            let mut sum = 0.0;
            for branch in &routing.branches {
                check_probability(&context, branch.probability)?;
                sum += branch.probability;
                self.check_destination(&context, &branch.destination)?;
            }
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(TopologyError::BranchProbabilitySum { context, sum });
            }
        }

        let reached = self.reachability()?;
        let n_classes = self.classes.len();

        let mut reaching: Vec<SmallVec<[ClassId; 4]>> = vec![SmallVec::new(); self.stations.len()];
        for (s, classes) in reaching.iter_mut().enumerate() {
            for c in 0..n_classes {
                if reached[s * n_classes + c] {
                    classes.push(ClassId(c as u32));
                }
            }
            if classes.is_empty() {
                return Err(TopologyError::UnreachableStation {
                    station: self.stations[s].name.clone(),
                });
            }
        }

        self.check_escape(&reached)?;

        Ok(Topology {
            stations: self.stations,
            classes: self.classes,
            routes: self.routes,
            station_names,
            class_names,
            reaching,
        })
    }

    fn lookup(&self, station: StationId, class: ClassId) -> Option<&Routing> {
        lookup_route(&self.routes, station, class)
    }

    fn check_destination(&self, context: &str, dest: &Destination) -> Result<(), TopologyError> {
        let Destination::Stations(ids) = dest else {
            return Ok(());
        };
        let Some(first) = ids.first() else {
            return Err(TopologyError::EmptyPool {
                context: context.to_string(),
            });
        };
        for id in ids {
            if id.index() >= self.stations.len() {
                return Err(TopologyError::UnknownStation { station: *id });
            }
        }
        let admission = self.stations[first.index()].admission;
        if ids
            .iter()
            .any(|id| self.stations[id.index()].admission != admission)
        {
            return Err(TopologyError::MixedPoolAdmission {
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Flags every `(station, class)` state reachable from a class entry.
    /// Indexed `station * n_classes + class`.
    fn reachability(&self) -> Result<Vec<bool>, TopologyError> {
        let n_classes = self.classes.len();
        let mut reached = vec![false; self.stations.len() * n_classes];
        let mut stack: Vec<(StationId, ClassId)> = Vec::new();

        for (c, spec) in self.classes.iter().enumerate() {
            for &s in spec.entry.stations() {
                stack.push((s, ClassId(c as u32)));
            }
        }

        while let Some((station, class)) = stack.pop() {
            let slot = station.index() * n_classes + class.index();
            if reached[slot] {
                continue;
            }
            reached[slot] = true;
            let routing =
                self.lookup(station, class)
                    .ok_or_else(|| TopologyError::MissingRoute {
                        station: self.stations[station.index()].name.clone(),
                        class: self.classes[class.index()].name.clone(),
                    })?;
            for branch in routing.branches.iter().filter(|b| b.probability > 0.0) {
                for &next in branch.destination.stations() {
                    if !reached[next.index() * n_classes + class.index()] {
                        stack.push((next, class));
                    }
                }
            }
        }
        Ok(reached)
    }

    /// Every reached state must have a positive-probability path to a
    /// terminal destination.
    fn check_escape(&self, reached: &[bool]) -> Result<(), TopologyError> {
        let n_classes = self.classes.len();
        let mut escapes = vec![false; reached.len()];
        let mut changed = true;
        while changed {
            changed = false;
            for slot in 0..reached.len() {
                if !reached[slot] || escapes[slot] {
                    continue;
                }
                let station = StationId((slot / n_classes) as u32);
                let class = ClassId((slot % n_classes) as u32);
                let Some(routing) = self.lookup(station, class) else {
                    continue;
                };
                let escaped = routing
                    .branches
                    .iter()
                    .filter(|b| b.probability > 0.0)
                    .any(|b| {
                        b.destination.is_terminal()
                            || b.destination
                                .stations()
                                .iter()
                                .any(|next| escapes[next.index() * n_classes + class.index()])
                    });
                if escaped {
                    escapes[slot] = true;
                    changed = true;
                }
            }
        }

        match (0..reached.len()).find(|&slot| reached[slot] && !escapes[slot]) {
            Some(slot) => Err(TopologyError::ClosedCycle {
                station: self.stations[slot / n_classes].name.clone(),
                class: self.classes[slot % n_classes].name.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn check_probability(context: &str, value: f64) -> Result<(), TopologyError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(TopologyError::InvalidProbability {
            context: context.to_string(),
            value,
        });
    }
    Ok(())
}

fn lookup_route(
    routes: &IndexMap<RouteKey, Routing>,
    station: StationId,
    class: ClassId,
) -> Option<&Routing> {
    routes
        .get(&RouteKey {
            station,
            class: Some(class),
        })
        .or_else(|| {
            routes.get(&RouteKey {
                station,
                class: None,
            })
        })
}

/// A validated queueing network.
#[derive(Clone, Debug)]
pub struct Topology {
    stations: Vec<StationSpec>,
    classes: Vec<ClassSpec>,
    routes: IndexMap<RouteKey, Routing>,
    station_names: IndexMap<String, StationId>,
    class_names: IndexMap<String, ClassId>,
    reaching: Vec<SmallVec<[ClassId; 4]>>,
}

impl Topology {
    /// Start building a topology.
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// All stations, indexed by [`StationId`].
    pub fn stations(&self) -> &[StationSpec] {
        &self.stations
    }

    /// One station's declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this topology.
    pub fn station(&self, id: StationId) -> &StationSpec {
        &self.stations[id.index()]
    }

    /// All classes, indexed by [`ClassId`].
    pub fn classes(&self) -> &[ClassSpec] {
        &self.classes
    }

    /// One class's declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this topology.
    pub fn class(&self, id: ClassId) -> &ClassSpec {
        &self.classes[id.index()]
    }

    /// Look up a station by name.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.station_names.get(name).copied()
    }

    /// Look up a class by name.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// The route followed by `class` after completing at `station`.
    ///
    /// Always `Some` for states some class entry can reach.
    pub fn route(&self, station: StationId, class: ClassId) -> Option<&Routing> {
        lookup_route(&self.routes, station, class)
    }

    /// Classes that can ever be seated at `station`, in id order.
    pub fn classes_reaching(&self, station: StationId) -> &[ClassId] {
        &self.reaching[station.index()]
    }

    /// Whether a class draw is needed (more than one class).
    pub fn has_class_choice(&self) -> bool {
        self.classes.len() > 1
    }

    /// Pick a class given a unit draw `u` in `[0, 1)`, walking cumulative
    /// probabilities in declaration order.
    pub fn choose_class(&self, u: f64) -> ClassId {
        let mut cumulative = 0.0;
        for (i, class) in self.classes.iter().enumerate() {
            cumulative += class.probability;
            if u < cumulative {
                return ClassId(i as u32);
            }
        }
        let last = self
            .classes
            .iter()
            .rposition(|c| c.probability > 0.0)
            .unwrap_or(self.classes.len() - 1);
        ClassId(last as u32)
    }
}
