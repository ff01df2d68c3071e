//! Reusable topology fixtures.
//!
//! Small networks for engine and model tests:
//!
//! - [`single_server`]: one station, one class, straight to the exit.
//! - [`pipeline`]: stations in series, one class.
//! - [`converging`]: two classes with separate entry stations sharing a
//!   downstream queue.
//! - [`feedback`]: one queueing station whose completions re-circulate.
//! - [`loop_back`]: two stages in series; the second sends some items
//!   back to the first.

use queuenet_core::Variate;
use queuenet_network::{Admission, Destination, Routing, Topology};

/// One station with the given service and policy.
pub fn single_server(service: Variate, admission: Admission) -> Topology {
    let mut b = Topology::builder();
    let s = b.station("server", service, admission);
    b.class("jobs", 1.0, Destination::station(s));
    b.route(s, Routing::to(Destination::Exit));
    b.build().expect("single-server fixture is valid")
}

/// Stations `stage0 → stage1 → … → exit`, all with `admission`.
///
/// # Panics
///
/// Panics if `services` is empty.
pub fn pipeline(services: &[Variate], admission: Admission) -> Topology {
    assert!(!services.is_empty(), "pipeline needs at least one stage");
    let mut b = Topology::builder();
    let ids: Vec<_> = services
        .iter()
        .enumerate()
        .map(|(i, service)| b.station(format!("stage{i}"), *service, admission))
        .collect();
    b.class("jobs", 1.0, Destination::station(ids[0]));
    for pair in ids.windows(2) {
        b.route(pair[0], Routing::to(Destination::station(pair[1])));
    }
    b.route(ids[ids.len() - 1], Routing::to(Destination::Exit));
    b.build().expect("pipeline fixture is valid")
}

/// Classes `a` (probability `p_a`) and `b` enter at their own reject-policy
/// stations and then share one queueing station.
pub fn converging(p_a: f64, entry: Variate, shared: Variate) -> Topology {
    let mut b = Topology::builder();
    let entry_a = b.station("entry_a", entry, Admission::Reject);
    let entry_b = b.station("entry_b", entry, Admission::Reject);
    let common = b.station("shared", shared, Admission::Queue);
    b.class("a", p_a, Destination::station(entry_a));
    b.class("b", 1.0 - p_a, Destination::station(entry_b));
    b.route(entry_a, Routing::to(Destination::station(common)));
    b.route(entry_b, Routing::to(Destination::station(common)));
    b.route(common, Routing::to(Destination::Exit));
    b.build().expect("converging fixture is valid")
}

/// One queueing station; each completion returns to it with probability
/// `repeat`, otherwise exits.
///
/// # Panics
///
/// Panics if `repeat` is not in `[0, 1)`.
pub fn feedback(service: Variate, repeat: f64) -> Topology {
    assert!((0.0..1.0).contains(&repeat), "repeat must lie in [0, 1)");
    let mut b = Topology::builder();
    let s = b.station("server", service, Admission::Queue);
    b.class("jobs", 1.0, Destination::station(s));
    b.route(
        s,
        Routing::recirculate(repeat, Destination::station(s), Destination::Exit),
    );
    b.build().expect("feedback fixture is valid")
}

/// `stage0 → stage1`; each `stage1` completion returns to `stage0` with
/// probability `repeat`, otherwise exits. Both stages use `admission`.
///
/// # Panics
///
/// Panics if `repeat` is not in `[0, 1)`.
pub fn loop_back(first: Variate, second: Variate, repeat: f64, admission: Admission) -> Topology {
    assert!((0.0..1.0).contains(&repeat), "repeat must lie in [0, 1)");
    let mut b = Topology::builder();
    let s0 = b.station("stage0", first, admission);
    let s1 = b.station("stage1", second, admission);
    b.class("jobs", 1.0, Destination::station(s0));
    b.route(s0, Routing::to(Destination::station(s1)));
    b.route(
        s1,
        Routing::recirculate(repeat, Destination::station(s0), Destination::Exit),
    );
    b.build().expect("loop-back fixture is valid")
}
