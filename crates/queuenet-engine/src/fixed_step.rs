//! Fixed-step strategy: the clock advances by a constant step and every
//! threshold crossed by the step is applied at the new clock value.
//!
//! There are no event objects. The pending thresholds are the next arrival
//! time and each busy station's finish time. Within one tick they are
//! applied earliest first; a completion and an arrival on the same
//! threshold apply completion first, so freed capacity is visible to the
//! arrival. The next arrival is accumulated from the previous arrival
//! threshold, not from the clock, so the arrival rate does not depend on
//! the step.

use crate::context::RunContext;
use crate::report::{RunOutcome, RunReport};

/// Drive `ctx` with clock increment `step` until the target is reached or
/// nothing is left to happen.
pub(crate) fn run(mut ctx: RunContext, step: f64) -> RunReport {
    let mut next_arrival = ctx.next_arrival_after(0.0);
    let mut ticks: u64 = 0;

    let outcome = 'run: loop {
        if ctx.is_complete() {
            break RunOutcome::Completed;
        }
        if next_arrival.is_none() && ctx.all_idle() {
            break RunOutcome::Exhausted;
        }

        // Multiplying avoids the drift of repeated `now += step`.
        ticks += 1;
        let now = ticks as f64 * step;
        ctx.advance_to(now);

        loop {
            let arrival = next_arrival.filter(|&t| t <= now);
            let completion = ctx.earliest_finish().filter(|&(_, t)| t <= now);
            match (arrival, completion) {
                (None, None) => break,
                (Some(a), Some((station, f))) if f <= a => {
                    ctx.complete(station);
                }
                (Some(a), _) => {
                    ctx.arrive();
                    next_arrival = ctx.next_arrival_after(a);
                }
                (None, Some((station, _))) => {
                    ctx.complete(station);
                }
            }
            if ctx.is_complete() {
                break 'run RunOutcome::Completed;
            }
        }
    };

    ctx.into_report(outcome)
}
