//! Event-driven strategy: the clock jumps from one scheduled event to the
//! next.

use tracing::trace;

use crate::context::{RunContext, Seated};
use crate::report::{RunOutcome, RunReport};
use crate::scheduler::{Event, EventKind, EventScheduler};

fn schedule_completion(scheduler: &mut EventScheduler, seated: Seated) {
    scheduler.insert(Event::completion(seated.finish, seated.station, seated.class));
}

/// Drive `ctx` until the target is reached or the scheduler runs dry.
pub(crate) fn run(mut ctx: RunContext) -> RunReport {
    let mut scheduler = EventScheduler::new();
    if let Some(time) = ctx.next_arrival_after(0.0) {
        scheduler.insert(Event::arrival(time));
    }

    let outcome = loop {
        if ctx.is_complete() {
            break RunOutcome::Completed;
        }
        let Some(event) = scheduler.pop_earliest() else {
            break RunOutcome::Exhausted;
        };
        ctx.advance_to(event.time);
        trace!(time = event.time, pending = scheduler.len(), "event");

        match event.kind {
            EventKind::Arrival => {
                if let Some(seated) = ctx.arrive() {
                    schedule_completion(&mut scheduler, seated);
                }
                if let Some(next) = ctx.next_arrival_after(event.time) {
                    scheduler.insert(Event::arrival(next));
                }
            }
            EventKind::Completion { station, .. } => {
                for seated in ctx.complete(station) {
                    schedule_completion(&mut scheduler, seated);
                }
            }
        }
    };

    ctx.into_report(outcome)
}
