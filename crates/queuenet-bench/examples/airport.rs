//! Airport model under both clock strategies.
//!
//! Demonstrates: build the reference airport → run event-driven → run
//! fixed-step at shrinking steps → compare rejection probabilities.
//!
//! Set `RUST_LOG=queuenet_engine=debug` to see run start/finish logs.

use queuenet_engine::{Simulation, Strategy};
use queuenet_models::Airport;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== queuenet airport example ===\n");

    let model = Airport::default();
    let config = model.config().unwrap().with_seed(42);

    let event = Simulation::new(config.clone()).unwrap().run();
    println!(
        "{:<18} processed {:>4}  rejected {:>4}  P(reject) {:.4}",
        event.strategy.to_string(),
        event.processed(),
        event.rejected(),
        event.rejection_probability()
    );

    for step in [1.0, 0.1, 0.01] {
        let report = Simulation::new(config.clone().with_strategy(Strategy::FixedStep { step }))
            .unwrap()
            .run();
        println!(
            "{:<18} processed {:>4}  rejected {:>4}  P(reject) {:.4}",
            report.strategy.to_string(),
            report.processed(),
            report.rejected(),
            report.rejection_probability()
        );
    }

    println!("\nPer-station (event-driven):");
    for station in &event.stations {
        println!(
            "  {:<20} served {:>4}  utilisation {:.2}  peak line {}",
            station.name, station.completed, station.utilisation, station.peak_waiting
        );
    }
}
