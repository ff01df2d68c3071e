//! Criterion benchmarks comparing the two clock strategies.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use queuenet_bench::{reference_profile, stress_profile};
use queuenet_engine::{Simulation, Strategy};

fn bench_airport_event_driven(c: &mut Criterion) {
    c.bench_function("airport_10k_event_driven", |b| {
        b.iter(|| {
            let sim = Simulation::new(reference_profile(42, Strategy::EventDriven)).unwrap();
            black_box(sim.run());
        });
    });
}

fn bench_airport_fixed_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("airport_10k_fixed_step");
    group.sample_size(10);
    for step in [1.0, 0.1, 0.01] {
        group.bench_function(format!("step_{step}"), |b| {
            b.iter(|| {
                let sim =
                    Simulation::new(reference_profile(42, Strategy::FixedStep { step })).unwrap();
                black_box(sim.run());
            });
        });
    }
    group.finish();
}

fn bench_stress_event_driven(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("pipeline16_100k_event_driven", |b| {
        b.iter(|| {
            let sim = Simulation::new(stress_profile(42, Strategy::EventDriven)).unwrap();
            black_box(sim.run());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_airport_event_driven,
    bench_airport_fixed_step,
    bench_stress_event_driven
);
criterion_main!(benches);
