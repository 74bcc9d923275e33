use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;

use orrery::{Simulation, SolarSystem};

fn bench_gravity_field(c: &mut Criterion) {
    let sim = Simulation::new(SolarSystem::standard());

    c.bench_function("gravity_field_at", |b| {
        b.iter(|| sim.gravity_at(black_box(Point2::new(1.3, -2.7))))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut sim = Simulation::new(SolarSystem::standard());
    sim.start();

    c.bench_function("simulation_tick", |b| {
        b.iter(|| sim.tick(black_box(16.6)))
    });
}

criterion_group!(benches, bench_gravity_field, bench_tick);
criterion_main!(benches);
