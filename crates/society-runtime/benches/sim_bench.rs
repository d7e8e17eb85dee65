use criterion::{black_box, criterion_group, criterion_main, Criterion};
use society_core::create_initial_world;
use society_runtime::{SimConfig, Simulation};

fn bench_days(c: &mut Criterion) {
    let sim = Simulation::from_config(&SimConfig::default()).unwrap();
    let world = create_initial_world();
    c.bench_function("run_day", |b| {
        b.iter(|| sim.step(black_box(world.clone())))
    });
    let warmed = sim.run(world, 365);
    c.bench_function("run_day_after_a_year", |b| {
        b.iter(|| sim.step(black_box(warmed.clone())))
    });
}

criterion_group!(benches, bench_days);
criterion_main!(benches);
