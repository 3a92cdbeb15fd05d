use criterion::{black_box, criterion_group, criterion_main, Criterion};
use thermo_pid::{run, step, ControllerParameters, ControllerState};

fn benchmark_controller_step(c: &mut Criterion) {
    let params = ControllerParameters::new(75.0, 1.0, 0.1, 0.05);
    let state = ControllerState {
        previous_error: 3.0,
        integral_accumulator: 1.2,
    };
    c.bench_function("controller_step", |b| {
        b.iter(|| step(&params, black_box(72.0), state, 1.0))
    });
}

fn benchmark_full_run(c: &mut Criterion) {
    let params = ControllerParameters::new(100.0, 10.0, 1.0, 1.0);
    c.bench_function("simulate_200_steps", |b| {
        b.iter(|| run(black_box(params), 200, 1.0))
    });
}

criterion_group!(benches, benchmark_controller_step, benchmark_full_run);
criterion_main!(benches);
