use std::time::Duration;

use anima::camera::{paths, CameraPathAnimator};
use anima::easing::Easing;
use anima::particles::{effects, ParticleSystem};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use web_time::Instant;

fn easing_benchmark(c: &mut Criterion) {
    let f = Easing::EaseInOutCubic;
    let _ = c.bench_function("ease_in_out_cubic", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn camera_path_benchmark(c: &mut Criterion) {
    let mut animator = CameraPathAnimator::new(paths::spiral(
        Vec3::ZERO,
        4.0,
        Duration::from_millis(4000),
    ));
    animator.start(Instant::now());

    let _ = c.bench_function("spiral_camera_update", |b| {
        b.iter(|| black_box(animator.update(Instant::now())))
    });
}

fn particle_update_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_update");

    for effect in [
        effects::trail(),
        effects::spark(),
        effects::flow(),
        effects::connection(),
    ] {
        let name = format!("{:?}_{}", effect.kind, effect.count);
        let mut system = ParticleSystem::new(effect);
        system.start(Instant::now(), Duration::from_millis(60_000));

        let _ = group.bench_function(name, |b| {
            b.iter(|| black_box(system.update(Instant::now())))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    camera_path_benchmark,
    particle_update_benchmark
);
criterion_main!(benches);
