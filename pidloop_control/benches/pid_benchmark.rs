//! `run_pid` micro-benchmark.
//!
//! Measures single-cycle throughput of the three evaluation paths:
//! - full automatic P+I+D evaluation with an oscillating error
//! - manual-mode tieback pass-through
//! - rate-limited replay (elapsed time below the minimum interval)

use criterion::{Criterion, criterion_group, criterion_main};

use pidloop_common::cells::ProcessImage;
use pidloop_common::params::{Gains, Limits, PidConfig};
use pidloop_control::pid::BasePid;

const STEP_US: u64 = 1_000; // 1 kHz effective sample rate

fn reference_config() -> PidConfig {
    PidConfig {
        gains: Gains {
            kp: 120.0,
            ki: 15.0,
            kd: 0.8,
        },
        co_limits: Limits::new(-100.0, 100.0),
        manual: false,
        ..Default::default()
    }
}

fn bench_run_pid_auto(c: &mut Criterion) {
    let image = ProcessImage::default();
    let mut pid = BasePid::from_config(
        &image.pv,
        &image.sp,
        &image.co,
        Some(&image.tb),
        &reference_config(),
    );
    let mut cycle = 0u64;

    c.bench_function("run_pid_auto", |b| {
        b.iter(|| {
            cycle += 1;
            let t = cycle as f32 * 1.0e-3;
            image.pv.set(0.05 * t.sin()); // oscillating error
            pid.run_pid(cycle * STEP_US)
        });
    });
}

fn bench_run_pid_manual(c: &mut Criterion) {
    let image = ProcessImage::default();
    let config = PidConfig {
        manual: true,
        ..reference_config()
    };
    let mut pid = BasePid::from_config(
        &image.pv,
        &image.sp,
        &image.co,
        Some(&image.tb),
        &config,
    );
    let mut cycle = 0u64;

    c.bench_function("run_pid_manual", |b| {
        b.iter(|| {
            cycle += 1;
            let t = cycle as f32 * 1.0e-3;
            image.tb.set(50.0 * t.cos());
            pid.run_pid(cycle * STEP_US)
        });
    });
}

fn bench_run_pid_rate_limited(c: &mut Criterion) {
    let image = ProcessImage::default();
    let mut pid = BasePid::from_config(
        &image.pv,
        &image.sp,
        &image.co,
        Some(&image.tb),
        &reference_config(),
    );

    // One effective evaluation, then hold the clock: every further call
    // takes the replay path.
    pid.run_pid(STEP_US).unwrap();

    c.bench_function("run_pid_rate_limited", |b| {
        b.iter(|| pid.run_pid(STEP_US));
    });
}

criterion_group!(
    benches,
    bench_run_pid_auto,
    bench_run_pid_manual,
    bench_run_pid_rate_limited,
);
criterion_main!(benches);
