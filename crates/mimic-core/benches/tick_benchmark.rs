//! 跟踪控制律性能基准测试
//!
//! 每步控制律必须远低于仿真步长（亚毫秒），这里测量两种执行模式的单步耗时。

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mimic_core::prelude::*;
use std::time::Duration;

const DT: Duration = Duration::from_millis(1);

fn bench_direct_drive_tick(c: &mut Criterion) {
    let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(5.0))
        .with_multiplier(-1.0)
        .with_offset(0.1);
    let mut tracker = TrackingController::new(params);

    c.bench_function("tracker_direct_drive_tick", |b| {
        b.iter(|| black_box(tracker.tick(DT, black_box(Rad(0.4)), black_box(Rad(0.2)))))
    });
}

fn bench_force_controlled_tick(c: &mut Criterion) {
    let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(5.0))
        .with_deadband(0.001)
        .with_pid(PidGains::default());
    let mut tracker = TrackingController::new(params);

    c.bench_function("tracker_force_controlled_tick", |b| {
        b.iter(|| black_box(tracker.tick(DT, black_box(Rad(0.4)), black_box(Rad(0.2)))))
    });
}

fn bench_deadband_tick(c: &mut Criterion) {
    let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(5.0))
        .with_deadband(0.5)
        .with_pid(PidGains::default());
    let mut tracker = TrackingController::new(params);

    c.bench_function("tracker_deadband_tick", |b| {
        b.iter(|| black_box(tracker.tick(DT, black_box(Rad(0.4)), black_box(Rad(0.2)))))
    });
}

criterion_group!(
    benches,
    bench_direct_drive_tick,
    bench_force_controlled_tick,
    bench_deadband_tick
);
criterion_main!(benches);
