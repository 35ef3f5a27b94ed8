//! 跟踪控制律的属性测试
//!
//! 使用 proptest 验证线性映射、死区、力矩上限与直驱精确性。

use mimic_core::prelude::*;
use proptest::prelude::*;
use std::time::Duration;

fn dt_strategy() -> impl Strategy<Value = Duration> {
    (1u64..20_000).prop_map(Duration::from_micros)
}

proptest! {
    /// 目标角度严格等于 master * multiplier + offset
    #[test]
    fn target_is_linear(
        master in -10.0..10.0f64,
        multiplier in -5.0..5.0f64,
        offset in -3.0..3.0f64,
    ) {
        let params = ParameterSet::new("m", "s", NewtonMeter(1.0))
            .with_multiplier(multiplier)
            .with_offset(offset);
        let tracker = TrackingController::new(params);
        prop_assert_eq!(tracker.target(Rad(master)), Rad(master * multiplier + offset));
    }

    /// 误差在死区内时不下发命令（两种模式都成立）
    #[test]
    fn deadband_withholds(
        master in -3.0..3.0f64,
        deadband in 0.001..1.0f64,
        fraction in -0.999..0.999f64,
        use_pid in any::<bool>(),
        dt in dt_strategy(),
    ) {
        let mut params = ParameterSet::new("m", "s", NewtonMeter(5.0)).with_deadband(deadband);
        if use_pid {
            params = params.with_pid(PidGains::default());
        }
        let mut tracker = TrackingController::new(params);

        let target = tracker.target(Rad(master));
        let mimic = target - Rad(deadband * fraction);
        prop_assume!((target - mimic).abs().value() < deadband);

        prop_assert_eq!(tracker.tick(dt, Rad(master), mimic), None);
    }

    /// 力控模式下任意误差序列的输出都在 ±max_effort 内
    #[test]
    fn force_commands_are_bounded(
        max_effort in 0.01..50.0f64,
        kp in 0.0..1000.0f64,
        ki in 0.0..100.0f64,
        kd in 0.0..10.0f64,
        i_clamp in 0.0..10.0f64,
        samples in prop::collection::vec((-5.0..5.0f64, -5.0..5.0f64), 1..50),
        dt in dt_strategy(),
    ) {
        let params = ParameterSet::new("m", "s", NewtonMeter(max_effort))
            .with_pid(PidGains::new(kp, ki, kd, i_clamp));
        let mut tracker = TrackingController::new(params);

        for (master, mimic) in samples {
            match tracker.tick(dt, Rad(master), Rad(mimic)) {
                Some(Command::Force(effort)) => {
                    prop_assert!(effort.value().abs() <= max_effort);
                },
                Some(Command::Position { .. }) => prop_assert!(false, "position command in PID mode"),
                None => {},
            }
        }
    }

    /// 直驱模式下命令精确等于目标角度，并带绕过限位标志
    #[test]
    fn direct_drive_is_exact(
        master in -10.0..10.0f64,
        mimic in -10.0..10.0f64,
        multiplier in -5.0..5.0f64,
        offset in -3.0..3.0f64,
        dt in dt_strategy(),
    ) {
        let params = ParameterSet::new("m", "s", NewtonMeter(1.0))
            .with_multiplier(multiplier)
            .with_offset(offset);
        let mut tracker = TrackingController::new(params);

        let expected = Rad(master * multiplier + offset);
        prop_assert_eq!(
            tracker.tick(dt, Rad(master), Rad(mimic)),
            Some(Command::Position { angle: expected, bypass_limits: true })
        );
    }
}

/// 未配置增益时按默认值 kp=10, ki=0.1, kd=0, i_clamp=0.2 工作
#[test]
fn default_gains_scenario() {
    let mut table = ParameterTable::new();
    let gains = PidGains::declare(&mut table, "drive_joint");
    let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(100.0)).with_pid(gains);
    let mut tracker = TrackingController::new(params);

    let dt = Duration::from_millis(1);
    let mut reference = PidController::new(PidGains::new(10.0, 0.1, 0.0, 0.2));

    for step in 0..100 {
        let master = Rad(0.5 + 0.01 * step as f64);
        let mimic = Rad(0.1);
        let error = (master - mimic).value();
        let expected = reference.compute_command(error, dt);
        assert_eq!(tracker.tick(dt, master, mimic), Some(Command::Force(expected)));
    }
}
