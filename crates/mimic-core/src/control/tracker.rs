//! Tracking Controller - 每步跟踪控制律
//!
//! 每个仿真步执行一次：
//!
//! 1. `target = master * multiplier + offset`
//! 2. `error = target - mimic`
//! 3. `|error| < deadband` 时不下发命令
//! 4. 力控模式：PID 输出钳位到 `±max_effort` 后下发力矩
//! 5. 直驱模式：以 `bypass_limits = true` 下发目标位置
//!
//! 控制律本身是纯计算，不接触宿主；命令由调用方通过 [`Command::apply`]
//! 写入执行器。
//!
//! # 示例
//!
//! ```rust
//! use mimic_core::control::{Command, TrackingController};
//! use mimic_core::params::ParameterSet;
//! use mimic_core::types::{NewtonMeter, Rad};
//! use std::time::Duration;
//!
//! let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(5.0))
//!     .with_multiplier(2.0)
//!     .with_offset(-0.5);
//! let mut tracker = TrackingController::new(params);
//!
//! let command = tracker.tick(Duration::from_millis(1), Rad(1.0), Rad(0.0));
//! assert_eq!(
//!     command,
//!     Some(Command::Position { angle: Rad(1.5), bypass_limits: true })
//! );
//! ```

use super::pid::PidController;
use crate::host::Actuator;
use crate::params::ParameterSet;
use crate::types::{NewtonMeter, Rad};
use std::time::Duration;

/// 单步输出命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// 绝对位置命令
    Position {
        angle: Rad,
        /// 立即生效并绕过软限位
        bypass_limits: bool,
    },

    /// 力矩命令（已钳位）
    Force(NewtonMeter),
}

impl Command {
    /// 写入执行器
    pub fn apply<A: Actuator + ?Sized>(self, actuator: &mut A) {
        match self {
            Command::Position {
                angle,
                bypass_limits,
            } => actuator.set_position(angle, bypass_limits),
            Command::Force(effort) => actuator.set_force(effort),
        }
    }
}

/// 执行模式
#[derive(Debug, Clone)]
pub enum ActuationMode {
    /// 直驱：运动学位置覆盖
    DirectDrive,

    /// 力控：PID 计算力矩
    ForceControlled { pid: PidController },
}

impl ActuationMode {
    /// 是否为力控模式
    pub fn is_force_controlled(&self) -> bool {
        matches!(self, ActuationMode::ForceControlled { .. })
    }
}

/// 跟踪控制器
#[derive(Debug, Clone)]
pub struct TrackingController {
    params: ParameterSet,
    mode: ActuationMode,
}

impl TrackingController {
    /// 根据参数集创建控制器
    ///
    /// 参数集带 PID 增益时进入力控模式，否则为直驱模式。
    pub fn new(params: ParameterSet) -> Self {
        let mode = match params.pid() {
            Some(gains) => ActuationMode::ForceControlled {
                pid: PidController::new(gains),
            },
            None => ActuationMode::DirectDrive,
        };
        TrackingController { params, mode }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn mode(&self) -> &ActuationMode {
        &self.mode
    }

    /// 由主关节角度计算目标角度
    #[inline]
    pub fn target(&self, master_angle: Rad) -> Rad {
        master_angle * self.params.multiplier() + Rad(self.params.offset())
    }

    /// 执行一步控制律
    ///
    /// 返回 `None` 表示误差在死区内，本步不下发命令（PID 状态不变）。
    pub fn tick(&mut self, dt: Duration, master_angle: Rad, mimic_angle: Rad) -> Option<Command> {
        let target = self.target(master_angle);
        let error = target - mimic_angle;

        if error.abs().value() < self.params.deadband() {
            return None;
        }

        let command = match &mut self.mode {
            ActuationMode::ForceControlled { pid } => {
                let raw = pid.compute_command(error.value(), dt);
                Command::Force(raw.clamp_symmetric(self.params.max_effort()))
            },
            ActuationMode::DirectDrive => Command::Position {
                angle: target,
                bypass_limits: true,
            },
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PidGains;

    const DT: Duration = Duration::from_millis(1);

    #[derive(Default)]
    struct RecordingActuator {
        forces: Vec<NewtonMeter>,
        positions: Vec<(Rad, bool)>,
    }

    impl Actuator for RecordingActuator {
        fn set_force(&mut self, effort: NewtonMeter) {
            self.forces.push(effort);
        }

        fn set_position(&mut self, angle: Rad, bypass_limits: bool) {
            self.positions.push((angle, bypass_limits));
        }

        fn set_max_force(&mut self, _effort: NewtonMeter) {}

        fn effort_limit(&self) -> NewtonMeter {
            NewtonMeter(1.0)
        }
    }

    fn direct(multiplier: f64, offset: f64, deadband: f64) -> TrackingController {
        TrackingController::new(
            ParameterSet::new("master", "mimic", NewtonMeter(5.0))
                .with_multiplier(multiplier)
                .with_offset(offset)
                .with_deadband(deadband),
        )
    }

    #[test]
    fn test_mode_selection() {
        assert!(!direct(1.0, 0.0, 0.0).mode().is_force_controlled());

        let tracker = TrackingController::new(
            ParameterSet::new("master", "mimic", NewtonMeter(5.0)).with_pid(PidGains::default()),
        );
        assert!(tracker.mode().is_force_controlled());
    }

    #[test]
    fn test_target_linear_map() {
        let tracker = direct(2.0, -0.5, 0.0);
        assert_eq!(tracker.target(Rad(1.0)), Rad(1.5));
        assert_eq!(tracker.target(Rad(0.0)), Rad(-0.5));
        assert_eq!(tracker.target(Rad(-1.0)), Rad(-2.5));
    }

    #[test]
    fn test_direct_drive_issues_target() {
        let mut tracker = direct(-1.0, 0.1, 0.0);
        let command = tracker.tick(DT, Rad(0.4), Rad(0.0));
        assert_eq!(
            command,
            Some(Command::Position {
                angle: Rad(-0.4 + 0.1),
                bypass_limits: true,
            })
        );
    }

    #[test]
    fn test_deadband_withholds_command() {
        let mut tracker = direct(1.0, 0.0, 0.05);
        assert_eq!(tracker.tick(DT, Rad(1.0), Rad(0.96)), None);
        assert_eq!(tracker.tick(DT, Rad(1.0), Rad(1.04)), None);
        assert!(tracker.tick(DT, Rad(1.0), Rad(0.9)).is_some());
    }

    #[test]
    fn test_deadband_boundary_actuates() {
        // |error| == deadband 时下发命令（严格小于才抑制）
        let mut tracker = direct(1.0, 0.0, 0.5);
        assert!(tracker.tick(DT, Rad(1.0), Rad(0.5)).is_some());
    }

    #[test]
    fn test_equilibrium_with_zero_deadband_actuates() {
        // master=1.0, multiplier=2.0, offset=-0.5 -> target=1.5, error=0
        let mut tracker = direct(2.0, -0.5, 0.0);
        let command = tracker.tick(DT, Rad(1.0), Rad(1.5));
        assert_eq!(
            command,
            Some(Command::Position {
                angle: Rad(1.5),
                bypass_limits: true,
            })
        );
    }

    #[test]
    fn test_force_command_clamped() {
        let mut tracker = TrackingController::new(
            ParameterSet::new("master", "mimic", NewtonMeter(2.0))
                .with_pid(PidGains::new(100.0, 0.0, 0.0, 0.0)),
        );

        assert_eq!(
            tracker.tick(DT, Rad(1.0), Rad(0.0)),
            Some(Command::Force(NewtonMeter(2.0)))
        );
        assert_eq!(
            tracker.tick(DT, Rad(-1.0), Rad(0.0)),
            Some(Command::Force(NewtonMeter(-2.0)))
        );

        // 未饱和时原样输出
        match tracker.tick(DT, Rad(0.01), Rad(0.0)) {
            Some(Command::Force(effort)) => assert!((effort.0 - 1.0).abs() < 1e-9),
            other => panic!("expected force command, got {:?}", other),
        }
    }

    #[test]
    fn test_deadband_leaves_pid_state_untouched() {
        let mut tracker = TrackingController::new(
            ParameterSet::new("master", "mimic", NewtonMeter(10.0))
                .with_deadband(0.1)
                .with_pid(PidGains::default()),
        );

        tracker.tick(DT, Rad(1.0), Rad(0.0));
        let (integral, last_error) = match tracker.mode() {
            ActuationMode::ForceControlled { pid } => (pid.integral(), pid.last_error()),
            ActuationMode::DirectDrive => unreachable!(),
        };

        assert_eq!(tracker.tick(DT, Rad(1.0), Rad(0.95)), None);
        match tracker.mode() {
            ActuationMode::ForceControlled { pid } => {
                assert_eq!(pid.integral(), integral);
                assert_eq!(pid.last_error(), last_error);
            },
            ActuationMode::DirectDrive => unreachable!(),
        }
    }

    #[test]
    fn test_command_apply() {
        let mut actuator = RecordingActuator::default();

        Command::Force(NewtonMeter(1.5)).apply(&mut actuator);
        Command::Position {
            angle: Rad(0.3),
            bypass_limits: true,
        }
        .apply(&mut actuator);

        assert_eq!(actuator.forces, vec![NewtonMeter(1.5)]);
        assert_eq!(actuator.positions, vec![(Rad(0.3), true)]);
    }
}
