//! PID Controller - 比例-积分-微分控制器
//!
//! 单关节标量 PID，用于力控模式下的从动关节。
//!
//! # 算法
//!
//! ```text
//! I      += e * dt
//! output  = Kp * e + clamp(Ki * I, ±i_clamp) + Kd * (e - e_prev) / dt
//! ```
//!
//! # 特性
//!
//! - **积分饱和保护**: 累积值被限制在 `±i_clamp / |Ki|`，积分项输出不超过 `±i_clamp`
//! - **状态持久**: 控制器没有复位路径，积分与上次误差在整个生命周期内保留
//! - **原始输出**: 不做总输出限幅，由调用方按 `max_effort` 钳位
//!
//! # 示例
//!
//! ```rust
//! use mimic_core::control::PidController;
//! use mimic_core::params::PidGains;
//! use std::time::Duration;
//!
//! let mut pid = PidController::new(PidGains::new(10.0, 0.0, 0.0, 0.2));
//! let output = pid.compute_command(0.5, Duration::from_millis(1));
//! assert!((output.0 - 5.0).abs() < 1e-12);
//! ```

use crate::params::PidGains;
use crate::types::NewtonMeter;
use std::time::Duration;

/// PID 控制器
#[derive(Debug, Clone)]
pub struct PidController {
    gains: PidGains,

    /// 积分项累积值（∫e dt）
    integral: f64,

    /// 上一次的误差（用于计算微分）
    last_error: f64,
}

impl PidController {
    /// 创建新的 PID 控制器，初始积分与上次误差均为 0
    pub fn new(gains: PidGains) -> Self {
        PidController {
            gains,
            integral: 0.0,
            last_error: 0.0,
        }
    }

    /// 当前增益
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// 当前积分累积值
    ///
    /// 用于调试和监控。
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// 上一次的误差
    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    /// 根据误差和时间步长计算一步输出
    ///
    /// `dt <= 0` 或误差非有限时返回零输出，内部状态保持不变。
    pub fn compute_command(&mut self, error: f64, dt: Duration) -> NewtonMeter {
        let dt_sec = dt.as_secs_f64();

        if dt_sec <= 0.0 || !error.is_finite() {
            tracing::warn!(
                "PID controller received dt {:?} / error {}, returning zero output",
                dt,
                error
            );
            return NewtonMeter::ZERO;
        }

        let PidGains { kp, ki, kd, i_clamp } = self.gains;

        // 比例项（P）
        let p_term = kp * error;

        // 积分项（I）+ 饱和保护
        self.integral += error * dt_sec;
        let i_term = if ki != 0.0 {
            let bound = i_clamp / ki.abs();
            self.integral = self.integral.clamp(-bound, bound);
            (ki * self.integral).clamp(-i_clamp, i_clamp)
        } else {
            0.0
        };

        // 微分项（D）
        let d_term = kd * (error - self.last_error) / dt_sec;
        self.last_error = error;

        NewtonMeter(p_term + i_term + d_term)
    }
}
