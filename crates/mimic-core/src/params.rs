//! 参数集
//!
//! 挂载时解析一次、之后不可变的控制参数。

use crate::host::ParameterServer;
use crate::types::NewtonMeter;
use std::fmt;
use tracing::{debug, warn};

/// PID 增益
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    /// 比例增益
    pub kp: f64,
    /// 积分增益
    pub ki: f64,
    /// 微分增益
    pub kd: f64,
    /// 积分项对称限幅 `[-i_clamp, +i_clamp]`
    pub i_clamp: f64,
}

impl PidGains {
    pub const DEFAULT_P: f64 = 10.0;
    pub const DEFAULT_I: f64 = 0.1;
    pub const DEFAULT_D: f64 = 0.0;
    pub const DEFAULT_I_CLAMP: f64 = 0.2;

    /// 创建增益
    ///
    /// 积分限幅取绝对值，保证区间不反转。
    pub fn new(kp: f64, ki: f64, kd: f64, i_clamp: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            i_clamp: i_clamp.abs(),
        }
    }

    /// 在 `gains.<joint>` 参数空间中声明并解析四个增益
    pub fn declare(params: &mut dyn ParameterServer, joint: &str) -> Self {
        let prefix = format!("gains.{}", joint);
        let kp = params.declare_parameter(&format!("{}.p", prefix), Self::DEFAULT_P);
        let ki = params.declare_parameter(&format!("{}.i", prefix), Self::DEFAULT_I);
        let kd = params.declare_parameter(&format!("{}.d", prefix), Self::DEFAULT_D);
        let i_clamp =
            params.declare_parameter(&format!("{}.i_clamp", prefix), Self::DEFAULT_I_CLAMP);
        Self::new(kp, ki, kd, i_clamp)
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_P,
            Self::DEFAULT_I,
            Self::DEFAULT_D,
            Self::DEFAULT_I_CLAMP,
        )
    }
}

/// 已校验的参数集
///
/// # 默认值
///
/// - multiplier = 1.0
/// - offset = 0.0 rad
/// - deadband = 0.0 rad
/// - PID 关闭
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    master_joint: String,
    mimic_joint: String,
    multiplier: f64,
    offset: f64,
    deadband: f64,
    max_effort: NewtonMeter,
    pid: Option<PidGains>,
}

impl ParameterSet {
    /// 创建参数集
    ///
    /// `max_effort` 按配置值生效，0 表示不允许输出力矩。负值取绝对值，
    /// NaN 按 0 处理，保证限幅区间不会反转。
    pub fn new(
        master_joint: impl Into<String>,
        mimic_joint: impl Into<String>,
        max_effort: NewtonMeter,
    ) -> Self {
        ParameterSet {
            master_joint: master_joint.into(),
            mimic_joint: mimic_joint.into(),
            multiplier: 1.0,
            offset: 0.0,
            deadband: 0.0,
            max_effort: sanitize_effort(max_effort),
            pid: None,
        }
    }

    /// 设置倍率
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// 设置偏移（rad）
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// 设置死区（rad）
    ///
    /// 负值按 0 处理。
    pub fn with_deadband(mut self, deadband: f64) -> Self {
        self.deadband = if deadband >= 0.0 {
            deadband
        } else {
            warn!("Negative sensitiveness {} treated as 0.0", deadband);
            0.0
        };
        self
    }

    /// 启用 PID 力控
    pub fn with_pid(mut self, gains: PidGains) -> Self {
        self.pid = Some(gains);
        self
    }

    pub fn master_joint(&self) -> &str {
        &self.master_joint
    }

    pub fn mimic_joint(&self) -> &str {
        &self.mimic_joint
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn deadband(&self) -> f64 {
        self.deadband
    }

    pub fn max_effort(&self) -> NewtonMeter {
        self.max_effort
    }

    pub fn pid(&self) -> Option<PidGains> {
        self.pid
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Joint: \"{}\", Mimic joint: \"{}\", Multiplier: {}, Offset: {}, MaxEffort: {}, Sensitiveness: {}",
            self.master_joint,
            self.mimic_joint,
            self.multiplier,
            self.offset,
            self.max_effort.value(),
            self.deadband
        )?;
        if let Some(gains) = self.pid {
            write!(
                f,
                ", PID: (p={}, i={}, d={}, i_clamp={})",
                gains.kp, gains.ki, gains.kd, gains.i_clamp
            )?;
        }
        Ok(())
    }
}

fn sanitize_effort(effort: NewtonMeter) -> NewtonMeter {
    let value = effort.value();
    if value.is_nan() {
        warn!("Max effort is NaN, force output is disabled");
        NewtonMeter::ZERO
    } else if value < 0.0 {
        warn!("Negative max effort {} replaced by {}", value, -value);
        effort.abs()
    } else {
        effort
    }
}

/// 由关节力矩限制推导最大力矩
///
/// 宿主用非正的力矩限制表示"不限制"，此时返回 [`NewtonMeter::UNBOUNDED`]。
pub fn max_effort_from_limit(effort_limit: NewtonMeter) -> NewtonMeter {
    if effort_limit.value() > 0.0 {
        effort_limit
    } else {
        debug!(
            "Joint effort limit {} means unlimited, force output is left unbounded",
            effort_limit.value()
        );
        NewtonMeter::UNBOUNDED
    }
}
