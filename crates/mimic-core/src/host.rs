//! 宿主能力接口
//!
//! 控制核心不直接持有仿真器的关节对象，而是依赖下面几个窄接口。
//! 宿主适配层（或测试替身，见 `mimic-sim`）负责实现它们。
//!
//! | Trait | 能力 |
//! |-------|------|
//! | [`AngleSource`] | 读取关节当前角度 |
//! | [`Actuator`] | 下发力矩 / 位置命令，写静态力矩上限，读力矩限制 |
//! | [`Model`] | 按名字查找关节，读取世界步长 |
//! | [`HostRuntime`] | 宿主运行时是否就绪 |
//! | [`ParameterServer`] | 声明并解析数值参数 |
//!
//! # 线程模型
//!
//! 所有接口都在宿主的仿真线程上同步调用，不要求 `Send` / `Sync`。

use crate::types::{NewtonMeter, Rad};
use std::time::Duration;

/// 关节角度读取
pub trait AngleSource {
    /// 当前角度（单自由度）
    fn angle(&self) -> Rad;
}

/// 关节执行器
pub trait Actuator {
    /// 下发力矩命令（仅本步有效）
    fn set_force(&mut self, effort: NewtonMeter);

    /// 下发绝对位置命令
    ///
    /// `bypass_limits = true` 表示立即生效并绕过软限位，
    /// 即运动学覆盖而非动力学驱动。
    fn set_position(&mut self, angle: Rad, bypass_limits: bool);

    /// 写入静态最大力矩（`fmax`）
    fn set_max_force(&mut self, effort: NewtonMeter);

    /// 关节配置的力矩限制
    fn effort_limit(&self) -> NewtonMeter;
}

/// 宿主模型
pub trait Model {
    /// 关节句柄
    type Joint: AngleSource + Actuator;

    /// 按名字查找关节，找不到返回 `None`
    fn joint(&self, name: &str) -> Option<Self::Joint>;

    /// 物理引擎的固定（最大）步长
    fn max_step_size(&self) -> Duration;
}

/// 宿主运行时状态
pub trait HostRuntime {
    /// 运行时是否已初始化，可以挂载插件
    fn is_ready(&self) -> bool;
}

/// 宿主参数系统
pub trait ParameterServer {
    /// 声明参数并返回解析后的值
    ///
    /// 参数未被外部设置时返回 `default`。
    fn declare_parameter(&mut self, name: &str, default: f64) -> f64;
}

/// 总是就绪的运行时
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyRuntime;

impl HostRuntime for ReadyRuntime {
    fn is_ready(&self) -> bool {
        true
    }
}
