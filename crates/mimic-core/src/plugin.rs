//! Mimic Joint Plugin - 挂载校验门与状态机
//!
//! 插件只有两个状态：
//!
//! ```text
//! Unarmed ──load() 成功──▶ Armed
//!    ▲  │
//!    └──┘ load() 失败（报告一条诊断，保持 Unarmed）
//! ```
//!
//! - **Unarmed**: 初始状态，`on_update()` 什么也不做
//! - **Armed**: 终止状态，每次 `on_update()` 执行一步跟踪控制律
//!
//! # 校验顺序
//!
//! 1. 模型为空 → [`LoadError::NullModel`]
//! 2. 宿主运行时未就绪 → [`LoadError::RuntimeNotReady`]
//! 3. 缺少 `joint` → [`LoadError::MissingJoint`]
//! 4. 缺少 `mimicJoint` → [`LoadError::MissingMimicJoint`]
//! 5. 主关节不存在 → [`LoadError::JointNotFound`]
//! 6. 从动关节不存在 → [`LoadError::MimicJointNotFound`]
//! 7. 主从关节相同 → [`LoadError::SameJoint`]
//!
//! 启用 `hasPID` 时，增益在第 5 步之前从 `gains.<joint>` 参数空间声明。
//!
//! # 示例
//!
//! ```rust,ignore
//! let mut plugin = MimicJointPlugin::new();
//! plugin.load(Some(&world), &config, &mut params, &runtime)?;
//!
//! // 宿主每个仿真步调用一次
//! world.step();
//! plugin.on_update();
//! ```

use crate::config::MimicConfig;
use crate::control::{Command, TrackingController};
use crate::error::LoadError;
use crate::host::{Actuator, AngleSource, HostRuntime, Model, ParameterServer};
use crate::params::{ParameterSet, PidGains, max_effort_from_limit};
use crate::types::NewtonMeter;
use std::time::Duration;
use tracing::{error, info, trace, warn};

/// 已挂载的控制回路
#[derive(Debug)]
struct ArmedMimic<J> {
    master: J,
    mimic: J,
    tracker: TrackingController,
    /// 标称控制周期（世界固定步长）
    period: Duration,
}

#[derive(Debug)]
enum PluginState<J> {
    Unarmed,
    Armed(ArmedMimic<J>),
}

/// 从动关节插件
#[derive(Debug)]
pub struct MimicJointPlugin<J> {
    state: PluginState<J>,
}

impl<J> Default for MimicJointPlugin<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J> MimicJointPlugin<J> {
    /// 创建处于 Unarmed 状态的插件
    pub fn new() -> Self {
        MimicJointPlugin {
            state: PluginState::Unarmed,
        }
    }

    /// 是否已挂载
    pub fn is_armed(&self) -> bool {
        matches!(self.state, PluginState::Armed(_))
    }

    /// 已挂载时的跟踪控制器
    pub fn tracker(&self) -> Option<&TrackingController> {
        match &self.state {
            PluginState::Armed(armed) => Some(&armed.tracker),
            PluginState::Unarmed => None,
        }
    }

    /// 已挂载时的标称控制周期
    pub fn period(&self) -> Option<Duration> {
        match &self.state {
            PluginState::Armed(armed) => Some(armed.period),
            PluginState::Unarmed => None,
        }
    }
}

impl<J: AngleSource + Actuator> MimicJointPlugin<J> {
    /// 校验配置并挂载控制回路
    ///
    /// 失败时输出一条错误诊断并返回原因，插件保持 Unarmed，不会写入任何关节。
    pub fn load<M>(
        &mut self,
        model: Option<&M>,
        config: &MimicConfig,
        params: &mut dyn ParameterServer,
        runtime: &dyn HostRuntime,
    ) -> Result<(), LoadError>
    where
        M: Model<Joint = J>,
    {
        if self.is_armed() {
            error!("{}", LoadError::AlreadyArmed);
            return Err(LoadError::AlreadyArmed);
        }

        info!("Starting mimic joint plugin");

        match arm(model, config, params, runtime) {
            Ok(armed) => {
                info!("MimicJointPlugin loaded! {}", armed.tracker.params());
                self.state = PluginState::Armed(armed);
                Ok(())
            },
            Err(e) => {
                error!("{}", e);
                Err(e)
            },
        }
    }

    /// 宿主每个仿真步的回调
    ///
    /// 返回本步下发给从动关节的命令；Unarmed 或误差在死区内时返回 `None`。
    pub fn on_update(&mut self) -> Option<Command> {
        let PluginState::Armed(armed) = &mut self.state else {
            trace!("MimicJointPlugin is not armed, ignoring update");
            return None;
        };

        let master_angle = armed.master.angle();
        let mimic_angle = armed.mimic.angle();

        let command = armed.tracker.tick(armed.period, master_angle, mimic_angle)?;
        command.apply(&mut armed.mimic);
        Some(command)
    }
}

fn arm<M: Model>(
    model: Option<&M>,
    config: &MimicConfig,
    params: &mut dyn ParameterServer,
    runtime: &dyn HostRuntime,
) -> Result<ArmedMimic<M::Joint>, LoadError> {
    let model = model.ok_or(LoadError::NullModel)?;

    if !runtime.is_ready() {
        return Err(LoadError::RuntimeNotReady);
    }

    let joint_name = config.joint.as_deref().ok_or(LoadError::MissingJoint)?;
    let mimic_name = config
        .mimic_joint
        .as_deref()
        .ok_or(LoadError::MissingMimicJoint)?;

    let gains = config
        .has_pid
        .then(|| PidGains::declare(params, joint_name));

    let master = model.joint(joint_name).ok_or_else(|| LoadError::JointNotFound {
        name: joint_name.to_string(),
    })?;
    let mut mimic = model.joint(mimic_name).ok_or_else(|| LoadError::MimicJointNotFound {
        name: mimic_name.to_string(),
    })?;

    if joint_name == mimic_name {
        return Err(LoadError::SameJoint {
            name: joint_name.to_string(),
        });
    }

    let max_effort = match config.max_effort {
        Some(value) => NewtonMeter(value),
        None => max_effort_from_limit(mimic.effort_limit()),
    };

    let mut parameter_set = ParameterSet::new(joint_name, mimic_name, max_effort)
        .with_multiplier(config.multiplier.unwrap_or(1.0))
        .with_offset(config.offset.unwrap_or(0.0))
        .with_deadband(config.sensitiveness.unwrap_or(0.0));

    match gains {
        Some(gains) => parameter_set = parameter_set.with_pid(gains),
        None => mimic.set_max_force(parameter_set.max_effort()),
    }

    let period = model.max_step_size();
    if period.is_zero() {
        warn!("World reports a zero step size, PID output will stay at zero");
    }

    Ok(ArmedMimic {
        master,
        mimic,
        tracker: TrackingController::new(parameter_set),
        period,
    })
}
